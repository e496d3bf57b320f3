//! Triangle soups shared by the unit tests.

use nalgebra::Point3;

/// `(0,0,0), (1,0,0), (0,1,0)`, facing +z.
pub(crate) fn single_triangle() -> Vec<Point3<f64>> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ]
}

/// Unit square in the z = 0 plane split along `(1,0,0)-(0,1,0)`. Both
/// triangles face +z and cross the shared edge in opposite directions.
pub(crate) fn planar_pair() -> Vec<Point3<f64>> {
    let mut soup = single_triangle();
    soup.extend([
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
    ]);
    soup
}

/// Like [`planar_pair`] but with the far corner lifted to `(1,1,2)`, so the
/// second triangle's normal is `(-2,-2,1)`.
pub(crate) fn folded_pair() -> Vec<Point3<f64>> {
    let mut soup = single_triangle();
    soup.extend([
        Point3::new(1.0, 1.0, 2.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
    ]);
    soup
}

/// Closed unit cube `[0,1]^3`, outward counter-clockwise winding.
pub(crate) fn unit_cube() -> Vec<Point3<f64>> {
    let quads = [
        // -x
        [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
        // +x
        [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
        // -y
        [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
        // +y
        [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
        // -z
        [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
        // +z
        [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
    ];

    let mut soup = Vec::with_capacity(36);
    for quad in quads {
        let [a, b, c, d] = quad.map(|[x, y, z]| Point3::new(x, y, z));
        soup.extend([a, b, c, a, c, d]);
    }
    soup
}
