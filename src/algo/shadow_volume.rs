//! Shadow volume extrusion.
//!
//! Every silhouette edge `(h, t)` is swept away from the reference point into
//! a quad whose far side sits a very large distance out along the rays from
//! the reference point through `h` and `t`. The quad is emitted as two
//! triangles, `(h, h_far, t_far)` and `(h, t_far, t)`, so the output is a flat
//! triangle list with exactly six vertices per edge, ready for a stencil
//! shadow pass.
//!
//! An endpoint that coincides with the reference point has no direction to
//! be pushed along. It stays where it is, which collapses that quad without
//! producing NaN or changing the vertex count.

use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeId, HalfEdgeMesh, MeshIndex};

/// Default extrusion distance, standing in for infinity.
pub const DEFAULT_EXTRUSION_DISTANCE: f64 = 1e9;

/// Options for shadow volume extrusion.
#[derive(Debug, Clone)]
pub struct ShadowVolumeOptions {
    /// How far silhouette endpoints are pushed away from the reference point.
    pub extrusion_distance: f64,
}

impl Default for ShadowVolumeOptions {
    fn default() -> Self {
        Self {
            extrusion_distance: DEFAULT_EXTRUSION_DISTANCE,
        }
    }
}

impl ShadowVolumeOptions {
    /// Set the extrusion distance.
    pub fn with_extrusion_distance(mut self, distance: f64) -> Self {
        self.extrusion_distance = distance;
        self
    }

    /// Check that the extrusion distance is positive and finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.extrusion_distance.is_finite() && self.extrusion_distance > 0.0) {
            return Err(MeshError::invalid_param(
                "extrusion_distance",
                self.extrusion_distance,
                "must be positive and finite",
            ));
        }
        Ok(())
    }
}

/// Unit direction from `reference` to `p`, or zero if they coincide.
#[inline]
fn away_from(reference: &Point3<f64>, p: &Point3<f64>) -> Vector3<f64> {
    (p - reference)
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(|| {
            log::debug!("silhouette endpoint {:?} coincides with the reference point", p);
            Vector3::zeros()
        })
}

/// Extrude silhouette segments into a shadow volume triangle list.
///
/// # Arguments
///
/// * `segments` - Silhouette edges as `[head, tail]` positions
/// * `reference` - The light position the volume is cast from
/// * `options` - Extrusion parameters
///
/// # Returns
///
/// Six positions per segment, two triangles each.
///
/// # Example
///
/// ```
/// use umbra::algo::shadow_volume::{shadow_volume, ShadowVolumeOptions};
/// use nalgebra::Point3;
///
/// let edge = [Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
/// let light = Point3::new(0.0, 0.0, -5.0);
///
/// let tris = shadow_volume(&[edge], &light, &ShadowVolumeOptions::default()).unwrap();
/// assert_eq!(tris.len(), 6);
/// ```
pub fn shadow_volume(
    segments: &[[Point3<f64>; 2]],
    reference: &Point3<f64>,
    options: &ShadowVolumeOptions,
) -> Result<Vec<Point3<f64>>> {
    options.validate()?;
    let distance = options.extrusion_distance;

    let mut out = Vec::with_capacity(segments.len() * 6);
    for [h, t] in segments {
        let h_far = h + away_from(reference, h) * distance;
        let t_far = t + away_from(reference, t) * distance;

        out.extend([*h, h_far, t_far]);
        out.extend([*h, t_far, *t]);
    }

    log::debug!(
        "extruded {} silhouette edges into {} shadow volume triangles",
        segments.len(),
        out.len() / 3
    );

    Ok(out)
}

/// Extrude silhouette half-edges of `mesh` into a shadow volume.
///
/// Equivalent to resolving each half-edge to its `[head, tail]` positions and
/// calling [`shadow_volume`].
pub fn shadow_volume_from_mesh<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    edges: &[HalfEdgeId<I>],
    reference: &Point3<f64>,
    options: &ShadowVolumeOptions,
) -> Result<Vec<Point3<f64>>> {
    let segments: Vec<[Point3<f64>; 2]> =
        edges.iter().map(|&he| mesh.halfedge_segment(he)).collect();
    shadow_volume(&segments, reference, options)
}
