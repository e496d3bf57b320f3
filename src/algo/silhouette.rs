//! Silhouette edge extraction.
//!
//! A silhouette edge separates a face that looks toward a reference point (a
//! light or an eye) from a neighbour that looks away from it. Together these
//! edges outline the mesh as seen from the reference point and are the input
//! to shadow volume extrusion.
//!
//! # Classification
//!
//! For every half-edge `e` with a twin, let `d = reference - head(e)`:
//!
//! 1. If `d · n(face(e)) <= 0` the face of `e` is back-facing and `e` is skipped.
//! 2. Otherwise `e` is a silhouette edge when `d · n(face(twin(e)))` has the
//!    opposite sign, i.e. the product of the two dot products is negative.
//!
//! Normals come from [`HalfEdgeMesh::face_normal`] and are not normalized, so
//! only signs matter. A degenerate face has a zero normal, gives a zero dot
//! product and never takes part in a silhouette. Half-edges without a twin
//! have no opposing face and are never classified.
//!
//! # Example
//!
//! ```
//! use umbra::prelude::*;
//! use umbra::algo::silhouette::{silhouette, SilhouetteOptions};
//! use nalgebra::Point3;
//!
//! let soup = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 2.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//! ];
//! let mesh: HalfEdgeMesh = build_from_soup(&soup, &BuildOptions::default()).unwrap();
//!
//! let edges = silhouette(&mesh, &Point3::new(5.0, 5.0, 1.0), &SilhouetteOptions::default());
//! assert_eq!(edges.len(), 1);
//! ```

use std::collections::HashSet;

use nalgebra::{Point3, Vector3};

use crate::mesh::{HalfEdgeId, HalfEdgeMesh, MeshIndex};

/// Options for silhouette extraction.
#[derive(Debug, Clone)]
pub struct SilhouetteOptions {
    /// Whether to compute face normals in parallel (default: true).
    /// Classification itself always runs sequentially.
    pub parallel: bool,
}

impl Default for SilhouetteOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl SilhouetteOptions {
    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Find the silhouette edges of `mesh` as seen from `reference`.
///
/// Each silhouette edge is reported once, by whichever of its two half-edges
/// comes first in the mesh. Results are in half-edge order.
pub fn silhouette<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    reference: &Point3<f64>,
    options: &SilhouetteOptions,
) -> Vec<HalfEdgeId<I>> {
    if mesh.is_empty() {
        log::debug!("silhouette requested for an empty mesh");
        return Vec::new();
    }

    let normals: Vec<Vector3<f64>> = mesh.face_normals(options.parallel);

    let mut result = Vec::new();
    let mut seen: HashSet<HalfEdgeId<I>> = HashSet::new();

    for (id, he) in mesh.halfedges() {
        let Some(twin) = he.twin else {
            continue;
        };

        let d = reference - mesh.position(he.head);
        let s1 = d.dot(&normals[he.face.index()]);
        if s1 <= 0.0 {
            continue;
        }

        let s2 = d.dot(&normals[mesh.face_of(twin).index()]);
        if s1 * s2 < 0.0 && !seen.contains(&id) && !seen.contains(&twin) {
            seen.insert(id);
            result.push(id);
        }
    }

    log::debug!(
        "found {} silhouette edges among {} half-edges",
        result.len(),
        mesh.num_halfedges()
    );

    result
}

/// Head and tail positions of each silhouette edge.
pub fn silhouette_segments<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    edges: &[HalfEdgeId<I>],
) -> Vec<[Point3<f64>; 2]> {
    edges.iter().map(|&he| mesh.halfedge_segment(he)).collect()
}

/// Silhouette edges as a flat line list, two positions per edge.
pub fn silhouette_lines<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    edges: &[HalfEdgeId<I>],
) -> Vec<Point3<f64>> {
    edges
        .iter()
        .flat_map(|&he| mesh.halfedge_segment(he))
        .collect()
}
