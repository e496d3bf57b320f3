//! # Umbra
//!
//! Half-edge meshes built from triangle soup, with silhouette extraction and
//! shadow volume extrusion on top.
//!
//! A renderer hands umbra the world-space triangles of an object and the
//! position of a light or viewer. Umbra welds the triangles into a half-edge
//! mesh, finds the edges where front-facing and back-facing triangles meet,
//! and extrudes those edges away from the light into a triangle list that can
//! be drawn into a stencil buffer. Rendering, file loading and scene
//! management stay on the caller's side.
//!
//! ## Features
//!
//! - **Half-edge data structure**: index-based arenas, twin/next adjacency,
//!   type-safe ids over 16, 32 or 64-bit integers
//! - **Point welding**: tolerance-based deduplication with linear or
//!   grid-hashed lookup
//! - **Silhouettes**: front/back classification against any reference point
//! - **Shadow volumes**: six vertices per silhouette edge, extruded to a
//!   configurable distance
//!
//! ## Quick Start
//!
//! ```
//! use umbra::prelude::*;
//! use nalgebra::Point3;
//!
//! // Two triangles folded along the edge (1,0,0)-(0,1,0)
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
//! let light = Point3::new(5.0, 5.0, 1.0);
//! let edges = silhouette(&mesh, &light, &SilhouetteOptions::default());
//! assert_eq!(edges.len(), 1);
//!
//! let volume =
//!     shadow_volume_from_mesh(&mesh, &edges, &light, &ShadowVolumeOptions::default()).unwrap();
//! assert_eq!(volume.len(), 6);
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade. Empty input
//! and missing meshes are reported at `warn` level; build and classification
//! summaries at `debug`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod caster;
pub mod error;
pub mod mesh;

pub use caster::ShadowCaster;

/// Prelude module for convenient imports.
///
/// ```
/// use umbra::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{
        shadow_volume, shadow_volume_from_mesh, silhouette, silhouette_lines,
        silhouette_segments, ShadowVolumeOptions, SilhouetteOptions,
    };
    pub use crate::caster::ShadowCaster;
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_soup, to_triangle_soup, BuildOptions, DuplicateEdgePolicy, Face, FaceId,
        HalfEdge, HalfEdgeId, HalfEdgeMesh, LookupStrategy, MeshIndex, PointId, PointRegistry,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_cube_pipeline() {
        let soup = crate::mesh::fixtures::unit_cube();
        let mesh: HalfEdgeMesh = build_from_soup(&soup, &BuildOptions::default().hashed()).unwrap();

        assert_eq!(mesh.num_points(), 8);
        assert_eq!(mesh.num_faces(), 12);
        assert!(mesh.is_closed());
        assert!(mesh.is_valid());

        let light = Point3::new(0.5, 0.5, 7.0);
        let edges = silhouette(&mesh, &light, &SilhouetteOptions::default());
        assert_eq!(edges.len(), 4);

        let volume =
            shadow_volume_from_mesh(&mesh, &edges, &light, &ShadowVolumeOptions::default())
                .unwrap();
        assert_eq!(volume.len(), 24);

        // Near vertices of every quad lie on the cube's top rim
        for tri in volume.chunks_exact(3) {
            assert_eq!(tri[0].z, 1.0);
        }
    }
}
