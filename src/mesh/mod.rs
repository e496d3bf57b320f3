//! Core mesh data structures.
//!
//! This module provides the half-edge mesh that the silhouette and shadow
//! volume algorithms run on, and the machinery to build it from triangle soup.
//!
//! # Overview
//!
//! [`HalfEdgeMesh`] owns three arenas: welded points (a [`PointRegistry`]),
//! directed half-edges, and triangular faces. Adjacency is expressed through
//! indices, so the mesh is a plain value with no internal references.
//!
//! # Index Types
//!
//! - [`PointId`] - Identifies a welded point
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`FaceId`] - Identifies a face
//!
//! All three are generic over the underlying integer ([`MeshIndex`]).
//!
//! # Construction
//!
//! ```
//! use umbra::mesh::{build_from_soup, BuildOptions, HalfEdgeMesh};
//! use nalgebra::Point3;
//!
//! let soup = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//! ];
//!
//! let mesh: HalfEdgeMesh = build_from_soup(&soup, &BuildOptions::default().hashed()).unwrap();
//! assert_eq!(mesh.num_points(), 4);
//! assert_eq!(mesh.boundary_halfedges().count(), 4);
//! ```

mod builder;
mod halfedge;
mod index;
mod registry;

#[cfg(test)]
pub(crate) mod fixtures;

pub use builder::{build_from_soup, to_triangle_soup, BuildOptions, DuplicateEdgePolicy};
pub use halfedge::{Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh};
pub use index::{FaceId, HalfEdgeId, MeshIndex, PointId};
pub use registry::{LookupStrategy, PointRegistry, DEFAULT_WELD_TOLERANCE};
