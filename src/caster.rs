//! Shadow caster: the entry point for scene code.
//!
//! A [`ShadowCaster`] holds the half-edge mesh built from the latest
//! world-space snapshot of an object, if there is one, and runs silhouette
//! extraction and shadow volume extrusion against it. Asking for results
//! before a mesh has been built is not an error; it logs a warning and
//! returns nothing.
//!
//! # Example
//!
//! ```
//! use umbra::ShadowCaster;
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
//!
//! let mut caster: ShadowCaster = ShadowCaster::default();
//! caster.rebuild(Some(soup.as_slice())).unwrap();
//!
//! let light = Point3::new(5.0, 5.0, 1.0);
//! assert_eq!(caster.silhouette_lines(&light).len(), 2);
//! assert_eq!(caster.shadow_volume(&light).unwrap().len(), 6);
//! ```

use nalgebra::Point3;

use crate::algo::shadow_volume::{shadow_volume_from_mesh, ShadowVolumeOptions};
use crate::algo::silhouette::{silhouette, silhouette_lines, SilhouetteOptions};
use crate::error::Result;
use crate::mesh::{build_from_soup, BuildOptions, HalfEdgeId, HalfEdgeMesh, MeshIndex};

/// Owns an optional mesh and the options used to build and query it.
#[derive(Debug, Clone, Default)]
pub struct ShadowCaster<I: MeshIndex = u32> {
    mesh: Option<HalfEdgeMesh<I>>,
    build: BuildOptions,
    silhouette: SilhouetteOptions,
    extrusion: ShadowVolumeOptions,
}

impl<I: MeshIndex> ShadowCaster<I> {
    /// Create a caster with no mesh.
    pub fn new(
        build: BuildOptions,
        silhouette: SilhouetteOptions,
        extrusion: ShadowVolumeOptions,
    ) -> Self {
        Self {
            mesh: None,
            build,
            silhouette,
            extrusion,
        }
    }

    /// Replace the mesh with one built from `soup`, or drop it for `None`.
    ///
    /// On error the previous mesh is kept.
    pub fn rebuild(&mut self, soup: Option<&[Point3<f64>]>) -> Result<()> {
        let Some(soup) = soup else {
            log::warn!("no source geometry, clearing shadow caster mesh");
            self.mesh = None;
            return Ok(());
        };

        self.mesh = Some(build_from_soup(soup, &self.build)?);
        Ok(())
    }

    /// Drop the current mesh.
    pub fn clear(&mut self) {
        self.mesh = None;
    }

    /// The current mesh, if any.
    pub fn mesh(&self) -> Option<&HalfEdgeMesh<I>> {
        self.mesh.as_ref()
    }

    fn mesh_or_warn(&self, what: &str) -> Option<&HalfEdgeMesh<I>> {
        if self.mesh.is_none() {
            log::warn!("{} requested without a mesh, returning nothing", what);
        }
        self.mesh.as_ref()
    }

    /// Silhouette half-edges as seen from `reference`.
    pub fn silhouette(&self, reference: &Point3<f64>) -> Vec<HalfEdgeId<I>> {
        self.mesh_or_warn("silhouette")
            .map(|mesh| silhouette(mesh, reference, &self.silhouette))
            .unwrap_or_default()
    }

    /// Silhouette as a flat line list, two positions per edge.
    pub fn silhouette_lines(&self, reference: &Point3<f64>) -> Vec<Point3<f64>> {
        self.mesh_or_warn("silhouette lines")
            .map(|mesh| {
                let edges = silhouette(mesh, reference, &self.silhouette);
                silhouette_lines(mesh, &edges)
            })
            .unwrap_or_default()
    }

    /// Shadow volume triangle list cast from `reference`.
    pub fn shadow_volume(&self, reference: &Point3<f64>) -> Result<Vec<Point3<f64>>> {
        let Some(mesh) = self.mesh_or_warn("shadow volume") else {
            return Ok(Vec::new());
        };

        let edges = silhouette(mesh, reference, &self.silhouette);
        shadow_volume_from_mesh(mesh, &edges, reference, &self.extrusion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures;

    #[test]
    fn test_no_mesh_gives_empty_results() {
        let caster: ShadowCaster = ShadowCaster::default();
        let light = Point3::new(1.0, 2.0, 3.0);

        assert!(caster.mesh().is_none());
        assert!(caster.silhouette(&light).is_empty());
        assert!(caster.silhouette_lines(&light).is_empty());
        assert!(caster.shadow_volume(&light).unwrap().is_empty());
    }

    #[test]
    fn test_rebuild_and_clear() {
        let mut caster: ShadowCaster = ShadowCaster::default();
        caster.rebuild(Some(fixtures::unit_cube().as_slice())).unwrap();
        assert_eq!(caster.mesh().map(|m| m.num_faces()), Some(12));

        let light = Point3::new(10.0, 0.5, 0.5);
        assert_eq!(caster.silhouette(&light).len(), 4);
        assert_eq!(caster.shadow_volume(&light).unwrap().len(), 24);

        caster.rebuild(None).unwrap();
        assert!(caster.mesh().is_none());

        caster.rebuild(Some(fixtures::single_triangle().as_slice())).unwrap();
        caster.clear();
        assert!(caster.mesh().is_none());
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_mesh() {
        let mut caster: ShadowCaster = ShadowCaster::new(
            BuildOptions::default().reject_duplicate_edges(),
            SilhouetteOptions::default().sequential(),
            ShadowVolumeOptions::default(),
        );
        caster.rebuild(Some(fixtures::single_triangle().as_slice())).unwrap();

        let mut doubled = fixtures::single_triangle();
        doubled.extend(fixtures::single_triangle());
        assert!(caster.rebuild(Some(doubled.as_slice())).is_err());
        assert_eq!(caster.mesh().map(|m| m.num_faces()), Some(1));
    }

    #[test]
    fn test_bad_extrusion_distance_is_reported() {
        let mut caster: ShadowCaster = ShadowCaster::new(
            BuildOptions::default(),
            SilhouetteOptions::default(),
            ShadowVolumeOptions::default().with_extrusion_distance(-1.0),
        );
        caster.rebuild(Some(fixtures::unit_cube().as_slice())).unwrap();
        assert!(caster.shadow_volume(&Point3::new(10.0, 0.5, 0.5)).is_err());
    }
}
