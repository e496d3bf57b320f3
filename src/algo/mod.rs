//! Algorithms that run on a built mesh.
//!
//! - **Silhouette**: edges between faces that look toward and away from a
//!   reference point
//! - **Shadow volume**: extrusion of silhouette edges away from a light

pub mod shadow_volume;
pub mod silhouette;

pub use shadow_volume::{shadow_volume, shadow_volume_from_mesh, ShadowVolumeOptions};
pub use silhouette::{silhouette, silhouette_lines, silhouette_segments, SilhouetteOptions};
