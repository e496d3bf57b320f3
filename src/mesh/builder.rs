//! Mesh construction from triangle soup.
//!
//! A soup is a flat list of world-space positions where every consecutive
//! triple is one counter-clockwise triangle. Positions are welded through the
//! [`PointRegistry`](super::PointRegistry), so triangles that share corners
//! share points, and half-edges running in opposite directions between the
//! same two points become twins.

use std::collections::HashMap;

use nalgebra::Point3;

use super::halfedge::{Face, HalfEdge, HalfEdgeMesh};
use super::index::{FaceId, HalfEdgeId, MeshIndex, PointId};
use super::registry::{LookupStrategy, PointRegistry, DEFAULT_WELD_TOLERANCE};
use crate::error::{MeshError, Result};

/// What to do when a face adds an ordered `(head, tail)` pair that is
/// already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateEdgePolicy {
    /// Return the stored half-edge. The new face takes over its `next` and
    /// `face` links, so two co-directional coincident edges collapse into one.
    #[default]
    Reuse,
    /// Fail with [`MeshError::NonManifoldEdge`] and leave the half-edges and
    /// faces untouched.
    Reject,
}

/// Options for building a half-edge mesh.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Positions closer than this are welded into one point.
    pub weld_tolerance: f64,

    /// Lookup structure used for point and half-edge deduplication.
    pub lookup: LookupStrategy,

    /// Handling of repeated ordered half-edge pairs.
    pub duplicate_edges: DuplicateEdgePolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            weld_tolerance: DEFAULT_WELD_TOLERANCE,
            lookup: LookupStrategy::Linear,
            duplicate_edges: DuplicateEdgePolicy::Reuse,
        }
    }
}

impl BuildOptions {
    /// Set the weld tolerance.
    pub fn with_weld_tolerance(mut self, tolerance: f64) -> Self {
        self.weld_tolerance = tolerance;
        self
    }

    /// Set the lookup strategy.
    pub fn with_lookup(mut self, lookup: LookupStrategy) -> Self {
        self.lookup = lookup;
        self
    }

    /// Use hashed lookup, for large meshes.
    pub fn hashed(self) -> Self {
        self.with_lookup(LookupStrategy::Hashed)
    }

    /// Set the duplicate edge policy.
    pub fn with_duplicate_edges(mut self, policy: DuplicateEdgePolicy) -> Self {
        self.duplicate_edges = policy;
        self
    }

    /// Treat repeated ordered half-edges as errors.
    pub fn reject_duplicate_edges(self) -> Self {
        self.with_duplicate_edges(DuplicateEdgePolicy::Reject)
    }

    /// Check that the options describe a buildable mesh.
    pub fn validate(&self) -> Result<()> {
        if !(self.weld_tolerance.is_finite() && self.weld_tolerance > 0.0) {
            return Err(MeshError::invalid_param(
                "weld_tolerance",
                self.weld_tolerance,
                "must be positive and finite",
            ));
        }
        Ok(())
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Create an empty mesh that welds and deduplicates according to `options`.
    pub fn new(options: &BuildOptions) -> Result<Self> {
        options.validate()?;

        let edge_lookup = match options.lookup {
            LookupStrategy::Linear => None,
            LookupStrategy::Hashed => Some(HashMap::new()),
        };

        Ok(Self {
            points: PointRegistry::new(options.weld_tolerance, options.lookup)?,
            halfedges: Vec::new(),
            faces: Vec::new(),
            edge_lookup,
            duplicate_edges: options.duplicate_edges,
        })
    }

    /// Add one counter-clockwise triangle.
    ///
    /// The corners are welded into points and the half-edges `p0 -> p1`,
    /// `p1 -> p2`, `p2 -> p0` are created (or reused) and linked into a cycle.
    /// Each of them that has no twin yet is paired with the stored half-edge
    /// running the opposite way, if there is one.
    ///
    /// Fails with [`MeshError::NonManifoldEdge`] under
    /// [`DuplicateEdgePolicy::Reject`], and with
    /// [`MeshError::CapacityExceeded`] once the index type cannot address
    /// another face. Points interned by a failed call stay in the registry.
    pub fn add_face(
        &mut self,
        p0: Point3<f64>,
        p1: Point3<f64>,
        p2: Point3<f64>,
    ) -> Result<FaceId<I>> {
        self.check_capacity()?;

        let a = self.points.intern(p0);
        let b = self.points.intern(p1);
        let c = self.points.intern(p2);
        let pairs = [(a, b), (b, c), (c, a)];

        if self.duplicate_edges == DuplicateEdgePolicy::Reject {
            for (i, &(head, tail)) in pairs.iter().enumerate() {
                if self.find_halfedge(head, tail).is_some() || pairs[..i].contains(&(head, tail)) {
                    return Err(MeshError::NonManifoldEdge {
                        head: head.index(),
                        tail: tail.index(),
                    });
                }
            }
        }

        let face = FaceId::new(self.faces.len());
        let hes = pairs.map(|(head, tail)| self.halfedge_for(head, tail));

        for (i, &he) in hes.iter().enumerate() {
            let halfedge = &mut self.halfedges[he.index()];
            if halfedge.face.is_valid() {
                log::trace!("{:?} reuses {:?} from {:?}", face, he, halfedge.face);
            }
            halfedge.next = hes[(i + 1) % 3];
            halfedge.face = face;
        }

        for &he in &hes {
            let HalfEdge { head, tail, twin, .. } = self.halfedges[he.index()];
            if twin.is_some() {
                continue;
            }
            // A collapsed corner gives a self-loop, which is its own reverse
            if let Some(rev) = self.find_halfedge(tail, head).filter(|&rev| rev != he) {
                self.halfedges[he.index()].twin = Some(rev);
                self.halfedges[rev.index()].twin = Some(he);
            }
        }

        self.faces.push(Face::new(hes[0]));
        Ok(face)
    }

    /// Fail unless one more face fits in every arena. Welding is only known
    /// after interning, so three new points and half-edges are assumed.
    fn check_capacity(&self) -> Result<()> {
        let needed = [
            ("point", self.points.len() + 3),
            ("half-edge", self.halfedges.len() + 3),
            ("face", self.faces.len() + 1),
        ];
        for (element, len) in needed {
            if len > I::CAPACITY {
                return Err(MeshError::CapacityExceeded {
                    element,
                    capacity: I::CAPACITY,
                });
            }
        }
        Ok(())
    }

    /// Stored half-edge for an ordered pair, allocating it if absent.
    fn halfedge_for(&mut self, head: PointId<I>, tail: PointId<I>) -> HalfEdgeId<I> {
        if let Some(existing) = self.find_halfedge(head, tail) {
            return existing;
        }

        let id = HalfEdgeId::new(self.halfedges.len());
        self.halfedges.push(HalfEdge::new(head, tail));
        if let Some(map) = self.edge_lookup.as_mut() {
            map.insert((head, tail), id);
        }
        id
    }
}

/// Build a half-edge mesh from a flat list of triangle corners.
///
/// # Arguments
/// * `vertices` - World-space positions, three per counter-clockwise triangle
/// * `options` - Welding, lookup and duplicate-edge settings
///
/// An empty soup gives an empty mesh. Vertices left over after the last
/// complete triangle are ignored. Both cases are logged, not returned as
/// errors.
///
/// # Example
/// ```
/// use umbra::mesh::{build_from_soup, BuildOptions, HalfEdgeMesh};
/// use nalgebra::Point3;
///
/// let soup = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
///
/// let mesh: HalfEdgeMesh = build_from_soup(&soup, &BuildOptions::default()).unwrap();
/// assert_eq!(mesh.num_points(), 3);
/// assert_eq!(mesh.num_faces(), 1);
/// ```
pub fn build_from_soup<I: MeshIndex>(
    vertices: &[Point3<f64>],
    options: &BuildOptions,
) -> Result<HalfEdgeMesh<I>> {
    let mut mesh = HalfEdgeMesh::new(options)?;

    if vertices.is_empty() {
        log::warn!("triangle soup is empty, building an empty mesh");
        return Ok(mesh);
    }

    let trailing = vertices.len() % 3;
    if trailing != 0 {
        log::warn!(
            "triangle soup has {} vertices, ignoring the trailing {}",
            vertices.len(),
            trailing
        );
    }

    let num_triangles = vertices.len() / 3;
    mesh.halfedges.reserve(num_triangles * 3);
    mesh.faces.reserve(num_triangles);

    let mut degenerate = 0usize;
    for tri in vertices.chunks_exact(3) {
        let f = mesh.add_face(tri[0], tri[1], tri[2])?;
        if mesh.face_unit_normal(f).is_none() {
            degenerate += 1;
        }
    }

    if degenerate > 0 {
        log::debug!("{} of {} triangles are degenerate", degenerate, num_triangles);
    }
    log::debug!(
        "built half-edge mesh: {} points, {} half-edges ({} without twin), {} faces",
        mesh.num_points(),
        mesh.num_halfedges(),
        mesh.boundary_halfedges().count(),
        mesh.num_faces()
    );

    Ok(mesh)
}

/// Flatten a mesh back into triangle soup, three welded positions per face.
pub fn to_triangle_soup<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Vec<Point3<f64>> {
    mesh.face_ids()
        .flat_map(|f| mesh.face_positions(f))
        .collect()
}
