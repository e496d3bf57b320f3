//! Half-edge mesh data structure.
//!
//! Triangles are stored as cycles of three directed half-edges. Each half-edge
//! runs from a `head` point to a `tail` point, knows the `next` half-edge
//! around its face and the `face` itself, and may know its `twin`: the
//! half-edge running the other way between the same two points.
//!
//! # Boundary Handling
//!
//! No boundary half-edges are synthesized. A half-edge whose reverse pair was
//! never added simply has no twin, and that absence is what marks it as lying
//! on an open border or a non-manifold seam.
//!
//! # Arenas
//!
//! Points, half-edges and faces live in flat vectors addressed by
//! [`PointId`], [`HalfEdgeId`] and [`FaceId`]. Nothing holds a reference into
//! another element, so the structure has no ownership cycles.

use std::collections::HashMap;

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use super::builder::DuplicateEdgePolicy;
use super::index::{FaceId, HalfEdgeId, MeshIndex, PointId};
use super::registry::PointRegistry;
use crate::error::{MeshError, Result};

/// A directed half-edge.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The point this half-edge starts at.
    pub head: PointId<I>,

    /// The point this half-edge ends at.
    pub tail: PointId<I>,

    /// The half-edge from `tail` back to `head`, if one exists.
    pub twin: Option<HalfEdgeId<I>>,

    /// The next half-edge around the face (counter-clockwise).
    pub next: HalfEdgeId<I>,

    /// The face this half-edge bounds.
    pub face: FaceId<I>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create an unlinked half-edge between two points.
    pub fn new(head: PointId<I>, tail: PointId<I>) -> Self {
        Self {
            head,
            tail,
            twin: None,
            next: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
        }
    }

    /// Whether this half-edge has no opposing face.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.twin.is_none()
    }
}

/// A triangular face.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// Anchor half-edge. The other two are `next` and `next.next`.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Face<I> {
    /// Create a face anchored at the given half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self { halfedge }
    }
}

/// A half-edge mesh built from triangle soup.
///
/// Construct one with [`build_from_soup`](super::build_from_soup), or with
/// [`HalfEdgeMesh::new`] followed by [`add_face`](HalfEdgeMesh::add_face) calls.
/// Once built the mesh is not edited; rebuild it when the source geometry
/// changes.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    /// Welded points.
    pub(crate) points: PointRegistry<I>,

    /// All half-edges in the mesh.
    pub(crate) halfedges: Vec<HalfEdge<I>>,

    /// All faces in the mesh.
    pub(crate) faces: Vec<Face<I>>,

    /// Ordered-pair index over `halfedges`, present for hashed lookup only.
    pub(crate) edge_lookup: Option<HashMap<(PointId<I>, PointId<I>), HalfEdgeId<I>>>,

    /// What `add_face` does with an ordered pair that already exists.
    pub(crate) duplicate_edges: DuplicateEdgePolicy,
}

impl<I: MeshIndex> Default for HalfEdgeMesh<I> {
    fn default() -> Self {
        Self {
            points: PointRegistry::default(),
            halfedges: Vec::new(),
            faces: Vec::new(),
            edge_lookup: None,
            duplicate_edges: DuplicateEdgePolicy::default(),
        }
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    // ==================== Accessors ====================

    /// Get the number of welded points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Get the number of half-edges.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The point registry backing this mesh.
    #[inline]
    pub fn points(&self) -> &PointRegistry<I> {
        &self.points
    }

    /// Get the position of a point.
    #[inline]
    pub fn position(&self, p: PointId<I>) -> &Point3<f64> {
        self.points.position(p)
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    // ==================== Topology Queries ====================

    /// Get the twin half-edge, if any.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId<I>) -> Option<HalfEdgeId<I>> {
        self.halfedge(he).twin
    }

    /// Get the next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the head (start) point of a half-edge.
    #[inline]
    pub fn head(&self, he: HalfEdgeId<I>) -> PointId<I> {
        self.halfedge(he).head
    }

    /// Get the tail (end) point of a half-edge.
    #[inline]
    pub fn tail(&self, he: HalfEdgeId<I>) -> PointId<I> {
        self.halfedge(he).tail
    }

    /// Get the face of a half-edge.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Check if a half-edge has no twin.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Find the stored half-edge running from `head` to `tail`.
    pub fn find_halfedge(&self, head: PointId<I>, tail: PointId<I>) -> Option<HalfEdgeId<I>> {
        match &self.edge_lookup {
            Some(map) => map.get(&(head, tail)).copied(),
            None => self
                .halfedges
                .iter()
                .position(|he| he.head == head && he.tail == tail)
                .map(HalfEdgeId::new),
        }
    }

    /// Whether every half-edge has a twin.
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.halfedges.iter().all(|he| he.twin.is_some())
    }

    // ==================== Iteration ====================

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(|i| HalfEdgeId::new(i))
    }

    /// Iterate over all half-edges with their IDs.
    pub fn halfedges(&self) -> impl Iterator<Item = (HalfEdgeId<I>, &HalfEdge<I>)> + '_ {
        self.halfedges
            .iter()
            .enumerate()
            .map(|(i, he)| (HalfEdgeId::new(i), he))
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(|i| FaceId::new(i))
    }

    /// Iterate over all faces with their IDs.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId<I>, &Face<I>)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, f)| (FaceId::new(i), f))
    }

    /// Half-edges without a twin.
    pub fn boundary_halfedges(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        self.halfedges()
            .filter(|(_, he)| he.is_boundary())
            .map(|(id, _)| id)
    }

    /// Iterate over the half-edges of a face, starting at its anchor.
    pub fn face_halfedges(&self, f: FaceId<I>) -> FaceHalfEdgeIter<'_, I> {
        FaceHalfEdgeIter::new(self, f)
    }

    /// Get the three half-edges of a face in winding order.
    pub fn face_triangle(&self, f: FaceId<I>) -> [HalfEdgeId<I>; 3] {
        let he0 = self.face(f).halfedge;
        let he1 = self.next(he0);
        let he2 = self.next(he1);
        [he0, he1, he2]
    }

    /// Get the three points of a face in winding order.
    pub fn face_points(&self, f: FaceId<I>) -> [PointId<I>; 3] {
        let [he0, he1, he2] = self.face_triangle(f);
        [self.head(he0), self.head(he1), self.head(he2)]
    }

    /// Get the positions of the three points of a face.
    pub fn face_positions(&self, f: FaceId<I>) -> [Point3<f64>; 3] {
        let [p0, p1, p2] = self.face_points(f);
        [*self.position(p0), *self.position(p1), *self.position(p2)]
    }

    /// Get the head and tail positions of a half-edge.
    pub fn halfedge_segment(&self, he: HalfEdgeId<I>) -> [Point3<f64>; 2] {
        let he = self.halfedge(he);
        [*self.position(he.head), *self.position(he.tail)]
    }

    // ==================== Geometry ====================

    /// Compute the normal of a face, `(p1 - p0) × (p2 - p1)`.
    ///
    /// The result is not normalized: its length is twice the face area and
    /// its direction follows the counter-clockwise winding. Sign tests can use
    /// it directly. Degenerate faces give a zero or near-zero vector.
    pub fn face_normal(&self, f: FaceId<I>) -> Vector3<f64> {
        let [p0, p1, p2] = self.face_positions(f);
        (p1 - p0).cross(&(p2 - p1))
    }

    /// Compute the unit normal of a face, or `None` for a degenerate face.
    pub fn face_unit_normal(&self, f: FaceId<I>) -> Option<Vector3<f64>> {
        self.face_normal(f).try_normalize(f64::EPSILON)
    }

    /// Compute the area of a face.
    pub fn face_area(&self, f: FaceId<I>) -> f64 {
        0.5 * self.face_normal(f).norm()
    }

    /// Compute every face normal, indexed by [`FaceId::index`].
    pub fn face_normals(&self, parallel: bool) -> Vec<Vector3<f64>> {
        if parallel {
            (0..self.faces.len())
                .into_par_iter()
                .map(|i| self.face_normal(FaceId::new(i)))
                .collect()
        } else {
            self.face_ids().map(|f| self.face_normal(f)).collect()
        }
    }

    /// Compute the axis-aligned bounding box of the points.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let positions = self.points.positions();
        let first = positions.first()?;

        let mut min = *first;
        let mut max = *first;
        for p in positions {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        Some((min, max))
    }

    // ==================== Validation ====================

    /// Check that twins are symmetric and every face closes after three steps.
    ///
    /// Meshes built under [`DuplicateEdgePolicy::Reuse`] from input with
    /// co-directional shared edges fail this check, since the later face
    /// takes over the shared half-edge.
    pub fn validate(&self) -> Result<()> {
        let num_halfedges = self.halfedges.len();

        for (id, he) in self.halfedges() {
            if let Some(twin_id) = he.twin {
                if twin_id.index() >= num_halfedges {
                    return Err(MeshError::InvalidState(format!(
                        "{:?} has out-of-range twin {:?}",
                        id, twin_id
                    )));
                }
                let twin = self.halfedge(twin_id);
                if twin.twin != Some(id) {
                    return Err(MeshError::InvalidState(format!(
                        "{:?} -> twin {:?} does not point back",
                        id, twin_id
                    )));
                }
                if twin.head != he.tail || twin.tail != he.head {
                    return Err(MeshError::InvalidState(format!(
                        "{:?} and twin {:?} do not share endpoints",
                        id, twin_id
                    )));
                }
            }
        }

        for (fid, face) in self.faces() {
            let mut he = face.halfedge;
            for _ in 0..3 {
                if !he.is_valid() || he.index() >= num_halfedges {
                    return Err(MeshError::InvalidState(format!(
                        "{:?} has a broken half-edge cycle",
                        fid
                    )));
                }
                if self.face_of(he) != fid {
                    return Err(MeshError::InvalidState(format!(
                        "{:?} in the cycle of {:?} belongs to {:?}",
                        he,
                        fid,
                        self.face_of(he)
                    )));
                }
                he = self.next(he);
            }
            if he != face.halfedge {
                return Err(MeshError::InvalidState(format!(
                    "{:?} does not close after three half-edges",
                    fid
                )));
            }
        }

        Ok(())
    }

    /// Check if the mesh is valid. See [`validate`](Self::validate).
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Iterator over the half-edges of a face.
///
/// Stops after three steps even if the cycle does not close.
pub struct FaceHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    current: HalfEdgeId<I>,
    remaining: usize,
}

impl<'a, I: MeshIndex> FaceHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, f: FaceId<I>) -> Self {
        let start = mesh.face(f).halfedge;
        Self {
            mesh,
            current: start,
            remaining: if start.is_valid() { 3 } else { 0 },
        }
    }
}

impl<'a, I: MeshIndex> Iterator for FaceHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || !self.current.is_valid() {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.next(self.current);
        self.remaining -= 1;
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mesh() {
        let mesh = HalfEdgeMesh::<u32>::default();
        assert_eq!(mesh.num_points(), 0);
        assert_eq!(mesh.num_halfedges(), 0);
        assert_eq!(mesh.num_faces(), 0);
        assert!(mesh.is_empty());
        assert!(!mesh.is_closed());
        assert!(mesh.bounding_box().is_none());
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_halfedge_new_is_unlinked() {
        let he = HalfEdge::<u32>::new(PointId::new(0), PointId::new(1));
        assert!(he.is_boundary());
        assert!(!he.next.is_valid());
        assert!(!he.face.is_valid());
    }

    #[test]
    fn test_face_normal_is_unnormalized() {
        let mut mesh = HalfEdgeMesh::<u32>::default();
        let f = mesh
            .add_face(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(0.0, 2.0, 0.0),
            )
            .unwrap();

        assert_eq!(mesh.face_normal(f), Vector3::new(0.0, 0.0, 4.0));
        assert_eq!(mesh.face_unit_normal(f), Some(Vector3::new(0.0, 0.0, 1.0)));
        assert!((mesh.face_area(f) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_face_normal_is_zero() {
        let mut mesh = HalfEdgeMesh::<u32>::default();
        let f = mesh
            .add_face(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
            )
            .unwrap();

        assert_eq!(mesh.face_normal(f), Vector3::zeros());
        assert!(mesh.face_unit_normal(f).is_none());
        assert_eq!(mesh.face_area(f), 0.0);
    }

    #[test]
    fn test_face_halfedges_walks_cycle() {
        let mut mesh = HalfEdgeMesh::<u32>::default();
        let f = mesh
            .add_face(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            )
            .unwrap();

        let hes: Vec<_> = mesh.face_halfedges(f).collect();
        assert_eq!(hes, mesh.face_triangle(f).to_vec());
        for he in hes {
            assert_eq!(mesh.face_of(he), f);
        }
    }

    #[test]
    fn test_shared_edge_is_not_boundary() {
        let mut mesh = HalfEdgeMesh::<u32>::default();
        mesh.add_face(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        mesh.add_face(
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        )
        .unwrap();

        let ids: Vec<_> = mesh.halfedge_ids().collect();
        assert_eq!(ids.len(), 6);

        let boundary: Vec<_> = ids
            .iter()
            .copied()
            .filter(|&he| mesh.is_boundary_halfedge(he))
            .collect();
        assert_eq!(boundary, mesh.boundary_halfedges().collect::<Vec<_>>());
        assert_eq!(boundary.len(), 4);

        let shared = mesh.find_halfedge(PointId::new(1), PointId::new(2)).unwrap();
        assert!(!mesh.is_boundary_halfedge(shared));
    }

    #[test]
    fn test_parallel_normals_match_sequential() {
        let mut mesh = HalfEdgeMesh::<u32>::default();
        for i in 0..16 {
            let x = i as f64;
            mesh.add_face(
                Point3::new(x, 0.0, 0.0),
                Point3::new(x + 1.0, 0.0, 0.5 * x),
                Point3::new(x, 1.0, 0.0),
            )
            .unwrap();
        }

        assert_eq!(mesh.face_normals(true), mesh.face_normals(false));
    }

    #[test]
    fn test_bounding_box() {
        let mut mesh = HalfEdgeMesh::<u32>::default();
        mesh.add_face(
            Point3::new(-1.0, 0.0, 2.0),
            Point3::new(3.0, -2.0, 0.0),
            Point3::new(0.0, 5.0, 1.0),
        )
        .unwrap();

        let (min, max) = mesh.bounding_box().unwrap();
        assert_eq!(min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(max, Point3::new(3.0, 5.0, 2.0));
    }
}
