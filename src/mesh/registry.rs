//! Point registry: welds nearby positions into shared points.
//!
//! Every point referenced by a half-edge comes from the registry. Interning a
//! position returns the earliest stored point within the weld tolerance, or
//! stores a new one. Points are never removed or moved.

use std::collections::HashMap;

use nalgebra::Point3;

use super::index::{MeshIndex, PointId};
use crate::error::{MeshError, Result};

/// Default weld tolerance for points.
pub const DEFAULT_WELD_TOLERANCE: f64 = 1e-3;

/// How points and half-edges are looked up during a build.
///
/// Both strategies produce identical meshes; only the cost differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupStrategy {
    /// Scan every stored element. O(n) per lookup, O(n²) per build.
    #[default]
    Linear,
    /// Quantized spatial grid for points and an ordered-pair map for
    /// half-edges. Expected O(1) per lookup.
    Hashed,
}

type Cell = (i64, i64, i64);

/// Largest quantized coordinate that gets a grid cell. Neighbour offsets of
/// ±1 stay far from `i64` overflow below this.
const CELL_LIMIT: f64 = (1u64 << 62) as f64;

/// Spatial hash for [`LookupStrategy::Hashed`]. Cell size equals the
/// tolerance, so any match lies in the 3x3x3 neighborhood.
#[derive(Debug, Clone)]
struct PointGrid<I: MeshIndex> {
    cells: HashMap<Cell, Vec<PointId<I>>>,
    /// Points too far out (or non-finite) to quantize. Always scanned.
    unbinned: Vec<PointId<I>>,
}

impl<I: MeshIndex> PointGrid<I> {
    fn new() -> Self {
        Self {
            cells: HashMap::new(),
            unbinned: Vec::new(),
        }
    }
}

/// Deduplicating store of mesh points.
#[derive(Debug, Clone)]
pub struct PointRegistry<I: MeshIndex = u32> {
    positions: Vec<Point3<f64>>,
    tolerance: f64,
    grid: Option<PointGrid<I>>,
}

impl<I: MeshIndex> PointRegistry<I> {
    /// Create an empty registry.
    ///
    /// Fails if `tolerance` is not a positive finite number.
    pub fn new(tolerance: f64, lookup: LookupStrategy) -> Result<Self> {
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(MeshError::invalid_param(
                "weld_tolerance",
                tolerance,
                "must be positive and finite",
            ));
        }

        let grid = match lookup {
            LookupStrategy::Linear => None,
            LookupStrategy::Hashed => Some(PointGrid::new()),
        };

        Ok(Self {
            positions: Vec::new(),
            tolerance,
            grid,
        })
    }

    /// Return the point within tolerance of `position`, creating it if needed.
    pub fn intern(&mut self, position: Point3<f64>) -> PointId<I> {
        if let Some(existing) = self.find(&position) {
            return existing;
        }

        let id = PointId::new(self.positions.len());
        self.positions.push(position);

        let cell = self.cell_of(&position);
        if let Some(grid) = self.grid.as_mut() {
            match cell {
                Some(cell) => grid.cells.entry(cell).or_default().push(id),
                None => grid.unbinned.push(id),
            }
        }

        id
    }

    /// Find the earliest stored point within tolerance of `position`.
    pub fn find(&self, position: &Point3<f64>) -> Option<PointId<I>> {
        let Some(grid) = &self.grid else {
            return self.find_linear(position);
        };
        // Off-grid positions take a full scan
        let Some((cx, cy, cz)) = self.cell_of(position) else {
            return self.find_linear(position);
        };

        let neighbours = (-1..=1).flat_map(move |dx| {
            (-1..=1).flat_map(move |dy| (-1..=1).map(move |dz| (cx + dx, cy + dy, cz + dz)))
        });

        // Lowest id wins to match the linear scan
        neighbours
            .filter_map(|cell| grid.cells.get(&cell))
            .flatten()
            .chain(&grid.unbinned)
            .copied()
            .filter(|&id| self.is_close(id, position))
            .min()
    }

    fn find_linear(&self, position: &Point3<f64>) -> Option<PointId<I>> {
        (0..self.positions.len())
            .map(PointId::new)
            .find(|&id| self.is_close(id, position))
    }

    #[inline]
    fn is_close(&self, id: PointId<I>, position: &Point3<f64>) -> bool {
        (self.positions[id.index()] - position).norm() < self.tolerance
    }

    /// Grid cell of `p`, or `None` when a coordinate does not quantize into
    /// the grid's range.
    #[inline]
    fn cell_of(&self, p: &Point3<f64>) -> Option<Cell> {
        let quantize = |v: f64| {
            let q = (v / self.tolerance).floor();
            (q.abs() < CELL_LIMIT).then_some(q as i64)
        };
        Some((quantize(p.x)?, quantize(p.y)?, quantize(p.z)?))
    }

    /// Number of stored points.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no point has been stored yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Weld tolerance in world units.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Position of a point.
    #[inline]
    pub fn position(&self, id: PointId<I>) -> &Point3<f64> {
        &self.positions[id.index()]
    }

    /// All stored positions, indexed by [`PointId::index`].
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Iterate over points with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (PointId<I>, &Point3<f64>)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| (PointId::new(i), p))
    }
}

impl<I: MeshIndex> Default for PointRegistry<I> {
    /// Linear lookup with [`DEFAULT_WELD_TOLERANCE`].
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            tolerance: DEFAULT_WELD_TOLERANCE,
            grid: None,
        }
    }
}
