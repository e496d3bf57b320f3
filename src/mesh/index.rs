//! Index types for mesh elements.
//!
//! Points, half-edges and faces live in flat arenas owned by the mesh and are
//! addressed by these type-safe wrappers. The wrappers are generic over the
//! underlying integer so small meshes can use `u16` and very large ones `u64`.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Integer type backing the mesh arenas.
///
/// Implemented for `u16`, `u32` and `u64`. The all-ones value of each type is
/// the [`INVALID`](MeshIndex::INVALID) sentinel, so an arena holds at most
/// [`CAPACITY`](MeshIndex::CAPACITY) elements.
pub trait MeshIndex: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Sentinel for links that are not set yet.
    const INVALID: Self;

    /// Number of arena slots this type can address.
    const CAPACITY: usize;

    /// Arena position as an index, or `None` if it collides with the
    /// sentinel or does not fit.
    fn try_from_usize(v: usize) -> Option<Self>;

    /// Arena position of this index.
    fn to_usize(self) -> usize;

    /// Like [`try_from_usize`](MeshIndex::try_from_usize) but maps overflow
    /// to the sentinel. Debug builds panic instead.
    fn from_usize(v: usize) -> Self {
        let index = Self::try_from_usize(v);
        debug_assert!(index.is_some(), "arena position {} out of range", v);
        index.unwrap_or(Self::INVALID)
    }

    /// Whether this is a real index rather than the sentinel.
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

macro_rules! impl_mesh_index {
    ($($ty:ty),*) => {
        $(
            impl MeshIndex for $ty {
                const INVALID: Self = <$ty>::MAX;

                const CAPACITY: usize = if (<$ty>::MAX as u128) < (usize::MAX as u128) {
                    <$ty>::MAX as usize
                } else {
                    usize::MAX
                };

                #[inline]
                fn try_from_usize(v: usize) -> Option<Self> {
                    <$ty>::try_from(v).ok().filter(|&i| i != Self::INVALID)
                }

                #[inline]
                fn to_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_mesh_index!(u16, u32, u64);

/// Identifies a welded point in the mesh's point registry.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct PointId<I: MeshIndex = u32>(I);

/// Identifies a directed half-edge.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct HalfEdgeId<I: MeshIndex = u32>(I);

/// Identifies a triangular face.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId<I: MeshIndex = u32>(I);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl<I: MeshIndex> $name<I> {
            /// Create an index from its arena position.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// The unset sentinel.
            #[inline]
            pub fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// Arena position.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// The underlying integer.
            #[inline]
            pub fn raw(self) -> I {
                self.0
            }

            /// Whether this is a real index rather than the sentinel.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0.is_valid()
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.index())
                } else {
                    write!(f, "{}(INVALID)", $display)
                }
            }
        }

        impl<I: MeshIndex> Default for $name<I> {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl<I: MeshIndex> From<usize> for $name<I> {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_index_type!(PointId, "P");
impl_index_type!(HalfEdgeId, "HE");
impl_index_type!(FaceId, "F");
