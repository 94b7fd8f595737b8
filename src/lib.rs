//! Building blocks for constructing bounding volume hierarchies:
//! parallel extraction of primitive bounds and centers, in place primitive
//! reordering, lock-free max reduction and a few bit level float helpers.

pub mod building;
pub mod geometry;
pub mod parallel_for_each;
pub mod util;

pub use building::{
    AllocationError, Permutation, PermutationError, Primitive, compute_bounding_boxes_and_centers,
    shuffle_primitives,
};
pub use geometry::BoundingBox;
pub use parallel_for_each::{Executor, Rayon, Sequential, ThreadPool, WorkerCount};
