mod bounds;
mod permutation;

use std::collections::TryReserveError;

use nalgebra::Point3;
use thiserror::Error;

use crate::{geometry::BoundingBox, util::Float};

pub use bounds::{BoundsAndCenters, compute_bounding_boxes_and_centers};
pub use permutation::{Permutation, PermutationError, shuffle_primitives};

/// Anything that can be put into a BVH.
///
/// Both methods may be called concurrently from multiple threads
/// and must not have side effects.
pub trait Primitive {
    type Scalar: Float;

    fn bounding_box(&self) -> BoundingBox<Self::Scalar>;
    fn center(&self) -> Point3<Self::Scalar>;
}

/// A bounding box is its own primitive.
impl<T: Float> Primitive for BoundingBox<T> {
    type Scalar = T;

    fn bounding_box(&self) -> BoundingBox<T> {
        self.clone()
    }

    fn center(&self) -> Point3<T> {
        BoundingBox::center(self)
    }
}

#[derive(Debug, Error)]
#[error("Failed to allocate buffer for {count} elements")]
pub struct AllocationError {
    count: usize,
    source: TryReserveError,
}

impl AllocationError {
    /// Number of elements the failed allocation was requested for.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Allocates a vector with exactly `count` copies of `value`, reporting
/// allocation failure instead of aborting.
fn allocate_filled<T: Clone>(count: usize, value: T) -> Result<Vec<T>, AllocationError> {
    let mut vec = try_with_capacity(count)?;
    vec.extend(std::iter::repeat_n(value, count));
    Ok(vec)
}

fn try_with_capacity<T>(count: usize) -> Result<Vec<T>, AllocationError> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(count)
        .map_err(|source| AllocationError { count, source })?;
    Ok(vec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{assert, let_assert};
    use std::error::Error as _;

    #[test]
    fn allocate_filled_exact() {
        let_assert!(Ok(vec) = allocate_filled(10, 1.5f32));
        assert!(vec.len() == 10);
        assert!(vec.iter().all(|x| *x == 1.5));
    }

    #[test]
    fn allocation_failure_is_reported() {
        let_assert!(Err(error) = allocate_filled(usize::MAX / 2, 0u64));
        assert!(error.count() == usize::MAX / 2);
        assert!(error.source().is_some());
        assert!(error.to_string().contains("elements"));
    }

    #[test]
    fn bounding_box_primitive() {
        let bounds = BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
        assert!(Primitive::bounding_box(&bounds) == bounds);
        assert!(Primitive::center(&bounds) == Point3::new(1.0, 1.0, 1.0));
    }
}
