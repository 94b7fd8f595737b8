use itertools::izip;
use nalgebra::Point3;

use crate::{geometry::BoundingBox, parallel_for_each::Executor};

use super::{AllocationError, Primitive, allocate_filled};

/// Smallest number of primitives handed to a worker at once.
const MIN_CHUNK_SIZE: usize = 64;

/// How many chunks per worker, so that slower workers don't hold up the rest.
const CHUNKS_PER_WORKER: usize = 4;

/// Per primitive bounding boxes and centers, in the order of the primitives.
pub type BoundsAndCenters<T> = (Vec<BoundingBox<T>>, Vec<Point3<T>>);

/// Computes bounding boxes and centers of all primitives.
///
/// `result.0[i]` is the bounding box and `result.1[i]` the center of `primitives[i]`.
/// Both output vectors are allocated in full before any primitive is touched,
/// the work is then split into contiguous chunks and distributed over the executor.
/// The output doesn't depend on the executor or on the order in which chunks run.
pub fn compute_bounding_boxes_and_centers<P, E>(
    primitives: &[P],
    executor: &E,
) -> Result<BoundsAndCenters<P::Scalar>, AllocationError>
where
    P: Primitive + Sync,
    E: Executor,
{
    let count = primitives.len();
    let mut bboxes = allocate_filled(count, BoundingBox::empty())?;
    let mut centers = allocate_filled(count, Point3::origin())?;

    if count == 0 {
        return Ok((bboxes, centers));
    }

    let chunk_size = chunk_size(count, executor.worker_count());
    log::debug!(
        "Computing bounds of {count} primitives in chunks of {chunk_size} on {} workers",
        executor.worker_count()
    );

    executor.for_each(
        izip!(
            primitives.chunks(chunk_size),
            bboxes.chunks_mut(chunk_size),
            centers.chunks_mut(chunk_size)
        ),
        |(primitives, bboxes, centers)| {
            for (primitive, bbox, center) in izip!(primitives, bboxes, centers) {
                *bbox = primitive.bounding_box();
                *center = primitive.center();
            }
        },
    );

    Ok((bboxes, centers))
}

fn chunk_size(count: usize, worker_count: usize) -> usize {
    count
        .div_ceil(worker_count.max(1) * CHUNKS_PER_WORKER)
        .max(MIN_CHUNK_SIZE)
}
