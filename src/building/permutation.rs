use thiserror::Error;

use super::{AllocationError, allocate_filled, try_with_capacity};

#[derive(Debug, Error)]
pub enum PermutationError {
    #[error("Permutation has {permutation_len} entries, but there are {primitive_count} primitives")]
    LengthMismatch {
        permutation_len: usize,
        primitive_count: usize,
    },

    #[error("Permutation entry {position} is {index}, out of range for {len} elements")]
    IndexOutOfRange {
        position: usize,
        index: usize,
        len: usize,
    },

    #[error("Index {index} appears in the permutation more than once (again at position {position})")]
    DuplicateIndex { position: usize, index: usize },

    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

/// Reorders primitives so that the primitive at index `i` is the one previously at `indices[i]`.
///
/// The permutation is validated first, an invalid one leaves `primitives` untouched.
/// All primitives are moved into a scratch buffer and then moved back in the new order,
/// so `P` doesn't need to be `Clone` or `Default`.
pub fn shuffle_primitives<P>(primitives: &mut Vec<P>, indices: &[usize]) -> Result<(), PermutationError> {
    if indices.len() != primitives.len() {
        return Err(PermutationError::LengthMismatch {
            permutation_len: indices.len(),
            primitive_count: primitives.len(),
        });
    }
    validate(indices)?;
    move_by_indices(primitives, indices)?;
    Ok(())
}

/// Checks that `indices` is a bijection on `0..indices.len()`.
fn validate(indices: &[usize]) -> Result<(), PermutationError> {
    let len = indices.len();
    let mut seen = allocate_filled(len, false)?;
    for (position, &index) in indices.iter().enumerate() {
        let slot = seen
            .get_mut(index)
            .ok_or(PermutationError::IndexOutOfRange {
                position,
                index,
                len,
            })?;
        if std::mem::replace(slot, true) {
            return Err(PermutationError::DuplicateIndex { position, index });
        }
    }
    Ok(())
}

/// Applies an already validated permutation.
fn move_by_indices<P>(primitives: &mut Vec<P>, indices: &[usize]) -> Result<(), AllocationError> {
    log::debug!("Shuffling {} primitives", primitives.len());

    // Each slot is emptied when its primitive moves back
    let mut scratch = try_with_capacity(primitives.len())?;
    scratch.extend(primitives.drain(..).map(Some));

    // Draining kept the capacity, this doesn't reallocate
    primitives.extend(indices.iter().map(|&source| {
        scratch[source]
            .take()
            .unwrap_or_else(|| unreachable!("Validated permutation moves every primitive once"))
    }));

    Ok(())
}

/// A validated permutation, `as_slice()[i]` is the index of the element that ends up at position `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn new(indices: Vec<usize>) -> Result<Permutation, PermutationError> {
        validate(&indices)?;
        Ok(Permutation(indices))
    }

    pub fn identity(len: usize) -> Permutation {
        Permutation((0..len).collect())
    }

    /// Permutation that sorts `items` by the key, stable.
    /// The key is only evaluated once per item.
    pub fn sorted_by_key<T, K: Ord>(items: &[T], mut key: impl FnMut(&T) -> K) -> Permutation {
        let mut indices: Vec<usize> = (0..items.len()).collect();
        indices.sort_by_cached_key(|&i| key(&items[i]));
        Permutation(indices)
    }

    /// Permutation that undoes this one.
    pub fn inverse(&self) -> Result<Permutation, AllocationError> {
        let mut inverse = allocate_filled(self.0.len(), 0)?;
        for (position, &index) in self.0.iter().enumerate() {
            inverse[index] = position;
        }
        Ok(Permutation(inverse))
    }

    /// Reorders primitives, see [`shuffle_primitives`].
    pub fn apply<P>(&self, primitives: &mut Vec<P>) -> Result<(), PermutationError> {
        if self.0.len() != primitives.len() {
            return Err(PermutationError::LengthMismatch {
                permutation_len: self.0.len(),
                primitive_count: primitives.len(),
            });
        }
        move_by_indices(primitives, &self.0)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}
