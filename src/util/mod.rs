mod atomic;
mod bits;
mod float;

pub use atomic::{AtomicF32, AtomicF64, AtomicMaxCell, atomic_max};
pub use bits::{reinterpret, rounded_up_log2};
pub use float::{Float, ScalarKind, SimilarlySizedIndex};
