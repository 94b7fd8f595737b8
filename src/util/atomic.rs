use std::sync::atomic::{
    AtomicI32, AtomicI64, AtomicU32, AtomicU64, AtomicUsize, Ordering::Relaxed,
};

/// Shared slot that can be used as a target of `atomic_max`.
pub trait AtomicMaxCell {
    type Value: Copy + PartialOrd;

    fn load_value(&self) -> Self::Value;

    /// Weak compare and swap, may fail spuriously.
    /// On failure returns the value that was actually found in the cell.
    fn compare_exchange_value(
        &self,
        current: Self::Value,
        new: Self::Value,
    ) -> Result<Self::Value, Self::Value>;
}

/// Makes sure that the cell holds at least `candidate`, without ever decreasing it.
///
/// Lock-free: the compare and swap is retried on a failed (possibly spurious)
/// exchange, but only while the candidate is still larger than the cell.
/// No memory ordering is established with respect to other locations.
///
/// Returns the value observed in the cell before this call took effect.
pub fn atomic_max<C: AtomicMaxCell + ?Sized>(cell: &C, candidate: C::Value) -> C::Value {
    let mut current = cell.load_value();
    while current < candidate {
        match cell.compare_exchange_value(current, candidate) {
            Ok(_) => break,
            Err(actual) => current = actual,
        }
    }
    current
}

macro_rules! impl_integer_cell {
    ($($atomic:ty => $value:ty),* $(,)?) => {
        $(
            impl AtomicMaxCell for $atomic {
                type Value = $value;

                #[inline(always)]
                fn load_value(&self) -> $value {
                    self.load(Relaxed)
                }

                #[inline(always)]
                fn compare_exchange_value(&self, current: $value, new: $value) -> Result<$value, $value> {
                    self.compare_exchange_weak(current, new, Relaxed, Relaxed)
                }
            }
        )*
    };
}

impl_integer_cell! {
    AtomicU32 => u32,
    AtomicU64 => u64,
    AtomicUsize => usize,
    AtomicI32 => i32,
    AtomicI64 => i64,
}

macro_rules! atomic_float {
    ($name:ident, $float:ty, $storage:ty) => {
        /// Atomic wrapper for
        #[doc = concat!("`", stringify!($float), "`")]
        /// values, stored as their bit pattern.
        #[derive(Debug, Default)]
        pub struct $name($storage);

        impl $name {
            pub fn new(value: $float) -> Self {
                Self(<$storage>::new(value.to_bits()))
            }

            pub fn load(&self) -> $float {
                <$float>::from_bits(self.0.load(Relaxed))
            }

            pub fn store(&self, value: $float) {
                self.0.store(value.to_bits(), Relaxed)
            }

            pub fn into_inner(self) -> $float {
                <$float>::from_bits(self.0.into_inner())
            }

            /// Raises the stored value to `candidate` if it is larger, see [`atomic_max`].
            pub fn fetch_max(&self, candidate: $float) -> $float {
                atomic_max(self, candidate)
            }
        }

        impl AtomicMaxCell for $name {
            type Value = $float;

            #[inline(always)]
            fn load_value(&self) -> $float {
                self.load()
            }

            #[inline(always)]
            fn compare_exchange_value(&self, current: $float, new: $float) -> Result<$float, $float> {
                // Comparing bit patterns, so -0.0 and 0.0 are different values here
                self.0
                    .compare_exchange_weak(current.to_bits(), new.to_bits(), Relaxed, Relaxed)
                    .map(<$float>::from_bits)
                    .map_err(<$float>::from_bits)
            }
        }
    };
}

atomic_float!(AtomicF32, f32, AtomicU32);
atomic_float!(AtomicF64, f64, AtomicU64);
