use std::fmt::Debug;

use bytemuck::Pod;
use nalgebra::{ClosedAddAssign, ClosedDivAssign, ClosedMulAssign, ClosedSubAssign, Scalar};
use num_traits::{PrimInt, Unsigned};

use super::bits::reinterpret;

/// Whether `mul_add` maps to a single hardware instruction on the target.
/// Without it the fused operation is emulated in software, which is much slower
/// than the plain multiply and add.
const FAST_FMA: bool = cfg!(any(target_feature = "fma", target_arch = "aarch64"));

/// The closed set of floating point types the BVH building code works with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Single,
    Double,
}

impl ScalarKind {
    /// Bit width of the float, which is also the width of its index type.
    pub const fn bits(self) -> u32 {
        match self {
            ScalarKind::Single => 32,
            ScalarKind::Double => 64,
        }
    }
}

/// Floating point scalar usable for bounding boxes and centers.
pub trait Float:
    num_traits::Float
    + Scalar
    + ClosedAddAssign
    + ClosedSubAssign
    + ClosedMulAssign
    + ClosedDivAssign
    + Pod
    + Default
    + Send
    + Sync
{
    const KIND: ScalarKind;

    /// True if `multiply_add` is fused (single rounding) on this target.
    const HAS_FAST_FMA: bool = FAST_FMA;

    /// Unsigned integer with the same bit width, for bit level manipulation
    /// (sign tricks, Morton codes).
    type Index: PrimInt + Unsigned + Pod + Debug + Send + Sync;

    const SIGN_MASK: Self::Index;

    /// Equivalent to `copysign(x, x * y)` for finite values, without doing the multiplication.
    ///
    /// The result has the bits of `self` with the sign bit of `y` xored in.
    /// NaN and infinity inputs go through the same bit formula, so
    /// `product_sign(1.0, NaN)` may come out negative depending on the NaN sign bit.
    #[inline(always)]
    fn product_sign(self, y: Self) -> Self {
        let x_bits: Self::Index = reinterpret(self);
        let y_bits: Self::Index = reinterpret(y);
        reinterpret(x_bits ^ (y_bits & Self::SIGN_MASK))
    }

    /// Computes `self * y + z`, with a single rounding if the target supports fast FMA.
    #[inline(always)]
    fn multiply_add(self, y: Self, z: Self) -> Self {
        if Self::HAS_FAST_FMA {
            num_traits::Float::mul_add(self, y, z)
        } else {
            self * y + z
        }
    }
}

impl Float for f32 {
    const KIND: ScalarKind = ScalarKind::Single;
    type Index = u32;
    const SIGN_MASK: u32 = 0x8000_0000;
}

impl Float for f64 {
    const KIND: ScalarKind = ScalarKind::Double;
    type Index = u64;
    const SIGN_MASK: u64 = 0x8000_0000_0000_0000;
}

/// Unsigned integer type of the same size as the float `T`.
pub type SimilarlySizedIndex<T> = <T as Float>::Index;
