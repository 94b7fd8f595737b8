use bytemuck::Pod;

/// Reinterprets the bits of `from` as a value of type `To`.
///
/// No numeric conversion happens, the bit pattern is kept as is.
/// Both types must have the same size, otherwise the function fails to build.
#[inline(always)]
pub fn reinterpret<From: Pod, To: Pod>(from: From) -> To {
    const {
        assert!(
            size_of::<From>() == size_of::<To>(),
            "reinterpret needs types of the same size"
        )
    };
    bytemuck::cast(from)
}

/// Rounded up base-2 logarithm, smallest `i` such that `2^i >= p`.
/// Returns 0 for `p` of 0 and 1.
pub const fn rounded_up_log2(p: usize) -> u32 {
    if p <= 1 {
        0
    } else {
        usize::BITS - (p - 1).leading_zeros()
    }
}
