//! Constant-time comparison and selection. No secret-dependent branching.
//!
//! Every "boolean" here is a `u8` that is exactly 0 or 1.

/// Constant-time byte-slice comparison. Returns 0 if a == b, 1 otherwise. Same length required.
#[inline]
pub fn ct_verify(a: &[u8], b: &[u8]) -> u8 {
    assert_eq!(a.len(), b.len(), "ct_verify: length mismatch");

    let mut diff: u64 = 0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        diff |= (x ^ y) as u64;
    }
    // Fence: prevent the optimiser from short-circuiting the loop.
    let diff = core::hint::black_box(diff);
    // Map 0 -> 0, nonzero -> 1 without branching.
    (diff.wrapping_neg() >> 63) as u8
}

/// Returns 1 if `a == b`, 0 otherwise.
#[inline]
pub fn ct_eq_u8(a: u8, b: u8) -> u8 {
    let diff = core::hint::black_box((a ^ b) as u64);
    1 ^ (diff.wrapping_neg() >> 63) as u8
}

/// Returns `a` if `condition` is 1, `b` if it is 0.
#[inline]
pub fn ct_select_usize(condition: u8, a: usize, b: usize) -> usize {
    debug_assert!(condition <= 1, "ct_select_usize: condition must be 0 or 1");

    let mask = (core::hint::black_box(condition) as usize).wrapping_neg();
    (a & mask) | (b & !mask)
}
