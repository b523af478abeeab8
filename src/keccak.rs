//! Keccak-f[1600] permutation (FIPS 202 §3.3).
//!
//! The state is 25 little-endian 64-bit lanes, lane `x + 5y` holding
//! `A[x, y]`. Each round applies θ, ρ, π, χ and ι in that order.

/// Number of 64-bit lanes in the permutation state.
pub const LANES: usize = 25;

/// Permutation width in bits.
pub const STATE_BITS: usize = LANES * 64;

/// Permutation width in bytes.
pub const STATE_BYTES: usize = LANES * 8;

/// Rounds of Keccak-f[1600].
pub const ROUNDS: usize = 24;

const ROW: usize = 5;

/// ι round constants, generated by the degree-8 LFSR of FIPS 202 §3.2.5.
pub const ROUND_CONSTANTS: [u64; ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808A,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808B,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008A,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000A,
    0x0000_0000_8000_808B,
    0x8000_0000_0000_008B,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800A,
    0x8000_0000_8000_000A,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// ρ rotation offsets, indexed by lane. Lane 0 is never rotated.
pub const ROTATION_OFFSETS: [u32; LANES] = [
    0, 1, 62, 28, 27, //
    36, 44, 6, 55, 20, //
    3, 10, 43, 25, 39, //
    41, 45, 15, 21, 8, //
    18, 2, 61, 56, 14,
];

/// π as a single 24-cycle over lanes `1..25`: each listed lane takes the
/// value of the lane after it, the last takes the value of the first.
const PI_CYCLE: [usize; LANES - 1] = [
    1, 6, 9, 22, 14, 20, 2, 12, 13, 19, 23, 15, 4, 24, 21, 8, 16, 5, 3, 18, 17, 11, 7, 10,
];

#[inline(always)]
fn theta(a: &mut [u64; LANES]) {
    let mut c = [0u64; ROW];
    for (x, parity) in c.iter_mut().enumerate() {
        *parity = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
    }

    for x in 0..ROW {
        let d = c[(x + 1) % ROW].rotate_left(1) ^ c[(x + ROW - 1) % ROW];
        for y in 0..ROW {
            a[x + ROW * y] ^= d;
        }
    }
}

#[inline(always)]
fn rho(a: &mut [u64; LANES]) {
    for (lane, &offset) in a.iter_mut().zip(ROTATION_OFFSETS.iter()).skip(1) {
        *lane = lane.rotate_left(offset);
    }
}

#[inline(always)]
fn pi(a: &mut [u64; LANES]) {
    let first = a[PI_CYCLE[0]];
    for pair in PI_CYCLE.windows(2) {
        a[pair[0]] = a[pair[1]];
    }
    a[PI_CYCLE[LANES - 2]] = first;
}

#[inline(always)]
fn chi(a: &mut [u64; LANES]) {
    for row in a.chunks_exact_mut(ROW) {
        let r = [row[0], row[1], row[2], row[3], row[4]];
        for x in 0..ROW {
            row[x] = r[x] ^ (!r[(x + 1) % ROW] & r[(x + 2) % ROW]);
        }
    }
}

#[inline(always)]
fn iota(a: &mut [u64; LANES], round: usize) {
    a[0] ^= ROUND_CONSTANTS[round];
}

/// Apply the full 24-round Keccak-f[1600] permutation in place.
pub fn f1600(state: &mut [u64; LANES]) {
    for round in 0..ROUNDS {
        theta(state);
        rho(state);
        pi(state);
        chi(state);
        iota(state, round);
    }
}
