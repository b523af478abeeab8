//! Streaming sponge engine: absorb, pad, squeeze.
//!
//! [`Hasher`] keeps the two pieces of state the padding rule depends on
//! explicit: the `pending` bytes not yet absorbed (always fewer than one
//! rate block between calls) and the count of bytes already `absorbed`
//! into the permutation.

use core::marker::PhantomData;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::keccak::{self, LANES, STATE_BYTES};
use crate::params::{ByteArray, Variant};
use crate::types::Digest;

/// Last bit of the `pad10*1` rule, set in the final byte of the last block.
const PAD_LAST: u8 = 0x80;

#[inline]
fn absorb_block(state: &mut [u64; LANES], block: &[u8]) {
    debug_assert!(block.len().is_multiple_of(8));
    for (b, s) in block.chunks_exact(8).zip(state.iter_mut()) {
        *s ^= u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]);
    }
    keccak::f1600(state);
}

#[inline]
fn squeeze(state: &[u64; LANES], out: &mut [u8]) {
    let mut written = 0;
    for &word in state {
        if written >= out.len() {
            break;
        }
        let bytes = word.to_le_bytes();
        let remaining = out.len() - written;
        let n = remaining.min(8);
        out[written..written + n].copy_from_slice(&bytes[..n]);
        written += n;
    }
}

/// Incremental hasher for the variant `V`.
///
/// Created empty, fed with any number of [`update`](Self::update) calls and
/// consumed by [`finalize`](Self::finalize). State and buffered input are
/// wiped on drop.
pub struct Hasher<V: Variant> {
    state: [u64; LANES],
    buffer: [u8; STATE_BYTES],
    pending: usize,
    absorbed: u64,
    _variant: PhantomData<V>,
}

impl<V: Variant> Hasher<V> {
    const RATE: usize = V::PARAMS.rate_bytes;

    /// Fresh hasher with an all-zero state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: [0u64; LANES],
            buffer: [0u8; STATE_BYTES],
            pending: 0,
            absorbed: 0,
            _variant: PhantomData,
        }
    }

    /// One-shot hash of `data`.
    #[must_use]
    pub fn digest(data: impl AsRef<[u8]>) -> Digest<V> {
        Self::new().chain(data).finalize()
    }

    /// Absorb `data`. Full rate blocks go straight into the permutation;
    /// the tail waits in the pending buffer.
    pub fn update(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        let rate = Self::RATE;
        let mut input = data;

        if self.pending > 0 {
            let take = (rate - self.pending).min(input.len());
            self.buffer[self.pending..self.pending + take].copy_from_slice(&input[..take]);
            self.pending += take;
            input = &input[take..];

            if self.pending < rate {
                return;
            }
            absorb_block(&mut self.state, &self.buffer[..rate]);
            self.pending = 0;
            self.absorbed += rate as u64;
        }

        let mut blocks = input.chunks_exact(rate);
        for block in &mut blocks {
            absorb_block(&mut self.state, block);
            self.absorbed += rate as u64;
        }

        let tail = blocks.remainder();
        self.buffer[..tail.len()].copy_from_slice(tail);
        self.pending = tail.len();
    }

    /// Builder form of [`update`](Self::update).
    #[must_use]
    pub fn chain(mut self, data: impl AsRef<[u8]>) -> Self {
        self.update(data.as_ref());
        self
    }

    /// Pad the pending bytes to a full block, absorb it and squeeze the
    /// digest.
    #[must_use]
    pub fn finalize(mut self) -> Digest<V> {
        let rate = Self::RATE;
        let pending = self.pending;
        let q = rate - pending % rate;

        self.buffer[pending..pending + q].fill(0);
        // Both land on the same byte when q == 1.
        self.buffer[pending] |= V::PARAMS.domain_separator;
        self.buffer[pending + q - 1] |= PAD_LAST;

        absorb_block(&mut self.state, &self.buffer[..rate]);
        self.absorbed += rate as u64;
        self.pending = 0;

        let mut out = V::DigestArray::zeroed();
        squeeze(&self.state, out.as_mut());
        Digest::from_array(out)
    }

    /// Bytes already XORed into the permutation state. Always a multiple of
    /// the rate.
    #[inline]
    pub fn absorbed_bytes(&self) -> u64 {
        self.absorbed
    }

    /// Bytes buffered and waiting for a full block.
    #[inline]
    pub fn pending_bytes(&self) -> usize {
        self.pending
    }
}

impl<V: Variant> Default for Hasher<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Variant> Clone for Hasher<V> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            buffer: self.buffer,
            pending: self.pending,
            absorbed: self.absorbed,
            _variant: PhantomData,
        }
    }
}

impl<V: Variant> Drop for Hasher<V> {
    fn drop(&mut self) {
        self.state.zeroize();
        self.buffer.zeroize();
        self.pending.zeroize();
    }
}

impl<V: Variant> ZeroizeOnDrop for Hasher<V> {}

impl<V: Variant> core::fmt::Debug for Hasher<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hasher")
            .field("variant", &V::NAME)
            .field("absorbed", &self.absorbed)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<V: Variant> std::io::Write for Hasher<V> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// One-shot hash of `data` with the variant `V`.
#[inline]
#[must_use]
pub fn hash<V: Variant>(data: impl AsRef<[u8]>) -> Digest<V> {
    Hasher::<V>::digest(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Keccak256, Keccak512, Sha3_224, Sha3_256, Sha3_512};

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(7)).collect()
    }

    #[test]
    fn known_empty_vectors() {
        assert_eq!(
            hash::<Sha3_256>(b"").to_hex(),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
        assert_eq!(
            hash::<Keccak256>(b"").to_hex(),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn counters_track_blocks_and_tail() {
        let rate = Sha3_256::PARAMS.rate_bytes;
        let mut h = Hasher::<Sha3_256>::new();
        assert_eq!((h.absorbed_bytes(), h.pending_bytes()), (0, 0));

        h.update(&pattern(rate - 1));
        assert_eq!((h.absorbed_bytes(), h.pending_bytes()), (0, rate - 1));

        h.update(&[0xAA]);
        assert_eq!((h.absorbed_bytes(), h.pending_bytes()), (rate as u64, 0));

        h.update(&pattern(2 * rate + 5));
        assert_eq!((h.absorbed_bytes(), h.pending_bytes()), (3 * rate as u64, 5));

        h.update(&[]);
        assert_eq!((h.absorbed_bytes(), h.pending_bytes()), (3 * rate as u64, 5));
    }

    #[test]
    fn chunking_invariance_at_every_split() {
        let data = pattern(3 * 72 + 11);
        let whole = hash::<Sha3_512>(&data);
        for split in 0..=data.len() {
            let mut h = Hasher::<Sha3_512>::new();
            h.update(&data[..split]);
            h.update(&data[split..]);
            assert_eq!(h.finalize(), whole, "split at {split}");
        }
    }

    #[test]
    fn byte_at_a_time_matches_one_shot() {
        let data = pattern(300);
        let mut h = Hasher::<Keccak512>::new();
        for b in &data {
            h.update(core::slice::from_ref(b));
        }
        assert_eq!(h.finalize(), hash::<Keccak512>(&data));
    }

    #[test]
    fn padding_boundaries_are_distinct() {
        // Pending lengths rate-1 (domain and 0x80 share a byte), 0 and rate.
        let rate = Sha3_224::PARAMS.rate_bytes;
        let digests: Vec<_> = [rate - 2, rate - 1, rate, rate + 1]
            .into_iter()
            .map(|len| hash::<Sha3_224>(pattern(len)))
            .collect();
        for i in 0..digests.len() {
            for j in i + 1..digests.len() {
                assert_ne!(digests[i], digests[j]);
            }
        }
    }

    #[test]
    fn domain_separation() {
        assert_ne!(hash::<Sha3_256>(b"abc").as_bytes(), hash::<Keccak256>(b"abc").as_bytes());
    }

    #[test]
    fn clone_forks_a_prefix() {
        let prefix = Hasher::<Sha3_256>::new().chain(b"common prefix ");
        let a = prefix.clone().chain(b"a").finalize();
        let b = prefix.chain(b"b").finalize();
        assert_eq!(a, hash::<Sha3_256>(b"common prefix a"));
        assert_eq!(b, hash::<Sha3_256>(b"common prefix b"));
    }

    #[test]
    fn io_write_feeds_the_sponge() {
        let data = pattern(1000);
        let mut h = Hasher::<Sha3_256>::default();
        std::io::copy(&mut data.as_slice(), &mut h).unwrap();
        assert_eq!(h.finalize(), hash::<Sha3_256>(&data));
    }

    #[test]
    fn debug_hides_state() {
        let h = Hasher::<Keccak256>::new().chain(b"secret");
        let dbg = format!("{h:?}");
        assert!(dbg.contains("Keccak-256"));
        assert!(dbg.contains("pending: 6"));
    }
}
