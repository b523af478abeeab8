//! EME-OAEP (RFC 8017 §7.1) over the crate's sponge hashes.
//!
//! | RFC 8017 name       | Function |
//! |---------------------|----------|
//! | I2OSP (§4.1)        | [`i2osp`], [`i2osp_into`] |
//! | MGF1 (§B.2.1)       | [`mgf1`], [`mgf1_xor`] |
//! | EME-OAEP encoding   | [`encode`] |
//! | EME-OAEP decoding   | [`decode`] |
//!
//! ```text
//!                     +----------+------+--+-------+
//!                DB = |  lHash   |  PS  |01|   M   |
//!                     +----------+------+--+-------+
//!        seed ---> MGF ---> xor DB ---> maskedDB ---> MGF ---> xor seed
//!
//!   EM = 00 || maskedSeed || maskedDB        (|EM| = k)
//! ```
//!
//! The random seed comes from an injected [`TryCryptoRng`]; the block size
//! `k` either comes from a [`RawTransform`] or is given explicitly.

use core::marker::PhantomData;

use rand_core::{TryCryptoRng, TryRngCore};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::params::{
    Keccak224, Keccak256, Keccak384, Keccak512, Sha3_224, Sha3_256, Sha3_384, Sha3_512, Variant,
};
use crate::sponge::Hasher;
use crate::{Error, Result, ct};

/// Width of the MGF1 block counter, in bytes.
const COUNTER_BYTES: usize = 4;

/// Hash function usable as OAEP `Hash` or as the MGF1 hash.
///
/// Implemented for every sponge variant. Implement it for any other
/// fixed-output hash to use that hash in OAEP.
pub trait HashFunction {
    /// Digest length in bytes (`hLen`).
    const OUTPUT_BYTES: usize;

    /// Writes the hash of the concatenation of `parts` into `out`, which is
    /// exactly [`OUTPUT_BYTES`](Self::OUTPUT_BYTES) long.
    fn hash_parts(parts: &[&[u8]], out: &mut [u8]);
}

fn sponge_hash_parts<V: Variant>(parts: &[&[u8]], out: &mut [u8]) {
    let mut hasher = Hasher::<V>::new();
    for part in parts {
        hasher.update(part);
    }
    out.copy_from_slice(hasher.finalize().as_ref());
}

macro_rules! impl_hash_function {
    ($($t:ty),* $(,)?) => {
        $(
            impl HashFunction for $t {
                const OUTPUT_BYTES: usize = <$t as Variant>::DIGEST_BYTES;

                #[inline]
                fn hash_parts(parts: &[&[u8]], out: &mut [u8]) {
                    sponge_hash_parts::<$t>(parts, out);
                }
            }
        )*
    };
}

impl_hash_function!(
    Sha3_224, Sha3_256, Sha3_384, Sha3_512, Keccak224, Keccak256, Keccak384, Keccak512,
);

/// Raw asymmetric block transform with no padding of its own, e.g. textbook
/// RSA under one key.
pub trait RawTransform {
    /// Native block size `k` in bytes.
    fn block_size(&self) -> usize;

    /// Transform exactly one `block_size()`-byte block.
    fn transform(&self, block: &[u8]) -> Result<Vec<u8>>;
}

impl<T: RawTransform + ?Sized> RawTransform for &T {
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn transform(&self, block: &[u8]) -> Result<Vec<u8>> {
        (**self).transform(block)
    }
}

/// I2OSP: write `x` big-endian into all of `out`.
///
/// Fails with [`Error::IntegerTooLarge`] if `x >= 256^out.len()`.
pub fn i2osp_into(x: u64, out: &mut [u8]) -> Result<()> {
    let x_len = out.len();
    if x_len < 8 && x >> (8 * x_len) != 0 {
        return Err(Error::IntegerTooLarge { value: x, len: x_len });
    }

    out.fill(0);
    let be = x.to_be_bytes();
    let n = x_len.min(be.len());
    out[x_len - n..].copy_from_slice(&be[be.len() - n..]);
    Ok(())
}

/// I2OSP: encode `x` as exactly `x_len` big-endian bytes.
pub fn i2osp(x: u64, x_len: usize) -> Result<Vec<u8>> {
    let mut out = vec![0u8; x_len];
    i2osp_into(x, &mut out)?;
    Ok(out)
}

fn check_mask_len<H: HashFunction>(len: usize) -> Result<()> {
    let max = (H::OUTPUT_BYTES as u64) << 32;
    if len as u64 > max {
        return Err(Error::MaskTooLong {
            requested: len as u64,
            max,
        });
    }
    Ok(())
}

/// XOR `MGF1(seed, out.len())` into `out` in place.
pub fn mgf1_xor<H: HashFunction>(seed: &[u8], out: &mut [u8]) -> Result<()> {
    check_mask_len::<H>(out.len())?;
    debug_assert!(H::OUTPUT_BYTES > 0);

    let mut block = Zeroizing::new(vec![0u8; H::OUTPUT_BYTES]);
    let mut counter = [0u8; COUNTER_BYTES];

    for (i, chunk) in out.chunks_mut(H::OUTPUT_BYTES).enumerate() {
        i2osp_into(i as u64, &mut counter)?;
        H::hash_parts(&[seed, &counter[..]], &mut block);
        for (o, m) in chunk.iter_mut().zip(block.iter()) {
            *o ^= m;
        }
    }
    Ok(())
}

/// MGF1: the first `len` bytes of `H(seed || C0) || H(seed || C1) || ...`.
///
/// Fails with [`Error::MaskTooLong`] if `len > hLen * 2^32`.
pub fn mgf1<H: HashFunction>(seed: &[u8], len: usize) -> Result<Zeroizing<Vec<u8>>> {
    check_mask_len::<H>(len)?;
    let mut mask = Zeroizing::new(vec![0u8; len]);
    mgf1_xor::<H>(seed, &mut mask)?;
    Ok(mask)
}

/// Longest message OAEP can carry in a `k`-byte block with hash `H`, or
/// `None` if `k < 2*hLen + 2`.
#[must_use]
pub const fn max_message_len<H: HashFunction>(k: usize) -> Option<usize> {
    k.checked_sub(2 * H::OUTPUT_BYTES + 2)
}

/// EME-OAEP-ENCODE: pad `msg` into a `k`-byte encoded message.
///
/// `H` hashes the label, `MH` drives MGF1. The seed is drawn from `rng`.
pub fn encode<H, MH, R>(msg: &[u8], k: usize, label: &[u8], rng: &mut R) -> Result<Vec<u8>>
where
    H: HashFunction,
    MH: HashFunction,
    R: TryCryptoRng + ?Sized, {
    let h_len = H::OUTPUT_BYTES;
    trace!(k, h_len, msg_len = msg.len(), "eme-oaep encode");

    let max = max_message_len::<H>(k).unwrap_or(0);
    if k < 2 * h_len + 2 || msg.len() > max {
        debug!(k, max, actual = msg.len(), "message too large for oaep block");
        return Err(Error::MessageTooLarge {
            max,
            actual: msg.len(),
        });
    }

    let db_len = k - h_len - 1;
    let mut em = Zeroizing::new(vec![0u8; k]);
    let (seed, db) = em[1..].split_at_mut(h_len);
    debug_assert_eq!(db.len(), db_len);

    // DB = lHash || PS || 0x01 || M, PS already zero.
    H::hash_parts(&[label], &mut db[..h_len]);
    let separator = db_len - msg.len() - 1;
    db[separator] = 0x01;
    db[separator + 1..].copy_from_slice(msg);

    TryRngCore::try_fill_bytes(rng, seed).map_err(|_| {
        debug!(h_len, "random source failed to supply oaep seed");
        Error::RandomGenerationFailure
    })?;

    mgf1_xor::<MH>(seed, db)?;
    mgf1_xor::<MH>(db, seed)?;

    Ok(core::mem::take(&mut *em))
}

/// EME-OAEP-DECODE: recover the message from a `k`-byte encoded message.
///
/// The leading zero byte, `lHash` and the `0x01` separator are checked
/// together without secret-dependent branches; every failure is the same
/// [`Error::Decoding`].
pub fn decode<H, MH>(em: &[u8], k: usize, label: &[u8]) -> Result<Zeroizing<Vec<u8>>>
where
    H: HashFunction,
    MH: HashFunction, {
    let h_len = H::OUTPUT_BYTES;
    trace!(k, h_len, em_len = em.len(), "eme-oaep decode");

    if k < 2 * h_len + 2 || em.len() != k {
        debug!(k, em_len = em.len(), "oaep block has wrong size");
        return Err(Error::Decoding);
    }

    let mut buf = Zeroizing::new(em[1..].to_vec());
    let (seed, db) = buf.split_at_mut(h_len);
    mgf1_xor::<MH>(db, seed)?;
    mgf1_xor::<MH>(seed, db)?;

    let mut l_hash = Zeroizing::new(vec![0u8; h_len]);
    H::hash_parts(&[label], &mut l_hash);

    let mut good = ct::ct_eq_u8(em[0], 0);
    good &= 1 ^ ct::ct_verify(&db[..h_len], &l_hash);

    // Scan PS || 0x01 || M for the first non-zero byte, which must be 0x01.
    let mut looking = 1u8;
    let mut invalid = 0u8;
    let mut index = 0usize;
    for (i, &b) in db[h_len..].iter().enumerate() {
        let is_zero = ct::ct_eq_u8(b, 0);
        let is_one = ct::ct_eq_u8(b, 1);
        index = ct::ct_select_usize(looking & is_one, i, index);
        invalid |= looking & (1 ^ is_zero) & (1 ^ is_one);
        looking &= is_zero;
    }
    good &= 1 ^ looking;
    good &= 1 ^ invalid;

    if core::hint::black_box(good) != 1 {
        debug!(k, "oaep decode rejected");
        return Err(Error::Decoding);
    }

    Ok(Zeroizing::new(db[h_len + index + 1..].to_vec()))
}

/// OAEP codec with its hash pair and label fixed.
///
/// `H` hashes the label; `MH` drives MGF1 and defaults to `H`.
///
/// ```
/// use keccak_oaep::{Oaep, Sha3_256};
///
/// let oaep = Oaep::<Sha3_256>::new().with_label(b"context");
/// let mut rng = rand_core::OsRng;
/// let em = oaep.pad_to_block_size(b"hello", 256, &mut rng).unwrap();
/// assert_eq!(em.len(), 256);
/// assert_eq!(&oaep.decode(&em, 256).unwrap()[..], b"hello");
/// ```
pub struct Oaep<H, MH = H> {
    label: Vec<u8>,
    _hash: PhantomData<fn() -> (H, MH)>,
}

impl<H: HashFunction, MH: HashFunction> Oaep<H, MH> {
    /// Codec with the empty label.
    #[must_use]
    pub fn new() -> Self {
        Self {
            label: Vec::new(),
            _hash: PhantomData,
        }
    }

    /// Replace the label `L`.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Vec<u8>>) -> Self {
        self.label = label.into();
        self
    }

    /// Label bound into every encoding.
    pub fn label(&self) -> &[u8] {
        &self.label
    }

    /// See [`max_message_len`].
    #[must_use]
    pub const fn max_message_len(&self, k: usize) -> Option<usize> {
        max_message_len::<H>(k)
    }

    /// See [`encode`].
    pub fn encode<R: TryCryptoRng + ?Sized>(
        &self, msg: &[u8], k: usize, rng: &mut R,
    ) -> Result<Vec<u8>> {
        encode::<H, MH, R>(msg, k, &self.label, rng)
    }

    /// See [`decode`].
    pub fn decode(&self, em: &[u8], k: usize) -> Result<Zeroizing<Vec<u8>>> {
        decode::<H, MH>(em, k, &self.label)
    }

    /// Pad `msg` to the native block size of `transform`.
    pub fn pad_for_transform<T, R>(&self, msg: &[u8], transform: &T, rng: &mut R) -> Result<Vec<u8>>
    where
        T: RawTransform + ?Sized,
        R: TryCryptoRng + ?Sized, {
        self.encode(msg, transform.block_size(), rng)
    }

    /// Pad `msg` to an explicit block size of `bytes`.
    pub fn pad_to_block_size<R: TryCryptoRng + ?Sized>(
        &self, msg: &[u8], bytes: usize, rng: &mut R,
    ) -> Result<Vec<u8>> {
        self.encode(msg, bytes, rng)
    }

    /// Pad `msg` and run it through `transform` (the public operation).
    pub fn seal<T, R>(&self, msg: &[u8], transform: &T, rng: &mut R) -> Result<Vec<u8>>
    where
        T: RawTransform + ?Sized,
        R: TryCryptoRng + ?Sized, {
        let k = transform.block_size();
        let em = Zeroizing::new(self.pad_for_transform(msg, transform, rng)?);
        let out = transform.transform(&em)?;
        if out.len() != k {
            debug!(k, out_len = out.len(), "raw transform returned wrong block size");
            return Err(Error::TransformFailure);
        }
        Ok(out)
    }

    /// Run `block` through `inverse` (the private operation) and decode the
    /// result.
    pub fn open<T>(&self, block: &[u8], inverse: &T) -> Result<Zeroizing<Vec<u8>>>
    where
        T: RawTransform + ?Sized, {
        let k = inverse.block_size();
        if block.len() != k {
            debug!(k, block_len = block.len(), "ciphertext block has wrong size");
            return Err(Error::Decoding);
        }
        let em = Zeroizing::new(inverse.transform(block)?);
        if em.len() != k {
            debug!(k, out_len = em.len(), "raw transform returned wrong block size");
            return Err(Error::TransformFailure);
        }
        self.decode(&em, k)
    }
}

impl<H: HashFunction, MH: HashFunction> Default for Oaep<H, MH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, MH> Clone for Oaep<H, MH> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            _hash: PhantomData,
        }
    }
}

impl<H, MH> core::fmt::Debug for Oaep<H, MH> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Oaep")
            .field("label_len", &self.label.len())
            .finish_non_exhaustive()
    }
}
