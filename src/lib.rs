//! `keccak-oaep` -- a from-scratch Keccak sponge and RFC 8017 OAEP padding.
//!
//! Implements Keccak-f[1600] and the eight fixed-output hashes built on it:
//! SHA3-224/256/384/512 (FIPS 202) and the pre-standard Keccak-224/256/384/512.
//! All eight share one streaming engine, [`Hasher`], parameterised by a
//! [`Variant`] marker type.
//!
//! On top of the hash engine sits an EME-OAEP codec ([`oaep`]) that pads a
//! message to the block size `k` of a raw, unpadded asymmetric transform.
//! Randomness and the transform itself are injected: any
//! [`rand_core::TryCryptoRng`] and any [`RawTransform`].
//!
//! ```
//! use keccak_oaep::{Hasher, Sha3_256};
//!
//! let mut hasher = Hasher::<Sha3_256>::new();
//! hasher.update(b"ab");
//! hasher.update(b"c");
//! assert_eq!(
//!     hasher.finalize().to_hex(),
//!     "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532",
//! );
//! ```

#![deny(unsafe_code)]

mod ct;
pub mod keccak;
pub mod oaep;
pub mod params;
pub mod sponge;
pub mod types;

pub use oaep::{HashFunction, Oaep, RawTransform};
pub use params::{
    Algorithm, Keccak224, Keccak256, Keccak384, Keccak512, Sha3_224, Sha3_256, Sha3_384,
    Sha3_512, SpongeParams, Variant,
};
pub use sponge::{Hasher, hash};
pub use types::Digest;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors returned by the OAEP codec and by digest reconstruction.
///
/// Hashing itself never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// I2OSP input does not fit in the requested number of octets.
    #[error("integer too large: {value} does not fit in {len} bytes")]
    IntegerTooLarge {
        /// Integer that was being encoded.
        value: u64,
        /// Requested output width in bytes.
        len: usize,
    },
    /// MGF1 output length exceeds `hLen * 2^32`.
    #[error("mask too long: requested {requested} bytes, max {max}")]
    MaskTooLong {
        /// Requested mask length in bytes.
        requested: u64,
        /// Largest mask MGF1 can produce with this hash.
        max: u64,
    },
    /// OAEP message longer than `k - 2*hLen - 2`.
    #[error("message too large: max {max} bytes, got {actual}")]
    MessageTooLarge {
        /// Largest message accepted for this block size and hash.
        max: usize,
        /// Length of the message supplied.
        actual: usize,
    },
    /// The random source could not supply the OAEP seed.
    #[error("random generation failure")]
    RandomGenerationFailure,
    /// OAEP decoding failed. Carries no detail about which check failed.
    #[error("decoding error")]
    Decoding,
    /// The raw transform failed or returned a block of the wrong size.
    #[error("raw transform failure")]
    TransformFailure,
    /// Byte slice has the wrong length for the target type.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },
    /// Text is not valid hexadecimal.
    #[error("invalid hex string")]
    InvalidHex,
    /// Algorithm name not in the variant registry.
    #[error("unknown algorithm")]
    UnknownAlgorithm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_lengths() {
        let msg = Error::MessageTooLarge { max: 62, actual: 63 }.to_string();
        assert!(msg.contains("62"));
        assert!(msg.contains("63"));
    }

    #[test]
    fn decoding_error_is_opaque() {
        assert_eq!(Error::Decoding.to_string(), "decoding error");
    }
}
