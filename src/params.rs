//! Variant registry. The [`Variant`] trait, the eight marker types and the
//! runtime [`Algorithm`] selector.
//!
//! Every variant is fully described by its [`SpongeParams`]: the rate, the
//! digest length and the domain-separation byte. The engine in
//! [`crate::sponge`] is generic over these and nothing else.

use core::str::FromStr;

use crate::keccak::{STATE_BITS, STATE_BYTES};
use crate::sponge::hash;
use crate::{Error, Result};

/// Domain-separation byte of the FIPS 202 SHA3 functions (`01` suffix + pad bit).
pub const SHA3_DOMAIN: u8 = 0x06;

/// Domain-separation byte of the original Keccak submission (pad bit only).
pub const KECCAK_DOMAIN: u8 = 0x01;

/// Fixed-size byte buffer backing a digest.
pub trait ByteArray:
    AsRef<[u8]>
    + AsMut<[u8]>
    + Copy
    + Eq
    + core::hash::Hash
    + core::fmt::Debug
    + Send
    + Sync
    + 'static {
    /// Array length in bytes.
    const LEN: usize;

    /// Return a zero-filled instance.
    fn zeroed() -> Self;
}

impl<const SIZE: usize> ByteArray for [u8; SIZE] {
    const LEN: usize = SIZE;

    #[inline]
    fn zeroed() -> Self {
        [0u8; SIZE]
    }
}

/// Sponge configuration of one fixed-output variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpongeParams {
    /// Bytes absorbed per permutation call.
    pub rate_bytes: usize,
    /// Output length in bytes.
    pub digest_bytes: usize,
    /// Byte ORed in right after the message during padding.
    pub domain_separator: u8,
}

impl SpongeParams {
    /// Hidden part of the state, in bits.
    #[inline]
    pub const fn capacity_bits(self) -> usize {
        STATE_BITS - self.rate_bytes * 8
    }

    /// Rate in 64-bit lanes.
    #[inline]
    pub const fn rate_lanes(self) -> usize {
        self.rate_bytes / 8
    }
}

/// A fixed-output Keccak variant, implemented by the eight marker types.
pub trait Variant:
    Copy + Default + core::fmt::Debug + Send + Sync + 'static {
    /// Canonical display name, e.g. `"SHA3-256"`.
    const NAME: &'static str;
    /// Runtime tag of this variant.
    const ALGORITHM: Algorithm;
    /// Sponge configuration.
    const PARAMS: SpongeParams;
    /// Output length in bytes.
    const DIGEST_BYTES: usize = Self::PARAMS.digest_bytes;

    /// Backing array for digests of this variant.
    type DigestArray: ByteArray;
}

macro_rules! variant {
    ($(#[$meta:meta])* $ty:ident, $name:literal, rate = $rate:literal, digest = $digest:literal, domain = $domain:expr) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $ty;

        impl Variant for $ty {
            const NAME: &'static str = $name;
            const ALGORITHM: Algorithm = Algorithm::$ty;
            const PARAMS: SpongeParams = SpongeParams {
                rate_bytes: $rate,
                digest_bytes: $digest,
                domain_separator: $domain,
            };

            type DigestArray = [u8; $digest];
        }
    };
}

variant!(
    /// SHA3-224 (FIPS 202).
    Sha3_224, "SHA3-224", rate = 144, digest = 28, domain = SHA3_DOMAIN
);
variant!(
    /// SHA3-256 (FIPS 202).
    Sha3_256, "SHA3-256", rate = 136, digest = 32, domain = SHA3_DOMAIN
);
variant!(
    /// SHA3-384 (FIPS 202).
    Sha3_384, "SHA3-384", rate = 104, digest = 48, domain = SHA3_DOMAIN
);
variant!(
    /// SHA3-512 (FIPS 202).
    Sha3_512, "SHA3-512", rate = 72, digest = 64, domain = SHA3_DOMAIN
);
variant!(
    /// Keccak-224, original submission padding.
    Keccak224, "Keccak-224", rate = 144, digest = 28, domain = KECCAK_DOMAIN
);
variant!(
    /// Keccak-256, original submission padding (the Ethereum hash).
    Keccak256, "Keccak-256", rate = 136, digest = 32, domain = KECCAK_DOMAIN
);
variant!(
    /// Keccak-384, original submission padding.
    Keccak384, "Keccak-384", rate = 104, digest = 48, domain = KECCAK_DOMAIN
);
variant!(
    /// Keccak-512, original submission padding.
    Keccak512, "Keccak-512", rate = 72, digest = 64, domain = KECCAK_DOMAIN
);

/// Runtime selector over the registry, for callers that pick the hash from
/// configuration rather than at compile time.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Keccak224,
    Keccak256,
    Keccak384,
    Keccak512,
}

macro_rules! dispatch {
    ($alg:expr, $v:ident => $body:expr) => {
        match $alg {
            Algorithm::Sha3_224 => { type $v = Sha3_224; $body }
            Algorithm::Sha3_256 => { type $v = Sha3_256; $body }
            Algorithm::Sha3_384 => { type $v = Sha3_384; $body }
            Algorithm::Sha3_512 => { type $v = Sha3_512; $body }
            Algorithm::Keccak224 => { type $v = Keccak224; $body }
            Algorithm::Keccak256 => { type $v = Keccak256; $body }
            Algorithm::Keccak384 => { type $v = Keccak384; $body }
            Algorithm::Keccak512 => { type $v = Keccak512; $body }
        }
    };
}

impl Algorithm {
    /// Every registered variant, SHA3 first.
    pub const ALL: [Self; 8] = [
        Self::Sha3_224,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::Keccak224,
        Self::Keccak256,
        Self::Keccak384,
        Self::Keccak512,
    ];

    /// Sponge configuration of this variant.
    #[must_use]
    pub const fn params(self) -> SpongeParams {
        dispatch!(self, V => V::PARAMS)
    }

    /// Canonical name, e.g. `"Keccak-256"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        dispatch!(self, V => V::NAME)
    }

    /// Output length in bytes.
    #[must_use]
    pub const fn digest_bytes(self) -> usize {
        self.params().digest_bytes
    }

    /// One-shot hash of `data` with this variant.
    #[must_use]
    pub fn hash(self, data: &[u8]) -> Vec<u8> {
        dispatch!(self, V => hash::<V>(data).as_ref().to_vec())
    }
}

impl core::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Parses a canonical name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(s))
            .ok_or(Error::UnknownAlgorithm)
    }
}

const _: () = {
    macro_rules! check_params {
        ($t:ty) => {
            assert!(<$t>::PARAMS.rate_bytes * 8 + <$t>::PARAMS.capacity_bits() == STATE_BITS);
            assert!(<$t>::PARAMS.rate_bytes % 8 == 0);
            assert!(<$t>::PARAMS.rate_bytes < STATE_BYTES);
            assert!(<$t>::PARAMS.digest_bytes <= <$t>::PARAMS.rate_bytes);
            assert!(<<$t as Variant>::DigestArray as ByteArray>::LEN == <$t>::DIGEST_BYTES);
            // Fixed-output variants use capacity = 2 * output length.
            assert!(<$t>::PARAMS.capacity_bits() == 16 * <$t>::DIGEST_BYTES);
        };
    }
    check_params!(Sha3_224);
    check_params!(Sha3_256);
    check_params!(Sha3_384);
    check_params!(Sha3_512);
    check_params!(Keccak224);
    check_params!(Keccak256);
    check_params!(Keccak384);
    check_params!(Keccak512);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_table() {
        let expected = [
            ("SHA3-224", 144, 28, 0x06),
            ("SHA3-256", 136, 32, 0x06),
            ("SHA3-384", 104, 48, 0x06),
            ("SHA3-512", 72, 64, 0x06),
            ("Keccak-224", 144, 28, 0x01),
            ("Keccak-256", 136, 32, 0x01),
            ("Keccak-384", 104, 48, 0x01),
            ("Keccak-512", 72, 64, 0x01),
        ];
        for (alg, (name, rate, digest, domain)) in Algorithm::ALL.into_iter().zip(expected) {
            let p = alg.params();
            assert_eq!(alg.name(), name);
            assert_eq!(p.rate_bytes, rate);
            assert_eq!(p.digest_bytes, digest);
            assert_eq!(p.domain_separator, domain);
            assert_eq!(p.capacity_bits() + 8 * p.rate_bytes, 1600);
        }
    }

    #[test]
    fn marker_and_enum_agree() {
        assert_eq!(Sha3_384::ALGORITHM.params(), Sha3_384::PARAMS);
        assert_eq!(Keccak256::ALGORITHM, Algorithm::Keccak256);
        assert_eq!(Keccak512::DIGEST_BYTES, 64);
    }

    #[test]
    fn parse_names() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.to_string().parse::<Algorithm>(), Ok(alg));
        }
        assert_eq!("sha3-256".parse::<Algorithm>(), Ok(Algorithm::Sha3_256));
        assert_eq!("KECCAK-512".parse::<Algorithm>(), Ok(Algorithm::Keccak512));
        assert_eq!("sha-256".parse::<Algorithm>(), Err(Error::UnknownAlgorithm));
    }

    #[test]
    fn runtime_hash_has_digest_length() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.hash(b"").len(), alg.digest_bytes());
        }
    }
}
