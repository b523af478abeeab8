//! Digest value type.
//!
//! A [`Digest`] wraps the variant's fixed-size byte array. Equality runs in
//! constant time over the full content; `Display` is lower-case hex with no
//! separator.

use core::fmt;

use crate::ct;
use crate::params::{ByteArray, Variant};
use crate::{Error, Result};

/// Output of one of the eight Keccak variants. Immutable once produced.
pub struct Digest<V: Variant> {
    pub(crate) bytes: V::DigestArray,
}

impl<V: Variant> Digest<V> {
    /// Output length in bytes.
    pub const LEN: usize = V::DIGEST_BYTES;

    /// Wrap an existing byte array as a digest.
    #[inline]
    pub fn from_array(bytes: V::DigestArray) -> Self {
        Self { bytes }
    }

    /// Parse a digest from hex text of exactly `2 * LEN` characters.
    pub fn from_hex(text: impl AsRef<[u8]>) -> Result<Self> {
        let raw = hex::decode(text).map_err(|_| Error::InvalidHex)?;
        Self::try_from(raw.as_slice())
    }

    /// View the digest as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    /// Consume the wrapper and return the inner byte array.
    #[inline]
    pub fn into_bytes(self) -> V::DigestArray {
        self.bytes
    }

    /// Lower-case hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Upper-case hex rendering.
    pub fn to_hex_upper(&self) -> String {
        hex::encode_upper(self.bytes)
    }
}

impl<V: Variant> TryFrom<&[u8]> for Digest<V> {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != V::DIGEST_BYTES {
            return Err(Error::InvalidLength {
                expected: V::DIGEST_BYTES,
                actual: bytes.len(),
            });
        }
        let mut arr = V::DigestArray::zeroed();
        arr.as_mut().copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }
}

impl<V: Variant> AsRef<[u8]> for Digest<V> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<V: Variant> Clone for Digest<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: Variant> Copy for Digest<V> {}

impl<V: Variant> PartialEq for Digest<V> {
    fn eq(&self, other: &Self) -> bool {
        ct::ct_verify(self.as_bytes(), other.as_bytes()) == 0
    }
}

impl<V: Variant> Eq for Digest<V> {}

impl<V: Variant> core::hash::Hash for Digest<V> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl<V: Variant> fmt::LowerHex for Digest<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl<V: Variant> fmt::UpperHex for Digest<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

impl<V: Variant> fmt::Display for Digest<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl<V: Variant> fmt::Debug for Digest<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} digest: {self:x}", V::NAME)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::params::{Keccak256, Sha3_224, Sha3_256};
    use crate::sponge::hash;

    const SHA3_256_EMPTY: &str = "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a";

    #[test]
    fn hex_renderings() {
        let d = hash::<Sha3_256>(b"");
        assert_eq!(d.to_string(), SHA3_256_EMPTY);
        assert_eq!(format!("{d:x}"), SHA3_256_EMPTY);
        assert_eq!(format!("{d:X}"), SHA3_256_EMPTY.to_uppercase());
        assert_eq!(d.to_hex_upper(), SHA3_256_EMPTY.to_uppercase());
        assert_eq!(format!("{d:?}"), format!("SHA3-256 digest: {SHA3_256_EMPTY}"));
    }

    #[test]
    fn hex_parse_roundtrip() {
        let d = hash::<Keccak256>(b"abc");
        assert_eq!(Digest::<Keccak256>::from_hex(d.to_hex()), Ok(d));
        assert_eq!(Digest::<Keccak256>::from_hex(d.to_hex_upper()), Ok(d));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            Digest::<Sha3_224>::try_from(&[0u8; 32][..]),
            Err(Error::InvalidLength { expected: 28, actual: 32 })
        );
        assert_eq!(Digest::<Sha3_256>::from_hex("zz"), Err(Error::InvalidHex));
        assert_eq!(Digest::<Sha3_256>::from_hex("abc"), Err(Error::InvalidHex));
    }

    #[test]
    fn equality_and_hash_use_full_content() {
        let a = hash::<Sha3_256>(b"a");
        let b = hash::<Sha3_256>(b"b");
        let mut last_byte_flipped = a.into_bytes();
        last_byte_flipped[31] ^= 1;
        let c = Digest::<Sha3_256>::from_array(last_byte_flipped);

        assert_eq!(a, hash::<Sha3_256>(b"a"));
        assert_ne!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c, a].into_iter().collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn fixed_length() {
        assert_eq!(Digest::<Sha3_224>::LEN, 28);
        assert_eq!(hash::<Sha3_224>(b"xyz").as_bytes().len(), 28);
    }
}
