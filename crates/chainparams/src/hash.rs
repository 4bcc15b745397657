//! 256-bit hashes and the double SHA-256 primitive

use crate::{Error, Result};
use primitive_types::U256;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// A 256-bit hash in internal byte order.
///
/// Internal order is the order the bytes come out of the hash function and go
/// onto the wire. Block explorers and RPC show the bytes reversed, so
/// `Display` and `FromStr` use the reversed form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// The all-zero hash (parent of the genesis block)
    pub const ZERO: Hash256 = Hash256([0u8; 32]);

    /// Raw bytes in internal order
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Interpret the hash as a little-endian 256-bit integer, the form it is
    /// compared against a difficulty target in.
    pub fn to_u256(&self) -> U256 {
        U256::from_little_endian(&self.0)
    }

    /// Check whether every byte is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        f.write_str(&hex::encode(reversed))
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self)
    }
}

impl FromStr for Hash256 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| Error::InvalidHash(format!("{s}: {e}")))?;
        let mut out: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::InvalidHash(format!("{s}: expected 32 bytes")))?;
        out.reverse();
        Ok(Hash256(out))
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Hash256(bytes)
    }
}

/// Double SHA-256, the hash used for transaction ids, Merkle nodes and block
/// identity.
pub fn sha256d(data: &[u8]) -> Hash256 {
    let first = Sha256::digest(data);
    Hash256(Sha256::digest(first).into())
}
