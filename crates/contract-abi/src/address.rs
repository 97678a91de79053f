//! 20-byte account and contract addresses

use crate::{AbiError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Account or contract address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Address length in bytes
    pub const LEN: usize = 20;

    /// The zero address
    pub const ZERO: Self = Self([0; 20]);

    /// Build an address from raw bytes.
    ///
    /// Longer input keeps its trailing 20 bytes, shorter input is left padded
    /// with zeros.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut addr = [0u8; Self::LEN];
        if bytes.len() >= Self::LEN {
            addr.copy_from_slice(&bytes[bytes.len() - Self::LEN..]);
        } else {
            addr[Self::LEN - bytes.len()..].copy_from_slice(bytes);
        }
        Self(addr)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 20]
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Parse `0x`-prefixed or bare hex.
///
/// Odd digit counts get a leading zero and short input is left padded, so
/// `"0x1"` is the address ending in `01`.
impl FromStr for Address {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let even;
        let digits = if digits.len() % 2 == 1 {
            even = format!("0{}", digits);
            even.as_str()
        } else {
            digits
        };
        let bytes = hex::decode(digits)
            .map_err(|e| AbiError::InvalidAddress(format!("{}: {}", s, e)))?;
        Ok(Self::from_slice(&bytes))
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
