//! ABI values and type descriptors
//!
//! | ABI type    | Rust type      | Kind    | Encoding                          |
//! |-------------|----------------|---------|-----------------------------------|
//! | `uint64`    | `u64`          | static  | big-endian, left padded           |
//! | `address`   | [`Address`]    | static  | 20 bytes, left padded             |
//! | `bool`      | `bool`         | static  | low bit of the word               |
//! | `bytes`     | `Vec<u8>`      | dynamic | length word + right padded data   |
//! | `string`    | `String`       | dynamic | same as `bytes`, UTF-8            |
//! | `address[]` | `Vec<Address>` | dynamic | count word + one word per address |

use crate::{AbiError, Address, Result};
use std::fmt;
use std::str::FromStr;

/// Type descriptor for one argument or return value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Uint64,
    Address,
    Bool,
    Bytes,
    String,
    AddressArray,
}

impl ParamType {
    /// Whether values of this type live in the tail behind an offset
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Bytes | Self::String | Self::AddressArray)
    }

    /// Canonical type name as used in function signatures
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uint64 => "uint64",
            Self::Address => "address",
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::String => "string",
            Self::AddressArray => "address[]",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "uint64" => Ok(Self::Uint64),
            "address" => Ok(Self::Address),
            "bool" => Ok(Self::Bool),
            "bytes" => Ok(Self::Bytes),
            "string" => Ok(Self::String),
            "address[]" => Ok(Self::AddressArray),
            other => Err(AbiError::UnsupportedType(other.to_string())),
        }
    }
}

/// A typed argument or return value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Uint64(u64),
    Address(Address),
    Bool(bool),
    Bytes(Vec<u8>),
    String(String),
    AddressArray(Vec<Address>),
}

impl Value {
    /// Type descriptor matching this value
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::Uint64(_) => ParamType::Uint64,
            Self::Address(_) => ParamType::Address,
            Self::Bool(_) => ParamType::Bool,
            Self::Bytes(_) => ParamType::Bytes,
            Self::String(_) => ParamType::String,
            Self::AddressArray(_) => ParamType::AddressArray,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.param_type().is_dynamic()
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Uint64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint64(v)
    }
}

impl From<Address> for Value {
    fn from(v: Address) -> Self {
        Self::Address(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<Address>> for Value {
    fn from(v: Vec<Address>) -> Self {
        Self::AddressArray(v)
    }
}

impl From<&[Address]> for Value {
    fn from(v: &[Address]) -> Self {
        Self::AddressArray(v.to_vec())
    }
}
