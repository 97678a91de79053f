//! Method signatures and selectors
//!
//! A call payload is the 4-byte selector followed by the encoded arguments:
//! ```text
//! selector: [u8; 4]   # keccak-256("name(type,...)")[..4]
//! args                # head ++ tail, see `encode`
//! ```

use crate::{encode, AbiError, ParamType, Result, Value};
use bytes::{BufMut, Bytes, BytesMut};
use sha3::{Digest, Keccak256};
use std::fmt;

/// Selector length in bytes
pub const SELECTOR_LEN: usize = 4;

/// Compute the selector of a canonical signature such as `getMembers()`
pub fn selector(signature: &str) -> [u8; SELECTOR_LEN] {
    let hash = Keccak256::digest(signature.as_bytes());
    let mut out = [0u8; SELECTOR_LEN];
    out.copy_from_slice(&hash[..SELECTOR_LEN]);
    out
}

/// Prepend `selector` to the encoded `values`
pub fn encode_with_selector(selector: [u8; SELECTOR_LEN], values: &[Value]) -> Result<Bytes> {
    let args = encode(values)?;
    let mut buf = BytesMut::with_capacity(SELECTOR_LEN + args.len());
    buf.put_slice(&selector);
    buf.put(args);
    Ok(buf.freeze())
}

/// A contract method: name and input types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub inputs: Vec<ParamType>,
}

impl Function {
    pub fn new(name: impl Into<String>, inputs: Vec<ParamType>) -> Self {
        Self { name: name.into(), inputs }
    }

    /// Parse `name(type,type,...)`
    pub fn parse(signature: &str) -> Result<Self> {
        let signature = signature.trim();
        let open = signature
            .find('(')
            .ok_or_else(|| AbiError::InvalidSignature(signature.to_string()))?;
        let params = signature[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| AbiError::InvalidSignature(signature.to_string()))?;

        let name = signature[..open].trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(AbiError::InvalidSignature(signature.to_string()));
        }

        let inputs = if params.trim().is_empty() {
            Vec::new()
        } else {
            params
                .split(',')
                .map(str::parse)
                .collect::<Result<Vec<ParamType>>>()?
        };

        Ok(Self::new(name, inputs))
    }

    /// Canonical signature text used for the selector
    pub fn signature(&self) -> String {
        self.to_string()
    }

    pub fn selector(&self) -> [u8; SELECTOR_LEN] {
        selector(&self.signature())
    }

    /// Check `values` against the declared inputs
    pub fn check_input(&self, values: &[Value]) -> Result<()> {
        if values.len() != self.inputs.len() {
            return Err(AbiError::ArgumentCount {
                expected: self.inputs.len(),
                got: values.len(),
            });
        }
        for (index, (expected, value)) in self.inputs.iter().zip(values).enumerate() {
            if value.param_type() != *expected {
                return Err(AbiError::TypeMismatch {
                    index,
                    expected: *expected,
                    found: value.param_type(),
                });
            }
        }
        Ok(())
    }

    /// Build the call payload: selector followed by the encoded arguments
    pub fn encode_input(&self, values: &[Value]) -> Result<Bytes> {
        self.check_input(values)?;
        encode_with_selector(self.selector(), values)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, ty) in self.inputs.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", ty)?;
        }
        f.write_str(")")
    }
}
