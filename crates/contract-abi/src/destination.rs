//! Typed decode destinations
//!
//! A destination names the ABI type it expects and accepts the decoded
//! value, so results can be written straight into caller variables:
//!
//! ```
//! use contract_abi::{decode_into, encode, Value};
//!
//! let data = encode(&[Value::from(2000u64), Value::from(true)]).unwrap();
//! let (mut timeout, mut enabled) = (0u64, false);
//! decode_into(&data, &mut [&mut timeout, &mut enabled]).unwrap();
//! assert_eq!((timeout, enabled), (2000, true));
//! ```

use crate::{AbiError, Address, ParamType, Result, Value};

/// A writable slot for one decoded value
pub trait Destination {
    /// ABI type this slot is decoded as
    fn param_type(&self) -> ParamType;

    /// Store a decoded value
    ///
    /// Fails with [`AbiError::InvalidDestination`] when the value is of a
    /// different type than the slot.
    fn assign(&mut self, value: Value) -> Result<()>;
}

macro_rules! impl_destination {
    ($ty:ty, $param:ident) => {
        impl Destination for $ty {
            fn param_type(&self) -> ParamType {
                ParamType::$param
            }

            fn assign(&mut self, value: Value) -> Result<()> {
                match value {
                    Value::$param(v) => {
                        *self = v;
                        Ok(())
                    }
                    other => Err(AbiError::InvalidDestination {
                        expected: ParamType::$param,
                        found: other.param_type(),
                    }),
                }
            }
        }
    };
}

impl_destination!(u64, Uint64);
impl_destination!(Address, Address);
impl_destination!(bool, Bool);
impl_destination!(Vec<u8>, Bytes);
impl_destination!(String, String);
impl_destination!(Vec<Address>, AddressArray);

/// A bare [`Value`] is decoded as whatever type it currently holds
impl Destination for Value {
    fn param_type(&self) -> ParamType {
        Value::param_type(self)
    }

    fn assign(&mut self, value: Value) -> Result<()> {
        let expected = Value::param_type(self);
        if value.param_type() != expected {
            return Err(AbiError::InvalidDestination {
                expected,
                found: value.param_type(),
            });
        }
        *self = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_matching() {
        let mut n = 0u64;
        n.assign(Value::Uint64(9)).unwrap();
        assert_eq!(n, 9);

        let mut addrs: Vec<Address> = Vec::new();
        addrs.assign(Value::AddressArray(vec![Address::ZERO])).unwrap();
        assert_eq!(addrs.len(), 1);
    }

    #[test]
    fn test_assign_mismatch() {
        let mut n = 0u64;
        assert!(matches!(
            n.assign(Value::Bool(true)),
            Err(AbiError::InvalidDestination {
                expected: ParamType::Uint64,
                found: ParamType::Bool,
            })
        ));
        assert_eq!(n, 0);

        let mut v = Value::String(String::new());
        assert!(v.assign(Value::Bytes(vec![1])).is_err());
        v.assign(Value::String("ok".into())).unwrap();
        assert_eq!(v.as_str(), Some("ok"));
    }

    #[test]
    fn test_value_destination_decodes_by_current_type() {
        let data = crate::encode(&[Value::from("node-1"), Value::from(3u64)]).unwrap();
        let mut url = Value::String(String::new());
        let mut id = Value::Uint64(0);
        crate::decode_into(&data, &mut [&mut url, &mut id]).unwrap();
        assert_eq!(url, Value::from("node-1"));
        assert_eq!(id, Value::Uint64(3));
    }
}
