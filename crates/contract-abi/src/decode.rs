//! ABI decoder
//!
//! Values are read positionally: destination `i` is decoded from head
//! slot `i`. Dynamic slots hold an offset into the buffer, measured from
//! the start of the head, where a length/count word and the payload live.

use crate::context::{head_word, slice_at, word_at, word_to_u64, word_to_usize, ADDRESS_OFFSET, WORD_SIZE};
use crate::{AbiContext, AbiError, Address, Destination, ParamType, Result, Value};

impl AbiContext {
    /// Decode `data` into one value per type descriptor
    pub fn decode(&self, data: &[u8], types: &[ParamType]) -> Result<Vec<Value>> {
        types
            .iter()
            .enumerate()
            .map(|(index, ty)| self.decode_slot(data, index, *ty))
            .collect()
    }

    /// Decode `data` into caller-supplied destinations, in order
    ///
    /// Destinations before a failing slot keep their decoded values.
    pub fn decode_into(&self, data: &[u8], destinations: &mut [&mut dyn Destination]) -> Result<()> {
        for (index, dest) in destinations.iter_mut().enumerate() {
            let value = self.decode_slot(data, index, dest.param_type())?;
            dest.assign(value)?;
        }
        Ok(())
    }

    /// Decode the value of type `ty` referenced by head slot `index`
    pub fn decode_slot(&self, data: &[u8], index: usize, ty: ParamType) -> Result<Value> {
        let word = head_word(data, index)?;
        match ty {
            ParamType::Uint64 => Ok(Value::Uint64(word_to_u64(word))),
            ParamType::Bool => Ok(Value::Bool((word[WORD_SIZE - 1] & 1) == 1)),
            ParamType::Address => Ok(Value::Address(word_to_address(word))),
            ParamType::Bytes => Ok(Value::Bytes(self.decode_bytes(data, word)?)),
            ParamType::String => {
                let bytes = self.decode_bytes(data, word)?;
                Ok(Value::String(String::from_utf8(bytes)?))
            }
            ParamType::AddressArray => Ok(Value::AddressArray(decode_address_array(data, word)?)),
        }
    }

    fn decode_bytes(&self, data: &[u8], head: &[u8]) -> Result<Vec<u8>> {
        let offset = word_to_usize(head);
        if offset >= data.len() {
            if self.legacy_address_text {
                // The slot holds a static address, not an offset
                return Ok(word_to_address(head).to_string().into_bytes());
            }
            if offset == data.len() {
                return Ok(Vec::new());
            }
            return Err(AbiError::OutOfBounds { offset, len: data.len() });
        }

        let len = word_to_usize(word_at(data, offset)?);
        Ok(slice_at(data, offset + WORD_SIZE, len)?.to_vec())
    }
}

fn word_to_address(word: &[u8]) -> Address {
    Address::from_slice(&word[ADDRESS_OFFSET..WORD_SIZE])
}

fn decode_address_array(data: &[u8], head: &[u8]) -> Result<Vec<Address>> {
    let offset = word_to_usize(head);
    if offset >= data.len() {
        return Ok(Vec::new());
    }

    let count = word_to_usize(word_at(data, offset)?);
    let size = count
        .checked_mul(WORD_SIZE)
        .ok_or(AbiError::OutOfBounds { offset, len: data.len() })?;
    let elements = slice_at(data, offset + WORD_SIZE, size)?;
    Ok(elements.chunks_exact(WORD_SIZE).map(word_to_address).collect())
}

/// Decode with the default (strict) context
pub fn decode(data: &[u8], types: &[ParamType]) -> Result<Vec<Value>> {
    AbiContext::new().decode(data, types)
}

/// Decode into destinations with the default (strict) context
pub fn decode_into(data: &[u8], destinations: &mut [&mut dyn Destination]) -> Result<()> {
    AbiContext::new().decode_into(data, destinations)
}

/// Decode a single return value
pub fn decode_one<T: Destination + Default>(data: &[u8]) -> Result<T> {
    let mut out = T::default();
    decode_into(data, &mut [&mut out])?;
    Ok(out)
}
