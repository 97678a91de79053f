//! ABI encoder
//!
//! Wire format for N arguments:
//! ```text
//! head[0..N]   # one word per argument: the value itself, or an offset
//! tail         # dynamic payloads in argument order
//! ```
//!
//! Offsets are measured from the first byte of the head, so the first
//! dynamic payload always starts at `N * 32`.

use crate::context::{put_left_padded, put_right_padded, put_u64_word, put_usize_word, WORD_SIZE};
use crate::{AbiContext, Result, Value};
use bytes::{BufMut, Bytes, BytesMut};

/// Encode an argument list into `head ++ tail`.
///
/// Every [`Value`] variant is encodable; the `Result` lets callers treat
/// this the same as [`Function::encode_input`](crate::Function::encode_input).
pub fn encode(values: &[Value]) -> Result<Bytes> {
    let head_size = values.len() * WORD_SIZE;
    let tail_size: usize = values.iter().map(payload_size).sum();

    let mut head = BytesMut::with_capacity(head_size + tail_size);
    let mut tail = BytesMut::with_capacity(tail_size);

    for value in values {
        match value {
            Value::Uint64(v) => put_u64_word(&mut head, *v),
            Value::Address(addr) => put_left_padded(&mut head, addr.as_bytes()),
            Value::Bool(v) => put_u64_word(&mut head, u64::from(*v)),
            Value::Bytes(_) | Value::String(_) | Value::AddressArray(_) => {
                put_usize_word(&mut head, head_size + tail.len());
                encode_payload(&mut tail, value);
            }
        }
    }

    head.put(tail);
    Ok(head.freeze())
}

/// Append the tail payload of a dynamic value; static values have none
fn encode_payload<B: BufMut>(buf: &mut B, value: &Value) {
    match value {
        Value::Bytes(bytes) => encode_bytes(buf, bytes),
        Value::String(s) => encode_bytes(buf, s.as_bytes()),
        Value::AddressArray(addrs) => {
            put_usize_word(buf, addrs.len());
            for addr in addrs {
                put_left_padded(buf, addr.as_bytes());
            }
        }
        Value::Uint64(_) | Value::Address(_) | Value::Bool(_) => {}
    }
}

fn encode_bytes<B: BufMut>(buf: &mut B, bytes: &[u8]) {
    put_usize_word(buf, bytes.len());
    put_right_padded(buf, bytes);
}

/// Size of a value's tail payload in bytes (0 for static values)
pub fn payload_size(value: &Value) -> usize {
    match value {
        Value::Bytes(bytes) => WORD_SIZE + AbiContext::padded_len(bytes.len()),
        Value::String(s) => WORD_SIZE + AbiContext::padded_len(s.len()),
        Value::AddressArray(addrs) => WORD_SIZE + addrs.len() * WORD_SIZE,
        Value::Uint64(_) | Value::Address(_) | Value::Bool(_) => 0,
    }
}
