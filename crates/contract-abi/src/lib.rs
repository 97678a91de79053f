//! Contract ABI codec
//!
//! Encodes call arguments and decodes return values using the word-oriented
//! contract calling convention.
//!
//! # Wire Format
//!
//! Everything is laid out in 32-byte words:
//! - Static values (`uint64`, `address`, `bool`) take one word in the head,
//!   left padded
//! - Dynamic values (`bytes`, `string`, `address[]`) put a byte offset in
//!   the head and their payload in the tail
//! - Payloads start with a length or count word; byte data is right padded
//!   to a whole word
//!
//! The codec is pure: no I/O, no shared state, no logging.

mod address;
mod context;
mod decode;
mod destination;
mod encode;
mod error;
mod function;
mod value;

pub use address::Address;
pub use context::{AbiContext, ADDRESS_OFFSET, WORD_SIZE};
pub use decode::{decode, decode_into, decode_one};
pub use destination::Destination;
pub use encode::{encode, payload_size};
pub use error::{AbiError, Result};
pub use function::{encode_with_selector, selector, Function, SELECTOR_LEN};
pub use value::{ParamType, Value};

/// Re-export bytes for convenience
pub use bytes::Bytes;
