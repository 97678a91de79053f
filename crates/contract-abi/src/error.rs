//! ABI error types

use crate::ParamType;
use thiserror::Error;

/// ABI encoding/decoding errors
#[derive(Debug, Error)]
pub enum AbiError {
    /// Type name is not one of the supported ABI types
    #[error("unsupported ABI type: {0}")]
    UnsupportedType(String),

    /// Argument does not match the declared parameter type
    #[error("argument {index} type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        index: usize,
        expected: ParamType,
        found: ParamType,
    },

    /// Decode destination cannot hold the decoded value
    #[error("invalid destination: expected {expected}, got {found}")]
    InvalidDestination { expected: ParamType, found: ParamType },

    /// Offset or computed position lies outside the buffer
    #[error("offset {offset} out of bounds for buffer of {len} bytes")]
    OutOfBounds { offset: usize, len: usize },

    /// Buffer ends before a word or payload does
    #[error("buffer truncated: needed {needed} bytes, have {have}")]
    Truncated { needed: usize, have: usize },

    /// Text payload is not valid UTF-8
    #[error("UTF-8 error: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Address text is not 20 bytes of hex
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Function signature could not be parsed
    #[error("invalid function signature: {0}")]
    InvalidSignature(String),

    /// Wrong number of arguments for a function
    #[error("argument count mismatch: expected {expected}, got {got}")]
    ArgumentCount { expected: usize, got: usize },
}

/// Result type for ABI operations
pub type Result<T> = std::result::Result<T, AbiError>;
