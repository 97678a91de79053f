//! ABI decoding context and word helpers
//!
//! The context carries decoder compatibility switches. The free helpers in
//! this module do the word arithmetic shared by the encoder and decoder:
//! padding in both directions and bounds-checked word reads.

use crate::{AbiError, Address, Result};
use bytes::BufMut;

/// Size of one ABI word in bytes
pub const WORD_SIZE: usize = 32;

/// Offset of an address inside its word (addresses occupy the low 20 bytes)
pub const ADDRESS_OFFSET: usize = WORD_SIZE - Address::LEN;

/// ABI decoding context
///
/// Encoding has no knobs; the context only changes how the decoder treats
/// malformed dynamic offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbiContext {
    /// Decode an out-of-range `bytes`/`string` offset as the hex text of a
    /// static address instead of failing.
    ///
    /// Older contracts returned an address word where callers expected a
    /// string. This reproduces how those results used to be read. Leave it
    /// off for new call sites.
    pub legacy_address_text: bool,
}

impl AbiContext {
    /// Create a strict context
    pub fn new() -> Self {
        Self { legacy_address_text: false }
    }

    /// Create a context with the legacy address-as-text fallback enabled
    pub fn legacy() -> Self {
        Self { legacy_address_text: true }
    }

    /// Create a context with the fallback set explicitly
    pub fn with_legacy_address_text(legacy_address_text: bool) -> Self {
        Self { legacy_address_text }
    }

    /// Number of zero bytes needed to pad `len` up to a whole word
    #[inline]
    pub fn word_padding(len: usize) -> usize {
        let remainder = len % WORD_SIZE;
        if remainder == 0 {
            0
        } else {
            WORD_SIZE - remainder
        }
    }

    /// Round `len` up to a whole number of words
    #[inline]
    pub fn padded_len(len: usize) -> usize {
        len + Self::word_padding(len)
    }
}

/// Write `bytes` right-aligned in a word (left zero padding)
///
/// Callers never pass more than one word.
pub(crate) fn put_left_padded<B: BufMut>(buf: &mut B, bytes: &[u8]) {
    debug_assert!(bytes.len() <= WORD_SIZE);
    buf.put_bytes(0, WORD_SIZE - bytes.len());
    buf.put_slice(bytes);
}

/// Write `bytes` followed by zero padding up to the next word boundary
pub(crate) fn put_right_padded<B: BufMut>(buf: &mut B, bytes: &[u8]) {
    buf.put_slice(bytes);
    buf.put_bytes(0, AbiContext::word_padding(bytes.len()));
}

/// Write an unsigned integer as one big-endian word
#[inline]
pub(crate) fn put_u64_word<B: BufMut>(buf: &mut B, value: u64) {
    put_left_padded(buf, &value.to_be_bytes());
}

/// Write a length, count or offset as one big-endian word
#[inline]
pub(crate) fn put_usize_word<B: BufMut>(buf: &mut B, value: usize) {
    put_u64_word(buf, value as u64);
}

/// Borrow the word starting at byte `offset`
pub(crate) fn word_at(data: &[u8], offset: usize) -> Result<&[u8]> {
    let end = offset
        .checked_add(WORD_SIZE)
        .ok_or(AbiError::OutOfBounds { offset, len: data.len() })?;
    if end > data.len() {
        return Err(AbiError::Truncated { needed: end, have: data.len() });
    }
    Ok(&data[offset..end])
}

/// Borrow head slot `index`
pub(crate) fn head_word(data: &[u8], index: usize) -> Result<&[u8]> {
    let offset = index
        .checked_mul(WORD_SIZE)
        .ok_or(AbiError::OutOfBounds { offset: usize::MAX, len: data.len() })?;
    word_at(data, offset)
}

/// Low 8 bytes of a word as a big-endian u64
#[inline]
pub(crate) fn word_to_u64(word: &[u8]) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&word[WORD_SIZE - 8..WORD_SIZE]);
    u64::from_be_bytes(raw)
}

/// A word used as a length, count or offset
///
/// Words too large for `usize` saturate, which callers then reject as out of
/// bounds.
pub(crate) fn word_to_usize(word: &[u8]) -> usize {
    if word[..WORD_SIZE - 8].iter().any(|b| *b != 0) {
        return usize::MAX;
    }
    usize::try_from(word_to_u64(word)).unwrap_or(usize::MAX)
}

/// Borrow `len` bytes starting at `offset`
pub(crate) fn slice_at(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let end = offset
        .checked_add(len)
        .ok_or(AbiError::OutOfBounds { offset, len: data.len() })?;
    if end > data.len() {
        return Err(AbiError::Truncated { needed: end, have: data.len() });
    }
    Ok(&data[offset..end])
}
