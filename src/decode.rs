//! The decoder: dispatches on the marker-bit prefix of each leading byte.

use std::error::Error;
use std::fmt;

use crate::state::State;
use crate::tables::{aux_offset_lookup, decode_ranges, EXTRA_RANGES, HIRAGANA_KATAKANA, LATIN_RANGES};

/// Decoding failures. Every variant denotes corrupt input; there is no
/// recovery, nothing is retried, and decoding stops at the first error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A marker byte needed more continuation bytes than remained in the
    /// input.
    TruncatedInput {
        /// Byte offset of the marker byte.
        at: usize,
        /// Bytes the marker byte's variant requires, including itself.
        expected: usize,
        /// Bytes actually available from `at` to the end of input.
        found: usize,
    },
    /// A decoded index (EXTRA's 12-bit payload, or a `0xC0..=0xFF` byte
    /// while the Latin remap is active) didn't correspond to any table
    /// entry.
    InvalidEncoding {
        /// Byte offset of the marker byte that produced the bad index.
        at: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::TruncatedInput { at, expected, found } => write!(
                f,
                "truncated UTF-C sequence at byte {}: expected {} bytes, found {}",
                at, expected, found
            ),
            DecodeError::InvalidEncoding { at } => {
                write!(f, "invalid UTF-C encoding at byte {}", at)
            }
        }
    }
}

impl Error for DecodeError {}

/// Decodes one codepoint starting at `bytes[pos]`, returning the codepoint
/// and the position just past the bytes it consumed. Updates `state` as a
/// side effect where the format calls for it.
fn decode_step(state: &mut State, bytes: &[u8], pos: usize) -> Result<(char, usize), DecodeError> {
    let b = bytes[pos];

    let (cp, consumed) = if b & 0xC0 == 0xC0 {
        // AUX: 1 byte, no state change.
        let cp = if state.aux_offs == 0 {
            decode_ranges((b & 0x3F) as u32, &LATIN_RANGES)
                .ok_or(DecodeError::InvalidEncoding { at: pos })?
        } else {
            state.aux_offs + (b & 0x3F) as u32
        };
        (cp, 1)
    } else if b & 0xF0 == 0xB0 && b != 0xB0 {
        // EXTRA: 2 bytes. encode_step biases the leading nibble by +1 (see
        // its comment); byte 0xB0 itself (nibble 0) never denotes EXTRA and
        // falls through to SHIFT21 below, which needs it for indices whose
        // top 5 bits are all set.
        let b2 = *require(bytes, pos, 1, 2)?;
        let v = (((b & 0x0F) - 1) as u32) << 8 | b2 as u32;
        let cp = decode_ranges(v, &EXTRA_RANGES).ok_or(DecodeError::InvalidEncoding { at: pos })?;
        if cp >= HIRAGANA_KATAKANA.0 && cp < HIRAGANA_KATAKANA.1 {
            state.aux_offs = aux_offset_lookup(state.offs);
            state.offs = cp & State::MASK_13;
            state.is_21_bit = false;
        }
        (cp, 2)
    } else if b & 0xE0 == 0xA0 {
        // SHIFT21: 3 bytes.
        let b2 = *require(bytes, pos, 1, 3)?;
        let b3 = *require(bytes, pos, 2, 3)?;
        let v = ((b & 0x1F) as u32) << 16 | (b2 as u32) << 8 | b3 as u32;
        state.aux_offs = state.offs;
        state.offs = v & State::MASK_21;
        state.is_21_bit = true;
        (v + 0x2800, 3)
    } else if b & 0xE0 == 0x80 {
        // SHIFT13: 2 bytes.
        let b2 = *require(bytes, pos, 1, 2)?;
        let cp = ((b & 0x1F) as u32) << 8 | b2 as u32;
        state.aux_offs = aux_offset_lookup(state.offs);
        state.offs = if cp <= 0x02FF { 0 } else { cp & State::MASK_13 };
        state.is_21_bit = false;
        (cp, 2)
    } else if state.is_21_bit {
        // BASE, 21-bit window: 2 bytes. Never changes state.
        let b2 = *require(bytes, pos, 1, 2)?;
        (0x2800 + (state.offs | (b as u32) << 8 | b2 as u32), 2)
    } else {
        // BASE, 13-bit window: 1 byte. Never changes state.
        (state.offs | b as u32, 1)
    };

    let c = char::from_u32(cp).ok_or(DecodeError::InvalidEncoding { at: pos })?;
    Ok((c, pos + consumed))
}

/// Fetches the continuation byte at `marker_at + offset`, or a
/// `TruncatedInput` naming how many bytes the whole (`total_needed`-byte)
/// variant required versus how many remain from the marker byte on.
fn require(bytes: &[u8], marker_at: usize, offset: usize, total_needed: usize) -> Result<&u8, DecodeError> {
    bytes.get(marker_at + offset).ok_or(DecodeError::TruncatedInput {
        at: marker_at,
        expected: total_needed,
        found: bytes.len() - marker_at,
    })
}

/// Iterator over the codepoints encoded in a UTF-C byte slice. Yields
/// `Err` and stops once a decode error is hit; there is no recovery.
pub struct DecodeUtfcIter<'a> {
    bytes: &'a [u8],
    pos: usize,
    state: State,
    done: bool,
}

impl<'a> Iterator for DecodeUtfcIter<'a> {
    type Item = Result<char, DecodeError>;

    fn next(&mut self) -> Option<Result<char, DecodeError>> {
        if self.done || self.pos >= self.bytes.len() {
            return None;
        }
        match decode_step(&mut self.state, self.bytes, self.pos) {
            Ok((c, next_pos)) => {
                self.pos = next_pos;
                Some(Ok(c))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Streaming entry point: decode `bytes` one codepoint at a time without
/// collecting into a `String` first.
pub fn decode_iter(bytes: &[u8]) -> DecodeUtfcIter<'_> {
    DecodeUtfcIter {
        bytes,
        pos: 0,
        state: State::initial(),
        done: false,
    }
}

/// Decodes a complete UTF-C byte sequence back to a `String`.
///
/// Stops at the first corrupt byte and returns the error; no partial
/// output is returned (see DESIGN.md: a half-decoded string isn't a useful
/// artifact for a library whose purpose is compact storage).
pub fn decode(bytes: &[u8]) -> Result<String, DecodeError> {
    decode_iter(bytes).collect()
}
