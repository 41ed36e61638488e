//! The encoder: a five-case priority ladder picking the shortest legal
//! coding variant for each codepoint.

use std::error::Error;
use std::fmt;

use crate::state::State;
use crate::tables::{aux_offset_lookup, encode_ranges, EXTRA_RANGES, HIRAGANA_KATAKANA, LATIN_RANGES};

/// Errors `encode_scalars` can return. A plain enum, matching how the
/// decoder's errors are structured in [`crate::decode::DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// A raw scalar value that isn't a valid Unicode codepoint for
    /// encoding: a surrogate half, or a value beyond `U+10FFFF`. This can
    /// never arise from the `char`-based [`encode`]: `char` already
    /// excludes surrogates and out-of-range scalars, so that entry point
    /// is infallible.
    InvalidCodepoint(u32),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::InvalidCodepoint(cp) => {
                write!(f, "{:#X} is not a valid Unicode scalar value", cp)
            }
        }
    }
}

impl Error for EncodeError {}

fn is_surrogate(cp: u32) -> bool {
    (0xD800..=0xDFFF).contains(&cp)
}

/// Encodes a single codepoint against `state`, appending bytes to `out` and
/// updating `state` as a side effect where the format calls for it. `cp` is
/// assumed to already be a valid Unicode scalar value (not a surrogate, not
/// beyond `U+10FFFF`) -- callers are expected to have checked that already,
/// which both [`encode`] (via `char`) and [`encode_scalars`] (explicitly)
/// do.
fn encode_step(state: &mut State, cp: u32, out: &mut Vec<u8>) {
    // Case 1/2: AUX-Latin or AUX.
    if state.aux_offs == 0 {
        if let Some(idx) = encode_ranges(cp, &LATIN_RANGES) {
            out.push(0xC0 | idx as u8);
            return;
        }
    } else if cp >= state.aux_offs && cp <= state.aux_offs + 0x3F {
        out.push(0xC0 | (cp - state.aux_offs) as u8);
        return;
    }

    // Case 3: extra ranges.
    if let Some(extra) = encode_ranges(cp, &EXTRA_RANGES) {
        if !state.is_21_bit && (cp & State::MASK_13) == state.offs {
            out.push((cp & 0x7F) as u8);
            return;
        }
        // The leading nibble is biased by +1 so it never comes out as 0,
        // which keeps byte 0xB0 itself free for SHIFT21 (see decode_step).
        out.push(0xB0 | (((extra >> 8) + 1) as u8));
        out.push((extra & 0xFF) as u8);
        if cp >= HIRAGANA_KATAKANA.0 && cp < HIRAGANA_KATAKANA.1 {
            state.aux_offs = aux_offset_lookup(state.offs);
            state.offs = cp & State::MASK_13;
            state.is_21_bit = false;
        }
        return;
    }

    // Case 4: 21-bit.
    if cp >= 0x2800 {
        let shifted = cp - 0x2800;
        let new_offs = shifted & State::MASK_21;
        if state.is_21_bit && new_offs == state.offs {
            out.push(((shifted >> 8) & 0x7F) as u8);
            out.push((shifted & 0xFF) as u8);
        } else {
            out.push((0xA0 | (shifted >> 16)) as u8);
            out.push(((shifted >> 8) & 0xFF) as u8);
            out.push((shifted & 0xFF) as u8);
            state.aux_offs = state.offs;
            state.offs = new_offs;
            state.is_21_bit = true;
        }
        return;
    }

    // Case 5: 13-bit, the fallback every codepoint below U+2800 not caught
    // above ends up at.
    let new_offs = cp & State::MASK_13;
    if !state.is_21_bit && new_offs == state.offs {
        out.push((cp & 0x7F) as u8);
    } else {
        out.push((0x80 | (cp >> 8)) as u8);
        out.push((cp & 0xFF) as u8);
        state.aux_offs = aux_offset_lookup(state.offs);
        state.offs = if cp <= 0x02FF { 0 } else { new_offs };
        state.is_21_bit = false;
    }
}

/// Encodes a sequence of Unicode scalar values to UTF-C bytes.
///
/// Infallible: `char` already excludes surrogates and values beyond
/// `U+10FFFF`, the only inputs that would otherwise need rejecting. Output
/// length is `1..=3` bytes per input codepoint.
pub fn encode<I: IntoIterator<Item = char>>(text: I) -> Vec<u8> {
    let mut state = State::initial();
    let mut out = Vec::new();
    for c in text {
        encode_step(&mut state, c as u32, &mut out);
    }
    out
}

/// Encodes raw `u32` scalar values, validating each one against the same
/// boundary check `char` enforces before encoding it. Use this when
/// codepoints arrive as `u32` from somewhere other than a Rust `char`
/// (another codec, a decoded binary format) and you want an
/// `InvalidCodepoint` error rather than panicking via
/// `char::from_u32(..).unwrap()`.
pub fn encode_scalars<I: IntoIterator<Item = u32>>(scalars: I) -> Result<Vec<u8>, EncodeError> {
    let mut state = State::initial();
    let mut out = Vec::new();
    for cp in scalars {
        if cp > 0x10FFFF || is_surrogate(cp) {
            return Err(EncodeError::InvalidCodepoint(cp));
        }
        encode_step(&mut state, cp, &mut out);
    }
    Ok(out)
}

/// Extension trait for encoding directly off a `char` iterator, e.g.
/// `"hello".chars().encode_utfc()`.
pub trait EncodeUtfc: Iterator<Item = char> + Sized {
    fn encode_utfc(self) -> Vec<u8>;
}

impl<T: Iterator<Item = char>> EncodeUtfc for T {
    fn encode_utfc(self) -> Vec<u8> {
        encode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_remap_literals() {
        assert_eq!(encode("A".chars()), vec![0xC0]);
        assert_eq!(encode("Z".chars()), vec![0xD9]);
        assert_eq!(encode("a".chars()), vec![0xDA]);
        assert_eq!(encode("z".chars()), vec![0xF3]);
        assert_eq!(encode("0".chars()), vec![0xF4]);
        assert_eq!(encode("9".chars()), vec![0xFD]);
        assert_eq!(encode(" ".chars()), vec![0xFE]);
        assert_eq!(encode("-".chars()), vec![0xFF]);
    }

    #[test]
    fn ascii_pass_through_outside_latin_remap() {
        for c in "!\"#$%&'()*+,./:;<=>?@[\\]^_`{|}~".chars() {
            assert_eq!(encode([c]), vec![c as u8]);
        }
        for c in ['\u{1}', '\u{1F}', '\u{7F}'] {
            assert_eq!(encode([c]), vec![c as u8]);
        }
    }

    #[test]
    fn hello_world() {
        // Every byte here is independently derivable from the Latin remap
        // table: uppercase at index `c - 'A'`, lowercase at `26 + (c - 'a')`,
        // space at 62, all added to 0xC0, except the bare `!` which isn't in
        // the Latin remap and passes through as raw ASCII.
        let expected = [
            0xC7, 0xDE, 0xE5, 0xE5, 0xE8, 0xFE, 0xD6, 0xE8, 0xEB, 0xE5, 0xDD, 0x21,
        ];
        assert_eq!(encode("Hello World!".chars()), expected);
    }

    #[test]
    fn cyrillic_shifts_to_13_bit_window() {
        let bytes = encode("\u{41f}\u{440}".chars());
        assert_eq!(&bytes[0..2], &[0x84, 0x1F]);
    }

    #[test]
    fn linear_b_shifts_to_21_bit_window() {
        let bytes = encode("\u{10000}".chars());
        assert_eq!(bytes.len(), 3);
        assert_eq!(bytes[0] & 0xE0, 0xA0);
    }

    #[test]
    fn size_bound_is_at_most_three_bytes_per_codepoint() {
        let s = "Hello \u{41f}\u{1F600}\u{10000}\u{3042}";
        let n = s.chars().count();
        assert!(encode(s.chars()).len() <= 3 * n);
    }

    #[test]
    fn append_only_prefix_property() {
        let u = "Hello \u{41f}";
        let v = "\u{1F600}world";
        let combined = format!("{}{}", u, v);
        let enc_u = encode(u.chars());
        let enc_combined = encode(combined.chars());
        assert!(enc_combined.starts_with(&enc_u[..]));
    }

    #[test]
    fn encode_scalars_rejects_surrogates_and_out_of_range() {
        assert_eq!(
            encode_scalars([0xD800]),
            Err(EncodeError::InvalidCodepoint(0xD800))
        );
        assert_eq!(
            encode_scalars([0x110000]),
            Err(EncodeError::InvalidCodepoint(0x110000))
        );
        assert!(encode_scalars([0x41]).is_ok());
    }

    #[test]
    fn extension_trait_matches_free_function() {
        assert_eq!("Hello".chars().encode_utfc(), encode("Hello".chars()));
    }
}
