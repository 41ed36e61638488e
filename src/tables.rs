//! Static tables shared by the encoder and the decoder.
//!
//! Every table here is a compile-time constant; nothing is computed at
//! runtime startup. The layout (flat arrays of half-open `(lo, hi)` ranges,
//! scanned left to right) is the same shape as a lookup table keyed by
//! individual characters, just over ranges instead of points -- this
//! format's alphabets are too large to enumerate character-by-character.

/// The Latin remap: the bijection between `0xC0..=0xFF` and
/// `{A-Z, a-z, 0-9, space, hyphen}`, active whenever `aux_offs == 0`.
///
/// Note: the reference Go source writes the hyphen entry as the
/// degenerate range `{0x2D, 0x2C}` (`hi < lo`, empty under the range
/// helpers below), which would push the hyphen out to a 2-byte SHIFT13
/// encoding and leave the Latin remap one entry short of 64. The reference
/// JS source instead special-cases the hyphen as remap index 63. This
/// implementation follows the JS interpretation -- the hyphen range below is
/// the proper half-open `[0x2D, 0x2E)` -- so the Latin remap alphabet is
/// exactly 64 entries and `encode("-") == [0xFF]`. See DESIGN.md.
pub const LATIN_RANGES: [(u32, u32); 5] = [
    (0x41, 0x5B), // A-Z (26)
    (0x61, 0x7B), // a-z (26)
    (0x30, 0x3A), // 0-9 (10)
    (0x20, 0x21), // space (1)
    (0x2D, 0x2E), // hyphen (1)
];

/// The six "extra" ranges addressed by the 2-byte EXTRA variant: CJK
/// symbols and punctuation, Hiragana/Katakana, variation selectors,
/// enclosed alphanumeric supplement, a block of pictographs, and
/// supplemental symbols and pictographs. Total 3744 values, indexed
/// `0..0xEA0`, fitting in the 12 bits EXTRA carries.
pub const EXTRA_RANGES: [(u32, u32); 6] = [
    (0x2000, 0x2800),  // general punctuation through box drawing etc. (2048)
    (0x3000, 0x3100),  // CJK symbols/punctuation, Hiragana, Katakana (256)
    (0xFE00, 0xFE10),  // variation selectors (16)
    (0x1F170, 0x1F200), // enclosed alphanumeric supplement (144)
    (0x1F300, 0x1F700), // misc symbols and pictographs, emoticons, transport (1024)
    (0x1F900, 0x1FA00), // supplemental symbols and pictographs (256)
];

/// The sub-range of [`EXTRA_RANGES`] that triggers the Hiragana/Katakana
/// state transition: see [`crate::encode::encode`] and [`crate::decode::decode`].
pub const HIRAGANA_KATAKANA: (u32, u32) = (0x3000, 0x3100);

/// Fixed mapping from a 13-bit base-alphabet `offs` value to the preferred
/// starting codepoint of its 64-entry auxiliary window. Bases not listed
/// here map to themselves (identity fallback in [`aux_offset_lookup`]).
///
/// Entries are the raw `offs` value that occurs while that script is the
/// active base alphabet (always `0` or a multiple of `0x80`), not a block
/// start -- `offs` is only ever `cp & State::MASK_13` for some codepoint
/// `cp` actually encoded, so the key is whatever that masking produces for
/// a representative letter of the script, and the value is the nicest
/// 64-codepoint window addressable from there. Kept sorted by key so
/// [`aux_offset_lookup`] can binary-search.
pub const AUX_OFFSET_REMAP: [(u32, u32); 21] = [
    (0x0000, 0x00C0), // Latin window -> Latin-1 Supplement (accented Latin)
    (0x0380, 0x0386), // Greek
    (0x0400, 0x0410), // Cyrillic
    (0x0500, 0x0531), // Armenian
    (0x0580, 0x05D0), // Hebrew
    (0x0600, 0x0627), // Arabic
    (0x0900, 0x0905), // Devanagari
    (0x0980, 0x0985), // Bengali
    (0x0A00, 0x0A05), // Gurmukhi
    (0x0A80, 0x0A85), // Gujarati
    (0x0B00, 0x0B05), // Oriya
    (0x0B80, 0x0B85), // Tamil
    (0x0C80, 0x0C85), // Kannada
    (0x0D00, 0x0D05), // Malayalam
    (0x0D80, 0x0D85), // Sinhala
    (0x0E00, 0x0E01), // Thai
    (0x0E80, 0x0E81), // Lao
    (0x0F00, 0x0F40), // Tibetan, consonants
    (0x0F80, 0x0F90), // Tibetan, subjoined consonants
    (0x1080, 0x10D0), // Georgian (Mkhedruli)
    (0x3000, 0x3042), // Hiragana
];

/// The preferred auxiliary window for the base alphabet currently at
/// `offs`. Bases absent from [`AUX_OFFSET_REMAP`] map to themselves.
pub fn aux_offset_lookup(offs: u32) -> u32 {
    match AUX_OFFSET_REMAP.binary_search_by_key(&offs, |&(k, _)| k) {
        Ok(i) => AUX_OFFSET_REMAP[i].1,
        Err(_) => offs,
    }
}

/// Flattens a union of half-open ranges into a contiguous 0-based index:
/// if `cp` falls in `ranges[i] = [lo, hi)`, returns the count of all values
/// in earlier ranges plus `cp - lo`. `None` if `cp` isn't covered.
pub fn encode_ranges(cp: u32, ranges: &[(u32, u32)]) -> Option<u32> {
    let mut base = 0u32;
    for &(lo, hi) in ranges {
        if cp >= lo && cp < hi {
            return Some(base + (cp - lo));
        }
        base += hi - lo;
    }
    None
}

/// Inverse of [`encode_ranges`]: given a flattened index, finds the range
/// it falls in and returns the corresponding codepoint. `None` if `v` is
/// not covered by the union (an out-of-range or gap index -- corrupt input
/// when called from the decoder).
pub fn decode_ranges(v: u32, ranges: &[(u32, u32)]) -> Option<u32> {
    let mut base = 0u32;
    for &(lo, hi) in ranges {
        let len = hi - lo;
        if v < base + len {
            return Some(lo + (v - base));
        }
        base += len;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_ranges_total_64() {
        let total: u32 = LATIN_RANGES.iter().map(|&(lo, hi)| hi - lo).sum();
        assert_eq!(total, 64);
    }

    #[test]
    fn extra_ranges_total_matches_spec() {
        let total: u32 = EXTRA_RANGES.iter().map(|&(lo, hi)| hi - lo).sum();
        assert_eq!(total, 0xEA0);
    }

    #[test]
    fn aux_offset_remap_is_sorted() {
        for pair in AUX_OFFSET_REMAP.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn aux_offset_lookup_known_entries() {
        assert_eq!(aux_offset_lookup(0), 0x00C0);
        assert_eq!(aux_offset_lookup(0x0400), 0x0410);
    }

    #[test]
    fn aux_offset_lookup_unknown_base_is_identity() {
        assert_eq!(aux_offset_lookup(0x1234_5600), 0x1234_5600);
    }

    #[test]
    fn encode_decode_ranges_round_trip() {
        for cp in 0x41u32..0x5B {
            let idx = encode_ranges(cp, &LATIN_RANGES).unwrap();
            assert_eq!(decode_ranges(idx, &LATIN_RANGES), Some(cp));
        }
        // hyphen lands at the final index, 63.
        assert_eq!(encode_ranges(0x2D, &LATIN_RANGES), Some(63));
        assert_eq!(decode_ranges(63, &LATIN_RANGES), Some(0x2D));
    }

    #[test]
    fn encode_ranges_rejects_values_outside_union() {
        assert_eq!(encode_ranges(0x80, &LATIN_RANGES), None);
        assert_eq!(decode_ranges(64, &LATIN_RANGES), None);
    }
}
