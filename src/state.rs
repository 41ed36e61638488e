//! The three variables that parameterise a single encode or decode call.

/// Codec state threaded through one `encode` or `decode` call.
///
/// There is no cross-call state: every call starts from [`State::initial`]
/// and the caller never constructs or inspects a `State` directly except
/// through that constructor. Keeping it as an explicit value (rather than
/// hidden fields on the encoder/decoder) means the step functions in
/// [`crate::encode`] and [`crate::decode`] are ordinary total functions of
/// `(State, input)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// High bits of the active base alphabet. `0` means the Latin window.
    pub offs: u32,
    /// Base of the 64-codepoint auxiliary alphabet. `0` means the Latin
    /// remap (see [`crate::tables::LATIN_RANGES`]) rather than a linear
    /// offset.
    pub aux_offs: u32,
    /// `true` only immediately after a 21-bit switch; any 13-bit-producing
    /// variant or Hiragana/Katakana extra resets it to `false`.
    pub is_21_bit: bool,
}

impl State {
    /// The state every `encode`/`decode` call begins from.
    ///
    /// `aux_offs` starts at `0`, not `0x00C0`: the Latin-remap AUX path
    /// (`0xC0..=0xFF` mapping directly to the 64-entry Latin table) must be
    /// available for the very first codepoint of a string -- see DESIGN.md
    /// for why the literal `0x00C0` some descriptions of this format give
    /// for the initial `aux_offs` can't be right, and produces a
    /// `0x00C0` value only once the encoder has already left the Latin
    /// window for a non-Latin base alphabet.
    pub const fn initial() -> State {
        State {
            offs: 0,
            aux_offs: 0,
            is_21_bit: false,
        }
    }

    /// `13-bit` base window mask: `offs` covers `[offs, offs+0x80)`.
    pub const MASK_13: u32 = 0xFFFF_FF80;
    /// `21-bit` base window mask: `offs` covers `[offs, offs+0x8000)`.
    pub const MASK_21: u32 = 0xFFFF_8000;
}

impl Default for State {
    fn default() -> State {
        State::initial()
    }
}
