// -*- mode: rust; bidi-display-reordering: nil -*-

/*! # UTF-C -- a stateful, variable-length compact Unicode encoding.

UTF-C packs many short Unicode strings into fewer bytes than UTF-8 by
keeping a little state across a single string: once the encoder has seen a
non-Latin letter, later letters from the same script cost one byte instead
of two or three, because the codec remembers which 128-codepoint "window"
of Unicode is currently in play.

This is **not** a wire format. Produced bytes are not ASCII-transparent for
arbitrary input (many encode to values with the top bit set that UTF-8
never produces for equivalent text), not self-synchronising (you cannot
seek into the middle of an encoded buffer and resume decoding), and not
hardened against adversarial input. Use it to shrink a large in-memory pile
of short strings (log lines, user-facing labels, identifiers), not to
replace UTF-8 on a wire or at a trust boundary.

## Usage

```
let bytes = utfc::encode("Hello World!".chars());
assert_eq!(utfc::decode(&bytes).unwrap(), "Hello World!");
```

or via the iterator extension trait, mirroring `str::chars()`:

```
use utfc::EncodeUtfc;
let bytes = "Привет".chars().encode_utfc();
assert_eq!(utfc::decode(&bytes).unwrap(), "Привет");
```

## How it packs

Every codepoint is coded as one of five variants, chosen greedily for
whichever is shortest given the current state:

- a 1-byte `AUX` code when the codepoint is in the Latin alphanumeric remap
  (`0xC0..=0xFF`, compatible with a subset of CP-1252) or in the current
  64-codepoint auxiliary window;
- a 1-byte `BASE` code when the codepoint is already inside the active
  128-codepoint (or, after a 21-bit switch, 32768-codepoint) window;
- a 2-byte `EXTRA` code for punctuation, CJK symbols, Hiragana/Katakana,
  variation selectors, and a few emoji blocks;
- a 2-byte `SHIFT13` switch that moves the active window to cover the given
  codepoint's script;
- a 3-byte `SHIFT21` switch for codepoints outside the Basic Multilingual
  Plane.

Pure ASCII text encodes byte-for-byte identically to UTF-8. See the module
docs on [`encode`] and [`decode`] for the exact bit layout, and [`tables`]
for the static data the codec is built on.
*/

pub mod decode;
pub mod encode;
pub mod state;
pub mod tables;

pub use decode::{decode, decode_iter, DecodeError, DecodeUtfcIter};
pub use encode::{encode, encode_scalars, EncodeError, EncodeUtfc};
pub use state::State;

/// A `char` sequence usable as an [`arbitrary::Arbitrary`] fuzz/property
/// input, kept free of surrogates by construction (`arbitrary`'s own
/// `char` generator already guarantees that).
///
/// This is what the crate's `arbitrary` dependency is for: a `cargo fuzz`
/// target placed under `fuzz/` can generate a `Corpus` and assert
/// `decode(&encode(c.0.iter().copied())) == Ok(c.0.into_iter().collect())`
/// without hand-rolling a codepoint generator. The fuzz target itself
/// ships outside this crate's normal build, as is conventional for crates
/// that carry `arbitrary` as a direct dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus(pub Vec<char>);

impl<'a> arbitrary::Arbitrary<'a> for Corpus {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Corpus> {
        Ok(Corpus(Vec::<char>::arbitrary(u)?))
    }
}
