/* Copyright (c) 2022 Jeremy Davis (jeremydavis519@gmail.com)
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the "Software"), to deal in the Software without restriction,
 * including without limitation the rights to use, copy, modify, merge, publish, distribute,
 * sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT
 * NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 */

//! Conversions between Rust's UTF-8 `String` and the UTF-16 code-unit offsets that `CharacterData`
//! and `Range` boundary points are defined in terms of
//! (<https://dom.spec.whatwg.org/#concept-cd-substring>).
//!
//! `CharacterData`'s `data` is stored as `Vec<u16>` throughout this crate so that offsets match
//! the standard directly; these helpers are only needed at the boundary with ordinary Rust
//! strings (constructing a node from a `&str`, or handing `data()` back out as one).

/// The UTF-16 length of a string, in code units (not `char`s, not bytes).
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Converts a Rust string into its UTF-16 code units.
pub fn to_utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Converts UTF-16 code units back into a Rust string, replacing unpaired surrogates with
/// U+FFFD as `String::from_utf16_lossy` does.
pub fn from_utf16(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

/// Returns the UTF-16 subsequence `[start, end)`, clamping `end` to the data's length.
///
/// Used by `substringData`/`splitText`/`Range.toString`, which all work in UTF-16 code-unit
/// offsets regardless of the host string's native encoding.
pub fn utf16_slice(units: &[u16], start: usize, end: usize) -> &[u16] {
    let end = end.min(units.len());
    if start >= end {
        &[]
    } else {
        &units[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surrogate_pair_counts_as_two_code_units() {
        // U+1D11E (MUSICAL SYMBOL G CLEF) is one `char` but two UTF-16 code units.
        let s = "\u{1D11E}";
        assert_eq!(utf16_len(s), 2);
        assert_eq!(to_utf16(s).len(), 2);
    }

    #[test]
    fn combining_diaeresis_is_five_utf16_units() {
        // combining diaereses add code units a char count would miss.
        let s = "A\u{0308}b\u{0308}c";
        assert_eq!(utf16_len(s), 5);
    }

    #[test]
    fn round_trips_through_utf16() {
        let s = "hello \u{1F600} world";
        let units = to_utf16(s);
        assert_eq!(from_utf16(&units), s);
    }
}
