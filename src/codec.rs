//! Percent-encoding ("quoting") and percent-decoding ("unquoting") of URL
//! query/path components.
//!
//! Safe bytes (ALPHA / DIGIT / `.` / `-` / `~` / `_`) pass through
//! unchanged; every other byte is escaped as a `%xx` triplet with lowercase
//! hex digits. Unquoting accepts either digit case and additionally maps
//! `+` to a space, since web forms commonly encode spaces that way.

use std::str::FromStr;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{QuoteError, Result};
use crate::utils::FlattenExt;

/// Lowercase hex digits, indexed by nibble value.
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Output representation for [`quote`] and [`unquote`].
///
/// `Buffer` yields a contiguous shared buffer, `List` an owned byte vector.
/// The selector is explicit rather than inferred from the input shape, so
/// the same input always produces the same representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Buffer,
    List,
}

impl FromStr for OutputKind {
    type Err = QuoteError;

    /// Accepts the selector spellings `"binary"` and `"list"`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "binary" => Ok(OutputKind::Buffer),
            "list" => Ok(OutputKind::List),
            other => Err(QuoteError::InvalidArgument(format!(
                "unknown output kind: {other}"
            ))),
        }
    }
}

/// A transformed byte sequence, in the representation the caller selected
/// with [`OutputKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quoted {
    Buffer(Bytes),
    List(Vec<u8>),
}

impl Quoted {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Quoted::Buffer(buf) => buf,
            Quoted::List(list) => list,
        }
    }

    pub fn into_vec(self) -> Vec<u8> {
        match self {
            Quoted::Buffer(buf) => Vec::from(buf),
            Quoted::List(list) => list,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl AsRef<[u8]> for Quoted {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// True for bytes that never need escaping:
/// ALPHA / DIGIT / `.` / `-` / `~` / `_`.
pub fn is_safe(byte: u8) -> bool {
    matches!(byte,
        b'0'..=b'9'
        | b'A'..=b'Z'
        | b'a'..=b'z'
        | b'.' | b'-' | b'~' | b'_')
}

/// True iff `byte` is an ASCII hex digit (`0-9`, `A-F`, `a-f`).
pub fn is_hex_digit(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'A'..=b'F' | b'a'..=b'f')
}

/// Nibble value of a hex digit, or `None` for any other byte.
fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}

/// Lowercase ASCII hex digit for the low nibble of `value`.
fn hex_digit(value: u8) -> u8 {
    HEX_DIGITS[(value & 0x0f) as usize]
}

/// Percent-encode `input`.
///
/// Safe bytes are copied unchanged; every other byte `b` becomes the three
/// bytes `%`, `hex(b >> 4)`, `hex(b & 0x0f)` with lowercase digits. Total
/// over all inputs, and a pure function of them.
pub fn quote(input: &[u8], kind: OutputKind) -> Quoted {
    // Worst case every byte becomes "%xx"; the handoff below trims the
    // buffer to the written length.
    let mut out = BytesMut::with_capacity(input.len() * 3);
    for &byte in input {
        if is_safe(byte) {
            out.put_u8(byte);
        } else {
            out.put_u8(b'%');
            out.put_u8(hex_digit(byte >> 4));
            out.put_u8(hex_digit(byte));
        }
    }
    into_output(out, kind)
}

/// Percent-decode `input`.
///
/// `+` decodes to a space and `%XX` to the byte value of its two hex digits
/// (either case accepted). A `%` with fewer than two following bytes, or
/// with a non-hex byte in either digit position, fails with
/// [`QuoteError::InvalidEscape`] carrying the offset of the `%`; nothing is
/// returned alongside the error.
pub fn unquote(input: &[u8], kind: OutputKind) -> Result<Quoted> {
    // Decoding only shrinks or preserves the length.
    let mut out = BytesMut::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            b'%' => {
                let hi = input.get(i + 1).copied().and_then(hex_value);
                let lo = input.get(i + 2).copied().and_then(hex_value);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => out.put_u8((hi << 4) | lo),
                    _ => return Err(QuoteError::InvalidEscape(i)),
                }
                i += 3;
            }
            // Spaces may arrive as "%20" or "+". Quoting always emits
            // "%20"; "+" is accepted here for web-form compatibility.
            b'+' => {
                out.put_u8(b' ');
                i += 1;
            }
            byte => {
                out.put_u8(byte);
                i += 1;
            }
        }
    }
    Ok(into_output(out, kind))
}

/// Flatten `chunks` into one contiguous buffer, then [`quote`] it.
pub fn quote_chunks<T: AsRef<[u8]>>(chunks: &[T], kind: OutputKind) -> Quoted {
    quote(&chunks.flatten_chunks(), kind)
}

/// Flatten `chunks` into one contiguous buffer, then [`unquote`] it.
pub fn unquote_chunks<T: AsRef<[u8]>>(chunks: &[T], kind: OutputKind) -> Result<Quoted> {
    unquote(&chunks.flatten_chunks(), kind)
}

fn into_output(buf: BytesMut, kind: OutputKind) -> Quoted {
    match kind {
        OutputKind::Buffer => Quoted::Buffer(buf.freeze()),
        OutputKind::List => Quoted::List(Vec::from(buf)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote_vec(input: &[u8]) -> Vec<u8> {
        quote(input, OutputKind::Buffer).into_vec()
    }

    fn unquote_vec(input: &[u8]) -> Result<Vec<u8>> {
        unquote(input, OutputKind::Buffer).map(Quoted::into_vec)
    }

    #[test]
    fn quotes_safe_bytes_unchanged() {
        let safe = b"Az09-._~";
        assert_eq!(quote_vec(safe), safe);
    }

    #[test]
    fn quotes_unsafe_bytes_as_lowercase_hex() {
        assert_eq!(quote_vec(b"a b/c"), b"a%20b%2fc");
        assert_eq!(quote_vec(b"+"), b"%2b");
    }

    #[test]
    fn quotes_binary_bytes() {
        assert_eq!(quote_vec(&[0x00, 0xff]), b"%00%ff");
    }

    #[test]
    fn unquotes_plus_as_space() {
        assert_eq!(unquote_vec(b"a+b").unwrap(), b"a b");
    }

    #[test]
    fn unquotes_hex_escapes_in_either_case() {
        assert_eq!(unquote_vec(b"%2B").unwrap(), b"+");
        assert_eq!(unquote_vec(b"%2b").unwrap(), b"+");
    }

    #[test]
    fn unquote_rejects_truncated_escape() {
        assert_eq!(unquote_vec(b"%"), Err(QuoteError::InvalidEscape(0)));
        assert_eq!(unquote_vec(b"ab%2"), Err(QuoteError::InvalidEscape(2)));
    }

    #[test]
    fn unquote_rejects_non_hex_escape() {
        assert_eq!(unquote_vec(b"%zz"), Err(QuoteError::InvalidEscape(0)));
        // One valid digit is not enough.
        assert_eq!(unquote_vec(b"%2z"), Err(QuoteError::InvalidEscape(0)));
        assert_eq!(unquote_vec(b"%z2"), Err(QuoteError::InvalidEscape(0)));
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(quote_vec(b""), b"");
        assert_eq!(unquote_vec(b"").unwrap(), b"");
    }

    #[test]
    fn round_trips_every_byte() {
        let all: Vec<u8> = (0u8..=255).collect();
        let quoted = quote(&all, OutputKind::Buffer);
        assert!(quoted.len() <= 3 * all.len());
        let unquoted = unquote(quoted.as_bytes(), OutputKind::Buffer).unwrap();
        assert_eq!(unquoted.into_vec(), all);
    }

    #[test]
    fn unquote_never_grows_the_input() {
        let inputs: [&[u8]; 4] = [b"abc", b"a+b+c", b"%20%20", b"plain%2fmixed+input"];
        for input in inputs {
            let unquoted = unquote(input, OutputKind::Buffer).unwrap();
            assert!(unquoted.len() <= input.len());
        }
    }

    #[test]
    fn quoted_triplets_never_encode_safe_bytes() {
        let all: Vec<u8> = (0u8..=255).collect();
        let quoted = quote_vec(&all);
        let mut i = 0;
        while i < quoted.len() {
            if quoted[i] == b'%' {
                let value =
                    (hex_value(quoted[i + 1]).unwrap() << 4) | hex_value(quoted[i + 2]).unwrap();
                assert!(!is_safe(value));
                i += 3;
            } else {
                assert!(is_safe(quoted[i]));
                i += 1;
            }
        }
    }

    #[test]
    fn output_kinds_hold_the_same_bytes() {
        let input = b"a b+c%";
        let buffer = quote(input, OutputKind::Buffer);
        let list = quote(input, OutputKind::List);
        assert_eq!(buffer.as_bytes(), list.as_bytes());
        assert!(matches!(buffer, Quoted::Buffer(_)));
        assert!(matches!(list, Quoted::List(_)));
    }

    #[test]
    fn chunked_input_matches_contiguous() {
        let chunks: [&[u8]; 3] = [b"a ", b"b/", b"c"];
        assert_eq!(
            quote_chunks(&chunks, OutputKind::Buffer),
            quote(b"a b/c", OutputKind::Buffer)
        );

        let encoded: [&[u8]; 2] = [b"a%2", b"0b"];
        let unquoted = unquote_chunks(&encoded, OutputKind::Buffer).unwrap();
        assert_eq!(unquoted.into_vec(), b"a b");
    }

    #[test]
    fn output_kind_parses_selector_strings() {
        assert_eq!("binary".parse::<OutputKind>().unwrap(), OutputKind::Buffer);
        assert_eq!("list".parse::<OutputKind>().unwrap(), OutputKind::List);
        assert!(matches!(
            "tuple".parse::<OutputKind>(),
            Err(QuoteError::InvalidArgument(_))
        ));
    }

    #[test]
    fn classifies_hex_digits() {
        for byte in b"0123456789abcdefABCDEF" {
            assert!(is_hex_digit(*byte));
        }
        assert!(!is_hex_digit(b'g'));
        assert!(!is_hex_digit(b'%'));
    }
}
