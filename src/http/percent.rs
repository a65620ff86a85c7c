//! Percent-encoding codec
//!
//! Byte-exact percent encoding and decoding per the RFC 3986 unreserved
//! rules. Encoding works per Unicode code point: an unreserved character is
//! copied through, anything else contributes one uppercase `%XX` triplet per
//! UTF-8 byte. Decoding accumulates raw bytes first and reassembles UTF-8 at
//! the end, so multi-byte sequences split across several triplets come back
//! as one character.

use super::{Error, Result};

/// Unreserved characters, never percent-encoded.
fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')
}

fn encode_with(input: &str, keep: impl Fn(char) -> bool) -> (String, usize) {
    let mut out = String::with_capacity(input.len());
    let mut byte_count = 0;
    let mut utf8 = [0u8; 4];

    for c in input.chars() {
        if keep(c) {
            out.push(c);
            byte_count += 1;
        } else {
            for byte in c.encode_utf8(&mut utf8).as_bytes() {
                out.push('%');
                out.push_str(&format!("{byte:02X}"));
                byte_count += 1;
            }
        }
    }

    (out, byte_count)
}

/// Percent-encode with the strict charset: only unreserved characters pass.
///
/// Returns the encoded string together with the number of bytes it stands
/// for (the UTF-8 length of the input), which callers use to size
/// `Content-Length` for form bodies.
pub fn encode(input: &str) -> (String, usize) {
    encode_with(input, is_unreserved)
}

/// Percent-encode with the path charset: unreserved characters plus `/`.
pub fn encode_path(input: &str) -> (String, usize) {
    encode_with(input, |c| is_unreserved(c) || c == '/')
}

/// Percent-decode a string.
///
/// A `%` followed by two hex digits contributes one raw byte; a `%` with
/// fewer than two characters remaining is taken literally. Any other
/// character contributes its own UTF-8 bytes. The accumulated byte sequence
/// must be valid UTF-8 once fully assembled.
pub fn decode(input: &str) -> Result<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut bytes = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '%' && i + 2 < chars.len() {
            let hex: String = chars[i + 1..i + 3].iter().collect();
            let byte = u8::from_str_radix(&hex, 16)
                .map_err(|_| Error::Decode(format!("invalid hex digits in escape: %{hex}")))?;
            bytes.push(byte);
            i += 3;
        } else {
            let mut utf8 = [0u8; 4];
            bytes.extend_from_slice(chars[i].encode_utf8(&mut utf8).as_bytes());
            i += 1;
        }
    }

    String::from_utf8(bytes)
        .map_err(|_| Error::Decode("escapes do not form valid UTF-8".to_string()))
}
