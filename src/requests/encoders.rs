//! percent-encoding primitives shared by the mutant renderers; all encoding
//! of payload text funnels through [`quote_plus`] so every position kind
//! agrees on the unreserved/reserved character split
use percent_encoding::percent_encode_byte;

/// safe-character set for the default encoding policy: nothing beyond the
/// unreserved characters survives encoding
pub const DEFAULT_SAFE_CHARS: &str = "";

/// slash-preserving safe-character set, for targets sitting behind a
/// path-rewriting layer that decodes once before the application sees the
/// value
pub const SLASH_SAFE_CHARS: &str = "/";

/// percent-encode `input`, leaving ascii alphanumerics, the unreserved
/// characters `_ . - ~`, and any character of `safe` untouched; spaces
/// become `+`
///
/// non-ascii input is encoded byte-by-byte as utf-8. characters of `safe`
/// outside the ascii range are ignored.
///
/// # Examples
///
/// ```
/// # use mutantkit::requests::encoders::quote_plus;
/// assert_eq!(quote_plus("' OR 1=1", ""), "%27+OR+1%3D1");
/// assert_eq!(quote_plus("../etc/passwd", ""), "..%2Fetc%2Fpasswd");
/// assert_eq!(quote_plus("../etc/passwd", "/"), "../etc/passwd");
/// ```
#[must_use]
pub fn quote_plus(input: &str, safe: &str) -> String {
    let mut encoded = String::with_capacity(input.len() * 3);

    for &byte in input.as_bytes() {
        if byte == b' ' {
            encoded.push('+');
        } else if is_safe(byte, safe) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(percent_encode_byte(byte));
        }
    }

    encoded
}

/// whether the given byte survives [`quote_plus`] unencoded
fn is_safe(byte: u8, safe: &str) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(byte, b'_' | b'.' | b'-' | b'~')
        || (byte.is_ascii() && safe.as_bytes().contains(&byte))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_plus_encodes_reserved_characters() {
        assert_eq!(quote_plus("a&b=c?d", ""), "a%26b%3Dc%3Fd");
    }

    #[test]
    fn quote_plus_leaves_unreserved_characters_alone() {
        assert_eq!(quote_plus("AZaz09_.-~", ""), "AZaz09_.-~");
    }

    #[test]
    fn quote_plus_turns_spaces_into_plus() {
        assert_eq!(quote_plus("a b", ""), "a+b");
        // a literal plus must be encoded or it would read back as a space
        assert_eq!(quote_plus("a+b", ""), "a%2Bb");
    }

    #[test]
    fn quote_plus_honors_the_safe_set() {
        assert_eq!(quote_plus("a/b:c", "/:"), "a/b:c");
        assert_eq!(quote_plus("a/b:c", "/"), "a/b%3Ac");
    }

    #[test]
    fn quote_plus_encodes_utf8_bytes_individually() {
        assert_eq!(quote_plus("ñ", ""), "%C3%B1");
    }

    #[test]
    fn double_application_encodes_the_percent_signs() {
        let once = quote_plus("'", "");
        let twice = quote_plus(&once, "");

        assert_eq!(once, "%27");
        assert_eq!(twice, "%2527");
    }
}
