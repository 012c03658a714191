use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::utils::{bin_to_hex, hex_to_bin};

/// Marker starting a three-character escape token.
pub const ESCAPE_MARK: char = '_';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EscapeError {
    /// The escape token carries a single byte, so only characters up to
    /// U+00FF can be embedded in a payload.
    #[error("character {ch:?} at position {pos} is outside Latin-1 and cannot be escaped")]
    CharOutOfRange { ch: char, pos: usize },
}

/// Characters kept literally in an escaped payload: ASCII alphanumerics and
/// the unreserved marks. `'_'` is NOT safe, it is reserved as the escape mark.
fn is_safe(c: char) -> bool {
    matches!(c,
        'a'..='z'
        | 'A'..='Z'
        | '0'..='9'
        | '-' | '.' | '!' | '~' | '*' | '\'' | '(' | ')'
    )
}

/// Escape a URL so it survives as a single path segment.
///
/// The standard `%` mechanism cannot be used since a web server may or may
/// not unescape the path before handing it to the forwarding servlet, so
/// unsafe characters become `_` followed by a lowercase hex pair instead.
///
/// Characters above U+00FF do not fit in a one-byte token and are rejected.
pub fn escape_url(url: &str) -> Result<String, EscapeError> {
    // In the worst case, every character becomes "_hh" (3 chars)
    let mut out = String::with_capacity(url.len() * 3);

    for (pos, ch) in url.char_indices() {
        if is_safe(ch) {
            out.push(ch);
            continue;
        }

        let code = ch as u32;
        if code > 0xff {
            return Err(EscapeError::CharOutOfRange { ch, pos });
        }
        out.push(ESCAPE_MARK);
        out.push_str(&bin_to_hex(code as u8));
    }

    Ok(out)
}

/// Unescape a payload produced by [`escape_url`].
///
/// Every `_` starting a full three-character token is decoded; a `_` with
/// fewer than two characters after it is kept literally. Lenient on
/// malformed tokens: the hex pair is decoded by position, not validated.
pub fn unescape_url(url: &str) -> String {
    let chars: Vec<char> = url.chars().collect();
    let mut out = String::with_capacity(url.len());

    let mut i = 0;
    while i < chars.len() {
        if chars[i] == ESCAPE_MARK && i + 2 < chars.len() {
            let pair: String = chars[i + 1..i + 3].iter().collect();
            out.push(hex_to_bin(&pair) as char);
            i += 3;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    out
}

static PAYLOAD_RE: OnceLock<Regex> = OnceLock::new();

/// Check that a payload uses only the wire alphabet: safe literals and
/// well-formed `_hh` tokens.
///
/// Diagnostic only; [`unescape_url`] itself stays lenient.
pub fn is_wellformed_payload(payload: &str) -> bool {
    let re = PAYLOAD_RE.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z0-9.!~*'()-]|_[0-9a-f]{2})*$").expect("invalid payload pattern")
    });
    re.is_match(payload)
}
