use serde::Serialize;

use super::escape::{escape_url, unescape_url, EscapeError};

/// Forwarding policy bits carried in the two flag characters of a
/// forwarding URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForwardingFlags {
    pub forward_cookies: bool,
    pub forward_form_data: bool,
}

impl ForwardingFlags {
    fn as_digits(&self) -> [char; 2] {
        [
            if self.forward_cookies { '1' } else { '0' },
            if self.forward_form_data { '1' } else { '0' },
        ]
    }
}

/// Decoded servlet path info of the form `/<c><f>/<escaped>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedPath {
    pub forward_cookies: bool,
    pub forward_form_data: bool,
    pub base_url: String,
}

/// Build a URL which forwards `url` through the servlet at `servlet_url`:
/// the servlet URL, a segment with the two flag digits, and the escaped
/// target as the final segment.
///
/// Purely syntactic; `servlet_url` is not validated beyond the
/// trailing-slash check.
pub fn to_jgloss_url(
    url: &str,
    servlet_url: &str,
    forward_cookies: bool,
    forward_form_data: bool,
) -> Result<String, EscapeError> {
    let flags = ForwardingFlags {
        forward_cookies,
        forward_form_data,
    };

    let mut out = String::with_capacity(servlet_url.len() + 4 + url.len() * 3);
    out.push_str(servlet_url);
    if !out.ends_with('/') {
        out.push('/');
    }
    for digit in flags.as_digits() {
        out.push(digit);
    }
    out.push('/');
    out.push_str(&escape_url(url)?);

    Ok(out)
}

/// Recover the original target URL from a forwarding URL.
///
/// The payload is everything after the last `/`. Returns `None` when there
/// is no `/` at all, which means the input is not a recognizable
/// forwarding URL.
pub fn to_base_url(url: &str) -> Option<String> {
    let slash = url.rfind('/')?;
    Some(unescape_url(&url[slash + 1..]))
}

/// Read the two flag digits immediately before the last `/`.
///
/// Only valid when that `/` sits at index > 2, so short or malformed URLs
/// yield `None` instead of underflowing.
pub fn extract_flags(url: &str) -> Option<ForwardingFlags> {
    let slash = url.rfind('/')?;
    if slash <= 2 {
        return None;
    }

    let bytes = url.as_bytes();
    Some(ForwardingFlags {
        forward_cookies: bytes[slash - 2] == b'1',
        forward_form_data: bytes[slash - 1] == b'1',
    })
}

/// Parse the path info part of a call to the forwarding servlet.
///
/// `path` includes the leading `/`; the flag digits sit at offsets 1 and 2,
/// the escaped target starts at offset 4. The target must be at least one
/// character long.
pub fn parse_encoded_path(path: &str) -> Option<EncodedPath> {
    let bytes = path.as_bytes();
    if bytes.len() < 5 || bytes[3] != b'/' {
        return None;
    }

    Some(EncodedPath {
        forward_cookies: bytes[1] == b'1',
        forward_form_data: bytes[2] == b'1',
        base_url: unescape_url(&path[4..]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_flags_and_escaped_payload() {
        assert_eq!(
            to_jgloss_url("http://x.com/a", "http://proxy/svc", true, false).unwrap(),
            "http://proxy/svc/10/http_3a_2f_2fx.com_2fa"
        );
    }

    #[test]
    fn does_not_double_the_trailing_slash() {
        assert_eq!(
            to_jgloss_url("a", "http://proxy/svc/", false, true).unwrap(),
            "http://proxy/svc/01/a"
        );
    }

    #[test]
    fn compose_propagates_escape_failure() {
        assert!(to_jgloss_url("漢字", "http://proxy/svc", false, false).is_err());
    }

    #[test]
    fn decomposes_back_to_the_original() {
        assert_eq!(
            to_base_url("http://proxy/svc/10/http_3a_2f_2fx.com_2fa").as_deref(),
            Some("http://x.com/a")
        );
    }

    #[test]
    fn decompose_without_separator_is_none() {
        assert_eq!(to_base_url("noSlashesHere"), None);
    }

    #[test]
    fn decompose_with_trailing_slash_is_empty() {
        assert_eq!(to_base_url("http://proxy/svc/10/").as_deref(), Some(""));
    }

    #[test]
    fn extracts_both_flag_combinations() {
        let url = to_jgloss_url("a", "http://proxy/svc", true, false).unwrap();
        assert_eq!(
            extract_flags(&url),
            Some(ForwardingFlags {
                forward_cookies: true,
                forward_form_data: false,
            })
        );

        let url = to_jgloss_url("a", "http://proxy/svc", false, true).unwrap();
        assert_eq!(
            extract_flags(&url),
            Some(ForwardingFlags {
                forward_cookies: false,
                forward_form_data: true,
            })
        );
    }

    #[test]
    fn flag_extraction_guards_short_urls() {
        // The last '/' sits at index 2, leaving no room for two flag digits.
        assert_eq!(extract_flags("10/a"), None);
        assert_eq!(extract_flags("/a"), None);
        assert_eq!(extract_flags("nope"), None);
    }

    #[test]
    fn parses_servlet_path_info() {
        assert_eq!(
            parse_encoded_path("/10/http_3a_2f_2fx.com"),
            Some(EncodedPath {
                forward_cookies: true,
                forward_form_data: false,
                base_url: "http://x.com".to_string(),
            })
        );
    }

    #[test]
    fn rejects_path_info_without_target() {
        assert_eq!(parse_encoded_path("/10/"), None);
        assert_eq!(parse_encoded_path("/10"), None);
        assert_eq!(parse_encoded_path(""), None);
    }

    #[test]
    fn rejects_path_info_with_misplaced_separator() {
        assert_eq!(parse_encoded_path("/100/abc"), None);
    }
}
