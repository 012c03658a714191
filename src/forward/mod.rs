mod escape;
mod url;

pub use escape::{escape_url, is_wellformed_payload, unescape_url, EscapeError, ESCAPE_MARK};
pub use url::{
    extract_flags, parse_encoded_path, to_base_url, to_jgloss_url, EncodedPath, ForwardingFlags,
};
