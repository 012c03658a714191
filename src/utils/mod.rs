pub mod hex;
pub mod log;

pub use hex::{bin_to_hex, hex_to_bin};
pub use log::{set_global_log_level, LogLevel};
