use std::sync::{
    atomic::{AtomicU8, Ordering},
    OnceLock,
};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

static GLOBAL_LOG_LEVEL: OnceLock<AtomicU8> = OnceLock::new();

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn from_u8(val: u8) -> LogLevel {
        match val {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warning,
            _ => LogLevel::Error,
        }
    }
}

fn current_global_level() -> LogLevel {
    let stored = GLOBAL_LOG_LEVEL
        .get_or_init(|| AtomicU8::new(LogLevel::Warning as u8))
        .load(Ordering::Relaxed);
    LogLevel::from_u8(stored)
}

pub fn set_global_log_level(level: LogLevel) {
    GLOBAL_LOG_LEVEL
        .get_or_init(|| AtomicU8::new(level as u8))
        .store(level as u8, Ordering::Relaxed);
}

/// Log to stderr, keeping stdout free for command output.
pub fn log(level: LogLevel, name: &str, msg: &str) {
    if level < current_global_level() {
        return;
    }

    eprintln!("[{}] [{}] {}", level.as_str(), name, msg);
}

pub fn debug(name: &str, msg: &str) {
    log(LogLevel::Debug, name, msg);
}

pub fn warn(name: &str, msg: &str) {
    log(LogLevel::Warning, name, msg);
}
