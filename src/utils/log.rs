use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock};

/// Severity for CLI diagnostics. Filtering is by minimum level.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum LogLevel {
    Debug,
    Info,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
        }
    }

    fn from_u8(value: u8) -> LogLevel {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            _ => LogLevel::Error,
        }
    }
}

static MIN_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
static HANDLER: OnceLock<Mutex<Box<dyn LogHandler>>> = OnceLock::new();

/// Sink for formatted log lines. Swappable so embedders can redirect output.
pub trait LogHandler: Send + Sync {
    fn handle(&self, level: LogLevel, msg: &str);
}

/// Default handler: errors to stderr, everything else to stdout.
pub struct ConsoleLogger;

impl LogHandler for ConsoleLogger {
    fn handle(&self, level: LogLevel, msg: &str) {
        if level == LogLevel::Error {
            eprintln!("{}", msg);
        } else {
            println!("{}", msg);
        }
    }
}

pub fn set_log_level(level: LogLevel) {
    MIN_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn set_log_handler(handler: Box<dyn LogHandler>) {
    let mut guard = handler_slot().lock().expect("log handler poisoned");
    *guard = handler;
}

fn handler_slot() -> &'static Mutex<Box<dyn LogHandler>> {
    HANDLER.get_or_init(|| Mutex::new(Box::new(ConsoleLogger)))
}

pub fn log(level: LogLevel, target: &str, msg: &str) {
    if level < LogLevel::from_u8(MIN_LEVEL.load(Ordering::Relaxed)) {
        return;
    }
    let line = format!("[{}] [{}] {}", level.as_str(), target, msg);
    handler_slot()
        .lock()
        .expect("log handler poisoned")
        .handle(level, &line);
}

pub fn debug(target: &str, msg: &str) {
    log(LogLevel::Debug, target, msg);
}

pub fn info(target: &str, msg: &str) {
    log(LogLevel::Info, target, msg);
}

pub fn error(target: &str, msg: &str) {
    log(LogLevel::Error, target, msg);
}
