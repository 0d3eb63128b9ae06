pub mod bytes;
pub mod log;

pub use bytes::FlattenExt;
pub use log::{
    set_log_handler,
    set_log_level,
    ConsoleLogger,
    LogHandler,
    LogLevel,
};
