//! Percent-encoding and decoding of URL query/path components.

pub mod codec;
pub mod error;
pub mod utils;

pub use codec::{quote, quote_chunks, unquote, unquote_chunks, OutputKind, Quoted};
pub use error::{QuoteError, Result};

#[macro_export]
macro_rules! log_debug {
    ($target:expr, $($arg:tt)*) => {
        $crate::utils::log::debug($target, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($target:expr, $($arg:tt)*) => {
        $crate::utils::log::info($target, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($target:expr, $($arg:tt)*) => {
        $crate::utils::log::error($target, &format!($($arg)*))
    };
}
