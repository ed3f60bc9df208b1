//! Opt-in stderr diagnostics for the encoding pipeline.

use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// True when `QR_DEBUG` is set (any value).
pub(crate) fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var_os("QR_DEBUG").is_some())
}

/// Print a diagnostic line in debug builds when `QR_DEBUG` is set.
macro_rules! trace {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) && $crate::debug::debug_enabled() {
            eprintln!("[qr] {}", format_args!($($arg)*));
        }
    };
}

pub(crate) use trace;
