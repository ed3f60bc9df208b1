//! Environment-driven tuning, read once per process.
//!
//! - `QR_PARALLEL_MASKS` (0/1)
//! - `QR_PARALLEL_MIN_VERSION` (1..=40)

use std::sync::OnceLock;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static PARALLEL_MASKS: OnceLock<bool> = OnceLock::new();

/// Score the eight mask candidates on the rayon pool
pub(crate) fn parallel_masks() -> bool {
    *PARALLEL_MASKS.get_or_init(|| parse_env_bool_u8("QR_PARALLEL_MASKS", true))
}

static PARALLEL_MIN_VERSION: OnceLock<usize> = OnceLock::new();

/// Smallest version worth scoring masks in parallel
pub(crate) fn parallel_min_version() -> usize {
    *PARALLEL_MIN_VERSION
        .get_or_init(|| parse_env_usize("QR_PARALLEL_MIN_VERSION", 10).clamp(1, 40))
}
