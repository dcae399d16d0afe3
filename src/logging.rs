//! Tracing subscriber setup.
//!
//! The crates only emit `tracing` events; installing a subscriber is left to
//! the application. These helpers install the usual fmt subscriber with an
//! `EnvFilter`, where `RUST_LOG` overrides the default directive.

use tracing_subscriber::EnvFilter;

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install a global fmt subscriber.
///
/// `default` is used when `RUST_LOG` is unset or invalid, e.g. `"info"` or
/// `"yandex_direct_client=debug"`.
///
/// # Panics
///
/// Panics if a global subscriber is already installed; use [`try_init`]
/// where that can happen.
pub fn init(default: &str) {
    tracing_subscriber::fmt().with_env_filter(filter(default)).init();
}

/// Like [`init`], but returns `false` instead of panicking when a global
/// subscriber is already installed.
pub fn try_init(default: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter(default))
        .try_init()
        .is_ok()
}
