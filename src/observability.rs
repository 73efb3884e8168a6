//! Logging initialization for embedding applications and ad-hoc debugging.
//!
//! The library itself only ever talks to the `log` facade; nothing here runs
//! unless the host asks for it.

/// Installs an `env_logger` backend at `info` unless `RUST_LOG` says
/// otherwise. Safe to call more than once; later calls are no-ops.
pub fn enable_verbose_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .try_init();
}
