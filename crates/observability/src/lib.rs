//! `cepflow-observability`: log subscriber setup for binaries and test suites.
//!
//! [`init`] reads `RUST_LOG` and `CEPFLOW_LOG_FORMAT`; use
//! [`tracing::init_with`] to pick a [`LogFormat`] explicitly.

pub mod tracing;

pub use tracing::{LogFormat, init_with};

/// Install the global subscriber using the format named in the environment.
///
/// Only the first call in a process has an effect.
pub fn init() {
    tracing::init();
}
