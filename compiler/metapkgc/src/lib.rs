//! Metapkg driver - configuration, CLI parsing and the run pipeline behind
//! the `metapkg` binary.

pub mod cli;
pub mod config;
mod error;
pub mod pipeline;

use std::sync::Once;

pub use cli::{parse_args, Invocation, UsageError};
pub use config::{HarnessConfig, LoaderSource, DEFAULT_OUTPUT, EXPORTER_ENV};
pub use error::HarnessError;
pub use pipeline::{loader_for, run};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber when `RUST_LOG` is set. Safe to call more
/// than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
