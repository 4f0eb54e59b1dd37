//! Tracing subscriber setup for the binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

/// Installs a stderr fmt subscriber
///
/// `RUST_LOG` takes precedence over `base_level`. Logs go to stderr so the
/// CLI's stdout stays clean for CSV and JSON output.
pub fn setup_logging(base_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(base_level))
        .map_err(|e| Error::Config(format!("invalid log filter {:?}: {}", base_level, e)))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("logger initialization failed: {}", e)))
}
