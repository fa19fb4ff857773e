use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("could not open log file: {0}")]
    Open(#[from] std::io::Error),
    #[error("logging already initialized: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Level used when neither `RUST_LOG` nor the caller picks one
pub const DEFAULT_LEVEL: &str = "info";

/// `RUST_LOG` wins; otherwise `level` applies to everything.
fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)))
}

fn init_with_writer<W>(level: &str, writer: W, ansi: bool) -> Result<(), LogError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi);
    tracing_subscriber::registry()
        .with(filter(level))
        .with(layer)
        .try_init()?;
    Ok(())
}

/// Log to a file. Used by the TUI, which owns the terminal.
pub fn init_to_file(log_path: &Path, level: &str) -> Result<(), LogError> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_path)?;
    init_with_writer(level, Mutex::new(file), false)
}

/// Log to stderr. Used by the scripting subcommands so stdout stays clean.
pub fn init_stderr(level: &str) -> Result<(), LogError> {
    init_with_writer(level, std::io::stderr, true)
}
