//! Logging setup.
//!
//! The terminal belongs to the UI while the game runs, so log records go to
//! an append-only file instead of stderr. `RUST_LOG` overrides the default
//! `info` filter.

use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// Route `log` output to `path`. Errors if the file can't be opened or a
/// logger is already installed.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    log::info!("Logging to {}", path.display());
    Ok(())
}
