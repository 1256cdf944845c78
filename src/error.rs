use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the dashboard core.
///
/// Filtering and aggregation never fail; only data generation, export and
/// configuration loading can.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to export {}: {reason}", .path.display())]
    Export { path: PathBuf, reason: String },

    #[error("failed to load configuration from {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
