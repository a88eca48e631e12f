// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Failure classes of an export run. Every one of them is fatal; they are
/// attached to `anyhow` errors so callers can `downcast_ref` on the kind.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    #[error("request to {url} failed after {attempts} attempts")]
    Network { url: String, attempts: u32 },

    #[error("unexpected data shape: {0}")]
    DataShape(String),
}
