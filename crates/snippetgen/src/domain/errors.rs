//! Error types for the snippet pipeline.
//!
//! Extraction errors are recoverable and only ever reported as diagnostics. Everything wrapped
//! by [`GenerateError`] aborts the run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to compute the reference path recorded in a location constant.
#[derive(Debug, Error)]
pub enum PathResolutionError {
    #[error("failed to make {} absolute", path.display())]
    Absolute {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no relative path from {} to {}", base.display(), target.display())]
    NoRelativePath { base: PathBuf, target: PathBuf },
}

/// Per-file problem found while scanning for snippet markers.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}:{line}: invalid snippet name '{name}'", path.display())]
    InvalidName {
        path: PathBuf,
        name: String,
        line: usize,
    },
    #[error("{}:{line}: snippet end without a matching begin", path.display())]
    UnmatchedEnd { path: PathBuf, line: usize },
    #[error("{}:{line}: snippet '{name}' is never closed", path.display())]
    Unclosed {
        path: PathBuf,
        name: String,
        line: usize,
    },
}

/// Fatal errors that stop generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid module name '{0}'")]
    InvalidPackage(String),
    #[error("invalid location import '{0}', expected a plain path like 'crate::Location'")]
    InvalidLocationImport(String),
    #[error("failed to walk {}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },
    #[error(transparent)]
    Path(#[from] PathResolutionError),
    #[error("failed to load template {}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to render snippet module")]
    Render(#[from] minijinja::Error),
}
