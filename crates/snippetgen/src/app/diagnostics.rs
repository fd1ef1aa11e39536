//! Recoverable problems reported while generating, kept apart from the generated output.

use std::path::PathBuf;

use crate::domain::errors::ExtractionError;

/// A problem that does not stop the run.
#[derive(Debug)]
pub enum Diagnostic {
    /// The file was skipped and contributes no snippets.
    ExtractionFailed {
        path: PathBuf,
        error: ExtractionError,
    },
    /// Two snippets share a name; both declarations are still emitted.
    DuplicateName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Sink receiving diagnostics during a run.
pub trait Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in memory.
impl Diagnostics for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Emits each diagnostic as a `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::ExtractionFailed { path, error } => {
                tracing::warn!(path = %path.display(), error = %error, "failed to extract snippets");
            }
            Diagnostic::DuplicateName {
                name,
                first,
                second,
            } => {
                tracing::warn!(
                    name = %name,
                    first = %first.display(),
                    second = %second.display(),
                    "duplicate snippet name"
                );
            }
        }
    }
}
