//! Accumulates snippet declarations across a walk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::app::diagnostics::{Diagnostic, Diagnostics};
use crate::app::literal::{byte_string_literal, str_literal};
use crate::app::paths::PathNormalizer;
use crate::domain::errors::PathResolutionError;
use crate::domain::model::{Fragment, GeneratedModule, SnippetRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImportState {
    NotYet,
    Scheduled,
}

/// Builds a [`GeneratedModule`] from per-file snippet records, in the order received.
#[derive(Debug)]
pub struct Aggregator {
    normalizer: PathNormalizer,
    import_path: String,
    import: ImportState,
    fragments: Vec<Fragment>,
    first_seen: HashMap<String, PathBuf>,
    files: usize,
}

impl Aggregator {
    pub fn new(normalizer: PathNormalizer, import_path: impl Into<String>) -> Self {
        Self {
            normalizer,
            import_path: import_path.into(),
            import: ImportState::NotYet,
            fragments: Vec::new(),
            first_seen: HashMap::new(),
            files: 0,
        }
    }

    /// Add one visited file's records. Fails only when a location path cannot be resolved.
    pub fn accept(
        &mut self,
        file: &Path,
        records: Vec<SnippetRecord>,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<(), PathResolutionError> {
        self.files += 1;
        if records.is_empty() {
            return Ok(());
        }
        if self.import == ImportState::NotYet {
            self.import = ImportState::Scheduled;
        }

        tracing::debug!(file = %file.display(), snippets = records.len(), "collected snippets");

        for record in records {
            let reference = self.normalizer.normalize(&record.location.file)?;

            if let Some(first) = self.first_seen.get(&record.name) {
                diagnostics.report(Diagnostic::DuplicateName {
                    name: record.name.clone(),
                    first: first.clone(),
                    second: record.location.file.clone(),
                });
            } else {
                self.first_seen
                    .insert(record.name.clone(), record.location.file.clone());
            }

            self.fragments.push(Fragment {
                code_literal: byte_string_literal(&record.code),
                file_literal: str_literal(&reference),
                start_line: record.location.start_line,
                end_line: record.location.end_line,
                name: record.name,
            });
        }
        Ok(())
    }

    /// Number of files passed to [`Aggregator::accept`].
    pub fn files_seen(&self) -> usize {
        self.files
    }

    pub fn snippet_count(&self) -> usize {
        self.fragments.len()
    }

    /// Assemble the module without reordering or deduplicating fragments.
    pub fn finalize(self, package: impl Into<String>) -> GeneratedModule {
        let import = match self.import {
            ImportState::Scheduled => Some(self.import_path),
            ImportState::NotYet => None,
        };
        GeneratedModule {
            package: package.into(),
            import,
            fragments: self.fragments,
        }
    }
}
