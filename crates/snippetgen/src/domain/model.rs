//! Domain models for snippets and the generated module.

use std::path::PathBuf;

use serde::Serialize;

/// Origin of a snippet inside a scanned file. Lines are 1-based and cover the markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetLocation {
    pub file: PathBuf,
    pub start_line: usize,
    pub end_line: usize,
}

/// A named snippet and its exact source bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetRecord {
    pub name: String,
    pub code: Vec<u8>,
    pub location: SnippetLocation,
}

/// Location value referenced by generated code.
///
/// Generated modules import this type (by default as `snippetgen::Location`) and bind one
/// constant of it per snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: &'static str,
    pub start_line: usize,
    pub end_line: usize,
}

/// One snippet's declarations, with literals already encoded for the target module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub name: String,
    pub code_literal: String,
    pub file_literal: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// Fully accumulated output of a run, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedModule {
    pub package: String,
    /// Shared import path, present iff at least one fragment exists.
    pub import: Option<String>,
    pub fragments: Vec<Fragment>,
}

impl GeneratedModule {
    /// Type name used in location declarations, taken from the last import segment.
    pub fn location_type(&self) -> Option<&str> {
        self.import
            .as_deref()
            .and_then(|import| import.rsplit("::").next())
            .map(str::trim)
    }
}

/// Whether `name` can be used as a constant name in the generated module.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    name != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether `path` is a plain `::`-separated type path such as `crate::doc::Location`.
///
/// Renames (`as`), groups (`{...}`) and globs are rejected since the last segment is used as
/// the type name in generated declarations.
pub fn is_type_path(path: &str) -> bool {
    let path = path.strip_prefix("::").unwrap_or(path);
    !path.is_empty() && path.split("::").all(is_identifier)
}
