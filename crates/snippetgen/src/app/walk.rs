//! Directory traversal with substring skip rules.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::errors::GenerateError;

/// Skip rules applied when no other configuration is given.
pub const DEFAULT_SKIP_RULES: &[&str] = &[".git/", "node_modules/", "dist/", "target/"];

/// Literal substrings; any walked path containing one is excluded along with its subtree.
///
/// Matching is done on the whole path, not on path segments, so `dist/` also excludes
/// `my-dist/thing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRules {
    rules: Vec<String>,
}

impl Default for SkipRules {
    fn default() -> Self {
        Self::new(DEFAULT_SKIP_RULES.iter().copied())
    }
}

impl SkipRules {
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rules = rules
            .into_iter()
            .map(Into::into)
            .map(|rule| rule.trim().to_owned())
            .filter(|rule| !rule.is_empty())
            .collect();
        Self { rules }
    }

    /// Rules that never match anything.
    pub fn none() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Whether `path` is excluded. Directories are matched with a trailing `/` so that a rule
    /// like `node_modules/` prunes the directory itself.
    pub fn matches(&self, path: &Path, is_dir: bool) -> bool {
        if self.rules.is_empty() {
            return false;
        }
        let mut candidate = match_form(path);
        if is_dir && !candidate.ends_with('/') {
            candidate.push('/');
        }
        self.rules.iter().any(|rule| candidate.contains(rule.as_str()))
    }
}

fn match_form(path: &Path) -> String {
    let display = path.to_string_lossy();
    if cfg!(windows) {
        display.replace('\\', "/")
    } else {
        display.into_owned()
    }
}

/// Visits every regular file under a root exactly once, in lexical order.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    skip: SkipRules,
}

impl TreeWalker {
    pub fn new(root: impl Into<PathBuf>, skip: SkipRules) -> Self {
        Self {
            root: root.into(),
            skip,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree, calling `visit` for each file. The first traversal error or error
    /// returned by `visit` stops the walk.
    pub fn walk<F>(&self, mut visit: F) -> Result<(), GenerateError>
    where
        F: FnMut(&Path) -> Result<(), GenerateError>,
    {
        if self.skip.matches(&self.root, self.root.is_dir()) {
            tracing::debug!(root = %self.root.display(), "root matches a skip rule");
            return Ok(());
        }

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        let skip = self.skip.clone();
        builder.filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|kind| kind.is_dir());
            let skipped = skip.matches(entry.path(), is_dir);
            if skipped {
                tracing::trace!(path = %entry.path().display(), "skipping");
            }
            !skipped
        });

        for result in builder.build() {
            let entry = result.map_err(|source| GenerateError::Walk {
                root: self.root.clone(),
                source,
            })?;
            if !entry.file_type().is_some_and(|kind| kind.is_file()) {
                continue;
            }
            visit(entry.path())?;
        }
        Ok(())
    }
}
