//! Reference paths recorded in generated location constants.

use std::path::{Component, Path, PathBuf};

use crate::domain::errors::PathResolutionError;

/// Turns snippet origin paths into stable reference paths, optionally relative to a base.
#[derive(Debug, Clone, Default)]
pub struct PathNormalizer {
    base: Option<PathBuf>,
}

impl PathNormalizer {
    /// Build a normalizer. The base directory is made absolute once, up front.
    pub fn new(base: Option<&Path>) -> Result<Self, PathResolutionError> {
        let base = base.map(absolute).transpose()?;
        Ok(Self { base })
    }

    /// Normalizer emitting absolute paths.
    pub fn absolute() -> Self {
        Self { base: None }
    }

    pub fn base(&self) -> Option<&Path> {
        self.base.as_deref()
    }

    /// Reference path for `raw`: absolute without a base, otherwise `/`-separated and
    /// relative to the base.
    pub fn normalize(&self, raw: &Path) -> Result<String, PathResolutionError> {
        let target = absolute(raw)?;
        let Some(base) = &self.base else {
            return Ok(target.display().to_string());
        };
        relative_to(base, &target).ok_or_else(|| PathResolutionError::NoRelativePath {
            base: base.clone(),
            target,
        })
    }
}

fn absolute(path: &Path) -> Result<PathBuf, PathResolutionError> {
    std::path::absolute(path)
        .map(|abs| clean(&abs))
        .map_err(|source| PathResolutionError::Absolute {
            path: path.to_path_buf(),
            source,
        })
}

/// Lexically resolve `.` and `..` without touching the filesystem.
fn clean(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

/// Relative path from `base` to `target`, both absolute and clean.
fn relative_to(base: &Path, target: &Path) -> Option<String> {
    let base: Vec<_> = base.components().collect();
    let target: Vec<_> = target.components().collect();

    let prefix = |parts: &[Component<'_>]| match parts.first() {
        Some(Component::Prefix(prefix)) => Some(prefix.as_os_str().to_owned()),
        _ => None,
    };
    if prefix(&base) != prefix(&target) {
        return None;
    }

    let shared = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<String> = vec!["..".to_owned(); base.len() - shared];
    segments.extend(
        target[shared..]
            .iter()
            .map(|part| part.as_os_str().to_string_lossy().into_owned()),
    );

    if segments.is_empty() {
        Some(".".to_owned())
    } else {
        Some(segments.join("/"))
    }
}
