//! Writing rendered modules to their destination.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Write `rendered` to `path`, or to stdout when no path is given.
///
/// File output goes through a temporary file in the target directory that is persisted over
/// the destination, so readers never observe a partially written module.
pub fn write_output(rendered: &str, path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(rendered.as_bytes())
            .context("failed to write generated module to stdout")?;
        return stdout.flush().context("failed to flush stdout");
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    temp.write_all(rendered.as_bytes())
        .context("failed to write generated module")?;
    temp.persist(path)
        .with_context(|| format!("failed to write generated module to {}", path.display()))?;
    Ok(())
}
