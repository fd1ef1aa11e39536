use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Project automation commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run cargo nextest with default configuration
    Nextest {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        release: bool,
    },
    /// Regenerate a snippet module from a workspace directory
    Snippets {
        /// Directory to scan, relative to the workspace root
        dir: PathBuf,
        /// Output file, relative to the workspace root
        #[arg(long, short)]
        out: PathBuf,
        /// Name of the generated module
        #[arg(long, default_value = "generated")]
        pkg: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Nextest { profile, release } => run_nextest(profile, release)?,
        Commands::Snippets { dir, out, pkg } => regenerate_snippets(&dir, &out, &pkg)?,
    }
    Ok(())
}

fn run_nextest(profile: Option<String>, release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("nextest").arg("run");
    if let Some(profile) = profile {
        cmd.arg("--profile").arg(profile);
    }
    if release {
        cmd.arg("--release");
    }
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("cargo nextest run failed");
    }
    Ok(())
}

fn regenerate_snippets(dir: &Path, out: &Path, pkg: &str) -> Result<()> {
    let metadata = MetadataCommand::new()
        .no_deps()
        .exec()
        .context("failed to read cargo metadata")?;
    let root = metadata.workspace_root.into_std_path_buf();

    let status = Command::new("cargo")
        .current_dir(&root)
        .args(["run", "--quiet", "-p", "snippetgen", "--"])
        .args(snippetgen_args(dir, out, pkg))
        .status()
        .context("failed to run snippetgen")?;
    if !status.success() {
        anyhow::bail!("snippetgen failed for {}", dir.display());
    }
    Ok(())
}

// Paths are relative to the workspace root, the child's working directory.
fn snippetgen_args(dir: &Path, out: &Path, pkg: &str) -> Vec<OsString> {
    vec![
        "--dir".into(),
        dir.into(),
        "--rel-base".into(),
        ".".into(),
        "--pkg".into(),
        pkg.into(),
        "--output".into(),
        out.into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_paths_are_passed_relative() {
        let args = snippetgen_args(Path::new("docs"), Path::new("src/generated.rs"), "docs");
        let args: Vec<_> = args.iter().map(|arg| arg.to_string_lossy()).collect();
        assert_eq!(
            args,
            vec!["--dir", "docs", "--rel-base", ".", "--pkg", "docs", "--output", "src/generated.rs"]
        );
    }
}
