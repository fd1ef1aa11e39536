//! Command-line entry point.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use crate::app::diagnostics::LogDiagnostics;
use crate::app::extract::MarkerExtractor;
use crate::app::generate::{GenerateOptions, Generator};
use crate::infra::config::{Config, split_skip_list};
use crate::infra::output::write_output;
use crate::infra::render::ModuleRenderer;

/// Collect annotated snippets from a source tree into a generated Rust module.
#[derive(Debug, Parser)]
#[command(name = "snippetgen", author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the generated module.
    #[arg(long = "pkg", value_name = "NAME")]
    pub package: Option<String>,

    /// Directory to scan for snippets.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Base directory for location paths; pass an empty value for absolute paths.
    #[arg(long, value_name = "DIR")]
    pub rel_base: Option<String>,

    /// Comma separated substrings; matching paths are skipped, like '.git/,node_modules/'.
    #[arg(long = "skip-dir", value_name = "LIST")]
    pub skip_dir: Option<String>,

    /// Import path of the location type used by generated constants.
    ///
    /// Must be a plain path like `crate::doc::Location`; `as` renames and `{...}` groups are
    /// rejected.
    #[arg(long, value_name = "PATH")]
    pub location_import: Option<String>,

    /// Render with a custom minijinja template instead of the built-in one.
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Write the module to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file to use instead of the workspace `.snippetgen.toml`.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the resolved configuration and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Print shell completions and exit.
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Layer command-line flags over loaded configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(package) = &self.package {
            config.generate.package = Some(package.clone());
        }
        if let Some(import) = &self.location_import {
            config.generate.location_import = Some(import.clone());
        }
        if let Some(template) = &self.template {
            config.generate.template = Some(template.clone());
        }
        if let Some(dir) = &self.dir {
            config.scan.dir = Some(dir.clone());
        }
        if let Some(base) = &self.rel_base {
            config.scan.rel_base = Some(base.clone());
        }
        if let Some(skip) = &self.skip_dir {
            config.scan.skip = Some(split_skip_list(skip));
        }
        config
    }
}

/// Parse arguments and run the requested action.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "snippetgen", &mut io::stdout());
        return Ok(());
    }

    let config = cli.apply(Config::load(cli.config.as_deref())?);

    if cli.print_config {
        let rendered = config.resolved().to_toml()?;
        return write_output(&rendered, None);
    }

    let renderer = match config.generate.template() {
        Some(path) => ModuleRenderer::with_template_file(path)?,
        None => ModuleRenderer::new()?,
    };
    let options = GenerateOptions::from_config(&config);
    tracing::debug!(?options, "generating snippet module");

    let generator = Generator::new(MarkerExtractor::new(), renderer);
    let rendered = generator
        .generate(&options, &mut LogDiagnostics)
        .with_context(|| format!("failed to generate snippets from {}", options.scan_dir.display()))?;

    write_output(&rendered, cli.output.as_deref())
}
