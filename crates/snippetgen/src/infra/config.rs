//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::app::walk::DEFAULT_SKIP_RULES;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".snippetgen.toml";

const DEFAULT_PACKAGE: &str = "generated";
const DEFAULT_LOCATION_IMPORT: &str = "snippetgen::Location";
const DEFAULT_SCAN_DIR: &str = ".";
const DEFAULT_REL_BASE: &str = ".";

/// Layered configuration loaded from defaults, user, workspace, and env.
///
/// Every field is optional so that a layer only overrides what it sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub generate: Generate,
    #[serde(default)]
    pub scan: Scan,
}

/// Settings for the generated module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Generate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_import: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

impl Generate {
    pub fn package(&self) -> &str {
        self.package.as_deref().unwrap_or(DEFAULT_PACKAGE)
    }

    pub fn location_import(&self) -> &str {
        self.location_import
            .as_deref()
            .unwrap_or(DEFAULT_LOCATION_IMPORT)
    }

    pub fn template(&self) -> Option<&Path> {
        self.template.as_deref()
    }
}

/// Settings for the tree walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Scan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Base for location paths. An empty string selects absolute paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<Vec<String>>,
}

impl Scan {
    pub fn dir(&self) -> &Path {
        self.dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SCAN_DIR))
    }

    pub fn rel_base(&self) -> Option<PathBuf> {
        match self.rel_base.as_deref() {
            None => Some(PathBuf::from(DEFAULT_REL_BASE)),
            Some(base) if base.trim().is_empty() => None,
            Some(base) => Some(PathBuf::from(base)),
        }
    }

    pub fn skip(&self) -> Vec<String> {
        match &self.skip {
            Some(rules) => rules.clone(),
            None => DEFAULT_SKIP_RULES.iter().map(|rule| (*rule).to_owned()).collect(),
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    package: Option<String>,
    skip: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            package: env::var("SNIPPETGEN_PACKAGE").ok(),
            skip: env::var("SNIPPETGEN_SKIP").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(package: &str, skip: &str) -> Self {
        Self {
            package: Some(package.to_owned()),
            skip: Some(skip.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    ///
    /// `explicit` replaces the discovered workspace file and must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = match explicit {
            Some(path) => {
                if !path.exists() {
                    bail!("config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => workspace_config_path()?,
        };
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            tracing::debug!(path = %global_path.display(), "loading global config");
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            tracing::debug!(path = %workspace_path.display(), "loading workspace config");
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    /// Parse a config file. Relative paths in it are taken relative to the file's directory.
    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config = Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))?;
        Ok(match path.parent() {
            Some(dir) => config.anchored_at(dir),
            None => config,
        })
    }

    fn anchored_at(mut self, dir: &Path) -> Self {
        let anchor = |path: PathBuf| {
            if path.is_relative() {
                dir.join(path)
            } else {
                path
            }
        };
        self.scan.dir = self.scan.dir.map(anchor);
        self.generate.template = self.generate.template.map(anchor);
        // An empty base still means absolute locations.
        self.scan.rel_base = self.scan.rel_base.map(|base| {
            if base.trim().is_empty() {
                base
            } else {
                anchor(PathBuf::from(base)).to_string_lossy().into_owned()
            }
        });
        self
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            generate: merge_generate(self.generate, other.generate),
            scan: merge_scan(self.scan, other.scan),
        }
    }

    /// Copy with every default filled in, for display.
    pub fn resolved(&self) -> Self {
        Self {
            generate: Generate {
                package: Some(self.generate.package().to_owned()),
                location_import: Some(self.generate.location_import().to_owned()),
                template: self.generate.template.clone(),
            },
            scan: Scan {
                dir: Some(self.scan.dir().to_path_buf()),
                rel_base: Some(self.scan.rel_base.clone().unwrap_or_else(|| {
                    DEFAULT_REL_BASE.to_owned()
                })),
                skip: Some(self.scan.skip()),
            },
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config")
    }
}

fn merge_generate(base: Generate, overlay: Generate) -> Generate {
    Generate {
        package: overlay.package.or(base.package),
        location_import: overlay.location_import.or(base.location_import),
        template: overlay.template.or(base.template),
    }
}

// A layer that sets skip rules replaces the lower list entirely.
fn merge_scan(base: Scan, overlay: Scan) -> Scan {
    Scan {
        dir: overlay.dir.or(base.dir),
        rel_base: overlay.rel_base.or(base.rel_base),
        skip: overlay.skip.or(base.skip),
    }
}

/// Split a comma separated skip list, trimming entries and dropping empty ones.
pub fn split_skip_list(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|rule| !rule.is_empty())
        .map(str::to_owned)
        .collect()
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("snippetgen/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(package) = env.package {
        config.generate.package = Some(package);
    }
    if let Some(skip) = env.skip {
        config.scan.skip = Some(split_skip_list(&skip));
    }
    config
}
