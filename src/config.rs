//! TOML configuration.
//!
//! ```toml
//! [corpus]
//! path = "content/export.json"
//! index_path = "public/index.json"   # optional prebuilt index
//!
//! [site]
//! base_path = "/browsearchives/archives"
//!
//! [layout]
//! default_columns = 3
//! breakpoints = [
//!   { max_width = 992, columns = 1 },
//!   { max_width = 1280, columns = 2 },
//!   { max_width = 2560, columns = 3 },
//! ]
//!
//! [recent]
//! limit = 8
//! wide_limit = 10
//! wide_min_width = 2500
//!
//! [server]
//! bind = "127.0.0.1:7340"
//! ```
//!
//! Only `[corpus].path` is required.

use anyhow::{Context, Result};
use oral_archive_core::detail::RecentLimits;
use oral_archive_core::render::{Breakpoint, Breakpoints};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub recent: RecentLimits,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub index_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Viewport width assumed when a caller does not supply one.
    #[serde(default = "default_viewport_width")]
    pub default_viewport_width: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            default_viewport_width: default_viewport_width(),
        }
    }
}

fn default_base_path() -> String {
    "/browsearchives/archives".to_string()
}
fn default_viewport_width() -> u32 {
    1280
}

#[derive(Debug, Deserialize, Clone)]
pub struct LayoutConfig {
    #[serde(default = "default_breakpoints")]
    pub breakpoints: Vec<Breakpoint>,
    #[serde(default = "default_columns")]
    pub default_columns: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoints: default_breakpoints(),
            default_columns: default_columns(),
        }
    }
}

fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint {
            max_width: 992,
            columns: 1,
        },
        Breakpoint {
            max_width: 1280,
            columns: 2,
        },
        Breakpoint {
            max_width: 2560,
            columns: 3,
        },
    ]
}
fn default_columns() -> usize {
    3
}

impl LayoutConfig {
    pub fn breakpoints(&self) -> Result<Breakpoints> {
        Breakpoints::new(self.breakpoints.clone(), self.default_columns)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

impl Config {
    /// Resolve relative corpus paths against the config file's directory.
    fn resolve_paths(&mut self, config_path: &Path) {
        let base = config_path.parent().unwrap_or_else(|| Path::new("."));
        if self.corpus.path.is_relative() {
            self.corpus.path = base.join(&self.corpus.path);
        }
        if let Some(p) = self.corpus.index_path.as_mut() {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content, path)
}

/// Parse and validate config text. `path` anchors relative corpus paths.
pub fn parse_config(content: &str, path: &Path) -> Result<Config> {
    let mut config: Config =
        toml::from_str(content).with_context(|| "Failed to parse config file")?;

    // Validate layout
    config
        .layout
        .breakpoints()
        .with_context(|| "invalid [layout] table")?;

    // Validate recent
    if config.recent.limit == 0 || config.recent.wide_limit == 0 {
        anyhow::bail!("recent.limit and recent.wide_limit must be >= 1");
    }

    if !config.site.base_path.is_empty() && !config.site.base_path.starts_with('/') {
        anyhow::bail!(
            "site.base_path must be empty or start with '/': '{}'",
            config.site.base_path
        );
    }

    config.resolve_paths(path);
    Ok(config)
}
