use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fetch::notion;

pub const TOKEN_VAR: &str = "NOTION_AUTH";
pub const DEFAULT_VIEWER: &str = "https://mozilla.github.io/pdf.js/web/viewer.html";

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Web PDF viewer that takes the document in a `file` query parameter
    pub viewer: String,
    /// Directory PDFs are downloaded to (defaults to the working directory)
    pub download_dir: Option<PathBuf>,
    pub notion: NotionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewer: DEFAULT_VIEWER.to_string(),
            download_dir: None,
            notion: NotionConfig::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct NotionConfig {
    pub api_url: String,
    /// Integration token, overridden by `NOTION_AUTH`
    pub token: Option<String>,
    /// Database name -> database id, extended by `NOTION_DB_*` variables
    pub databases: BTreeMap<String, String>,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_url: notion::API_URL.to_string(),
            token: None,
            databases: BTreeMap::new(),
        }
    }
}

fn fallback_path() -> Option<PathBuf> {
    let mut fb_path = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| std::env::var("HOME").map(|home| [home, ".config".to_string()].iter().collect()))
        .ok()?;
    fb_path.push("arxiv-notion");
    fb_path.push("config.toml");
    Some(fb_path)
}

fn read(path: &Path) -> Result<Config> {
    let content = read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
}

/// Loads the configuration. A path given explicitly must exist; the default
/// location is optional. `NOTION_AUTH` takes precedence over the file's token.
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    let mut conf = match path {
        Some(path) => read(&path)?,
        None => match fallback_path().filter(|p| p.exists()) {
            Some(path) => read(&path)?,
            None => {
                debug!("No config file found, using defaults");
                Config::default()
            }
        },
    };
    apply_env(&mut conf, std::env::var(TOKEN_VAR).ok());
    Ok(conf)
}

/// Overlays the value of `NOTION_AUTH`, if set, on the token from the file.
fn apply_env(conf: &mut Config, token: Option<String>) {
    if let Some(token) = token {
        conf.notion.token = Some(token);
    }
}
