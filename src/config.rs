//! Formbench configuration.
//!
//! Loaded from `~/.formbench/config.toml`; a missing file falls back to
//! defaults so the tool works against a local dev server out of the box.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// Site root the dev server listens on when nothing is configured.
const DEFAULT_ROOT: &str = "http://localhost:8000/";

/// Formbench configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Root URL the `form-creator/api/` paths are resolved against.
    #[serde(default = "default_api_root")]
    pub api_root: String,
}

fn default_api_root() -> String {
    DEFAULT_ROOT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_root: default_api_root(),
        }
    }
}

impl Config {
    /// Load config from `~/.formbench/config.toml`.
    ///
    /// A missing file (or an undeterminable home directory) yields the
    /// defaults; a file that exists but fails to parse is an error.
    pub fn load() -> Result<Self, String> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.formbench/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".formbench").join("config.toml"))
    }
}
