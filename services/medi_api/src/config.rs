//! Service configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables, then command-line flags via
//! [`ServiceConfig::with_overrides`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_CONFIG: &str = "MEDI_API_CONFIG";
pub const ENV_LISTEN: &str = "MEDI_API_LISTEN";
pub const ENV_MODEL_DIR: &str = "MEDI_API_MODEL_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub listen_addr: String,
    /// Directory holding `diabetes_model.json`, `heart_model.json` and
    /// `kidney_model.json`.
    pub model_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            model_dir: PathBuf::from("models"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl ServiceConfig {
    /// Override fields from environment-style lookups. Empty values are ignored.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(addr) = get(ENV_LISTEN) {
            self.listen_addr = addr;
        }
        if let Some(dir) = get(ENV_MODEL_DIR) {
            self.model_dir = PathBuf::from(dir);
        }
        self
    }

    /// Apply explicit overrides such as command-line flags. These win over
    /// every other layer.
    pub fn with_overrides(
        mut self,
        listen_addr: Option<String>,
        model_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(addr) = listen_addr {
            self.listen_addr = addr;
        }
        if let Some(dir) = model_dir {
            self.model_dir = dir;
        }
        self
    }

    /// Defaults, then `file` (or the file named by `MEDI_API_CONFIG`), then
    /// environment overrides.
    pub fn resolve(
        file: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let from_env = lookup(ENV_CONFIG).map(PathBuf::from);
        let base = match file.map(Path::to_path_buf).or(from_env) {
            Some(path) => {
                log::info!("loading configuration from {}", path.display());
                load_config(&path)?
            }
            None => ServiceConfig::default(),
        };
        Ok(base.with_env(lookup))
    }
}
