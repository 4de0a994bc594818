//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <file>`, else `$XDG_CONFIG_HOME/nest/nest.toml` if present
//! 3. Environment variables: `NEST_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub output: Option<PathBuf>,
    pub workers: Option<usize>,
    pub writes_per_worker: Option<usize>,
}

/// Unified configuration for the `nest` binary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Settings {
    /// Render destination (default: stdout)
    pub output: Option<PathBuf>,
    /// Parallel writers used by `stress`
    pub workers: usize,
    /// Lines each `stress` writer appends to its own node
    pub writes_per_worker: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: None,
            workers: 4,
            writes_per_worker: 100,
        }
    }
}

/// Get the XDG config directory for nest.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nest").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("nest.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            output: overlay.output.clone().or_else(|| self.output.clone()),
            workers: overlay.workers.unwrap_or(self.workers),
            writes_per_worker: overlay.writes_per_worker.unwrap_or(self.writes_per_worker),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// An explicit `config_path` must exist; the global file is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        match config_path {
            Some(path) => {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        let raw = load_raw_settings(&global_path)?;
                        current = current.merge_with(&raw);
                    }
                }
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply NEST_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("NEST")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = optional(config.get_string("output"))? {
            settings.output = Some(PathBuf::from(val));
        }
        if let Some(val) = optional(config.get::<usize>("workers"))? {
            settings.workers = val;
        }
        if let Some(val) = optional(config.get::<usize>("writes_per_worker"))? {
            settings.writes_per_worker = val;
        }

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.workers == 0 {
            return Err(ApplicationError::Config {
                message: "workers must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Render as TOML for `config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

/// Unset keys are not an error; unparsable values are.
fn optional<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
