//! Configuration resolution from layered sources.

use std::collections::HashMap;
use std::path::PathBuf;

use serde_yaml::{Mapping, Value};

use crate::config::overrides::{apply_overrides, EnvLookup, LayeredEnv, ProcessEnv};
use crate::config::schema::ResolvedConfig;
use crate::config::sources::{find_config_file, load_env_file, load_yaml_file, SourceOutcome};

/// Base name of the structured configuration file.
pub const DEFAULT_CONFIG_NAME: &str = "app";

/// Default override file, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Error type for configuration resolution.
///
/// Missing or unparsable sources are not errors; only a merged document that
/// does not fit [`ResolvedConfig`] is.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to decode configuration: {0}")]
    Decode(#[from] serde_yaml::Error),
}

/// Resolves [`ResolvedConfig`] from an override file, a YAML file and the
/// environment.
///
/// Precedence for credential keys is environment, then YAML, then empty.
/// Everything else comes from YAML alone.
#[derive(Debug, Clone)]
pub struct ConfigResolver<E = ProcessEnv> {
    config_dir: PathBuf,
    config_name: String,
    env_file: Option<PathBuf>,
    env: E,
}

impl ConfigResolver<ProcessEnv> {
    /// Create a resolver reading `<config_dir>/app.yaml`, `.env` and the
    /// process environment.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            config_name: DEFAULT_CONFIG_NAME.to_string(),
            env_file: Some(PathBuf::from(DEFAULT_ENV_FILE)),
            env: ProcessEnv,
        }
    }
}

impl<E: EnvLookup> ConfigResolver<E> {
    /// Replace the environment the overrides are read from.
    pub fn with_env<F: EnvLookup>(self, env: F) -> ConfigResolver<F> {
        ConfigResolver {
            config_dir: self.config_dir,
            config_name: self.config_name,
            env_file: self.env_file,
            env,
        }
    }

    /// Use `<config_dir>/<name>.yaml` instead of `app.yaml`.
    pub fn config_name(mut self, name: impl Into<String>) -> Self {
        self.config_name = name.into();
        self
    }

    /// Read overrides from `path`, or skip the override file with `None`.
    pub fn env_file(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.env_file = path.map(Into::into);
        self
    }

    /// Run the resolution pipeline once.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let file_env = self.load_env_file();
        let mut merged = self.load_structured_file();

        let layered = LayeredEnv::new(&self.env, &file_env);
        let applied = apply_overrides(&mut merged, &layered);
        if !applied.is_empty() {
            tracing::debug!(overrides = ?applied, "Applied environment overrides");
        }

        let config: ResolvedConfig = serde_yaml::from_value(Value::Mapping(merged))?;

        tracing::debug!(config = ?config, "Configuration resolved");
        Ok(config)
    }

    fn load_env_file(&self) -> HashMap<String, String> {
        let Some(path) = &self.env_file else {
            return HashMap::new();
        };

        match load_env_file(path) {
            SourceOutcome::Loaded(vars) => {
                tracing::info!(path = %path.display(), "Override file loaded");
                vars
            }
            SourceOutcome::Absent => {
                tracing::warn!(path = %path.display(), "Override file not found, using process environment only");
                HashMap::new()
            }
            SourceOutcome::Malformed(detail) => {
                tracing::warn!(path = %path.display(), error = %detail, "Failed to load override file, ignoring it");
                HashMap::new()
            }
        }
    }

    fn load_structured_file(&self) -> Mapping {
        let outcome = match find_config_file(&self.config_dir, &self.config_name) {
            Some(path) => {
                let outcome = load_yaml_file(&path);
                if let SourceOutcome::Malformed(detail) = &outcome {
                    tracing::warn!(path = %path.display(), error = %detail, "Failed to read config file, continuing without it");
                } else {
                    tracing::info!(path = %path.display(), "Config file loaded");
                }
                outcome
            }
            None => {
                tracing::warn!(
                    dir = %self.config_dir.display(),
                    name = %self.config_name,
                    "No config file found, app/logging/api settings will be empty"
                );
                SourceOutcome::Absent
            }
        };

        outcome.into_loaded().unwrap_or_default()
    }
}
