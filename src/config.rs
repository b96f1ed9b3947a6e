//! Configuration management for the shell
//!
//! Startup configuration only: everything here is read once at launch.
//! Values come from built-in defaults, overridden by an optional
//! `config.toml` in the working directory, overridden by `VSH_*`
//! environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Startup configuration for one shell run.
#[derive(Debug, Deserialize, Clone)]
pub struct ShellConfig {
    /// Path of the persisted namespace snapshot.
    pub snapshot_path: String,

    /// Host identity used when the snapshot carries none.
    pub default_hostname: String,

    /// The always-present, always-authorized username.
    pub superuser: String,

    /// Maximum accepted input line length.
    pub max_command_length: usize,

    /// Maximum accepted username length for `adduser`.
    pub max_username_length: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "filesystem.json".to_string(),
            default_hostname: "default_hostname".to_string(),
            superuser: "root".to_string(),
            max_command_length: 512,
            max_username_length: 32,
        }
    }
}

impl ShellConfig {
    /// Load configuration from defaults, `config.toml`, and environment
    /// overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("snapshot_path", "filesystem.json")?
            .set_default("default_hostname", "default_hostname")?
            .set_default("superuser", "root")?
            .set_default("max_command_length", 512_i64)?
            .set_default("max_username_length", 32_i64)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("VSH"))
            .build()?;

        let config: ShellConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.snapshot_path.is_empty() {
            return Err(ConfigError::Message("snapshot_path cannot be empty".into()));
        }

        if self.superuser.trim().is_empty() {
            return Err(ConfigError::Message("superuser cannot be empty".into()));
        }

        if self.max_command_length == 0 {
            return Err(ConfigError::Message(
                "max_command_length must be greater than 0".into(),
            ));
        }

        if self.max_username_length == 0 {
            return Err(ConfigError::Message(
                "max_username_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
