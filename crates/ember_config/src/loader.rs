//! Reading and validating `ember.toml`.

use crate::error::ConfigError;
use crate::types::EmberConfig;
use std::path::Path;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "ember.toml";

/// Loads `<project_dir>/ember.toml`, falling back to defaults when absent.
pub fn load_config(project_dir: &Path) -> Result<EmberConfig, ConfigError> {
    let path = project_dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(EmberConfig::default());
    }
    let content = std::fs::read_to_string(&path)?;
    load_config_from_str(&content)
}

/// Parses and validates configuration text.
pub fn load_config_from_str(content: &str) -> Result<EmberConfig, ConfigError> {
    let config: EmberConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &EmberConfig) -> Result<(), ConfigError> {
    let synth = &config.synth;
    for (key, prefix) in [
        ("synth.wire_prefix", &synth.wire_prefix),
        ("synth.device_prefix", &synth.device_prefix),
    ] {
        if prefix.is_empty() {
            return Err(invalid(key, "must not be empty"));
        }
        if prefix.contains('.') {
            return Err(invalid(key, "must not contain the hierarchy separator `.`"));
        }
    }
    if synth.wire_prefix == synth.device_prefix {
        return Err(invalid(
            "synth.device_prefix",
            "must differ from synth.wire_prefix",
        ));
    }
    Ok(())
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
