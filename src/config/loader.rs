//! Loader for controller configuration files (RON or JSON).

use ron::Options;
use std::fs;
use std::path::Path;

use super::ControllerConfig;

/// Error type for configuration loading failures.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ConfigLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse and validate a RON config. `file` only labels errors.
pub fn parse_ron(file: &str, contents: &str) -> Result<ControllerConfig, ConfigLoadError> {
    let config: ControllerConfig = ron_options()
        .from_str(contents)
        .map_err(|e| ConfigLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;
    validated(file, config)
}

/// Parse and validate a JSON config. `file` only labels errors.
pub fn parse_json(file: &str, contents: &str) -> Result<ControllerConfig, ConfigLoadError> {
    let config: ControllerConfig = serde_json::from_str(contents).map_err(|e| ConfigLoadError {
        file: file.to_string(),
        message: format!("Parse error: {}", e),
    })?;
    validated(file, config)
}

/// Load a config file, picking the format from its extension.
pub fn load_config(path: &Path) -> Result<ControllerConfig, ConfigLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("ron") => parse_ron(&file_name, &contents),
        Some("json") => parse_json(&file_name, &contents),
        other => Err(ConfigLoadError {
            file: file_name,
            message: format!("Unsupported config format: {:?}", other),
        }),
    }
}

fn validated(file: &str, config: ControllerConfig) -> Result<ControllerConfig, ConfigLoadError> {
    config.controller.validate().map_err(|e| ConfigLoadError {
        file: file.to_string(),
        message: format!("Invalid controller parameters: {}", e),
    })?;
    Ok(config)
}
