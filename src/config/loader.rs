use super::Config;
use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "blog-generator.toml";

impl Config {
    /// Load, apply environment overrides and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut config: Config = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.config_path = path.to_path_buf();
        config.base_dir = base_dir_for(path);
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Validation(format!("failed to serialize config: {e}")))?;
        if let Some(parent) = self.config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.config_path, toml_str)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let business = &self.business;
        for (field, value) in [
            ("business.name", &business.name),
            ("business.type", &business.kind),
            ("business.location", &business.location),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{field} must not be empty")));
            }
        }

        let website = url::Url::parse(&business.website).map_err(|e| {
            ConfigError::Validation(format!(
                "business.website is not a valid URL ({}): {e}",
                business.website
            ))
        })?;
        if !matches!(website.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "business.website must be http(s): {}",
                business.website
            )));
        }

        if let Some(temperature) = self.ai.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err(ConfigError::Validation(format!(
                "ai.temperature must be within 0.0..=2.0, got {temperature}"
            )));
        }

        if !self.schedule.is_manual() {
            crate::cron::expression::validate(&self.schedule.cron)
                .map_err(|e| ConfigError::Validation(format!("schedule.cron: {e}")))?;
        }

        Ok(())
    }

    /// API key for `generate`, which cannot run without one.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.ai
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

fn base_dir_for(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::canonicalize(&parent).unwrap_or(parent)
}
