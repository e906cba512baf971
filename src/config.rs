use crate::compressor::validate_quality;
use crate::constants::{
    CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE, DEFAULT_LOG_LEVEL, DEFAULT_OUTPUT_FILE, DEFAULT_QUALITY,
    LOG_LEVEL_ENV, QUALITY_ENV,
};
use crate::error::{CompressionError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Defaults applied when the command line leaves a setting out.
///
/// ```toml
/// default_quality = 75
/// default_output = "output.webp"
/// log_level = "info"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_quality: i32,
    pub default_output: PathBuf,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_quality: i32::from(DEFAULT_QUALITY),
            default_output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file, falling back to defaults if it doesn't exist
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            CompressionError::Config(format!("Failed to read {:?}: {}", path, e))
        })?;
        let settings: Settings = toml::from_str(&content)
            .map_err(|e| CompressionError::Config(format!("Failed to parse {:?}: {}", path, e)))?;

        settings.validate()?;
        log::debug!("Loaded configuration from {:?}", path);
        Ok(settings)
    }

    /// Resolves the config path (explicit, then environment, then the default
    /// file name), loads it and applies environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = match explicit_path {
            Some(p) => p.to_path_buf(),
            None => std::env::var(CONFIG_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE)),
        };

        let mut settings = Self::load_from_file(&path)?;
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(quality) = lookup(QUALITY_ENV) {
            self.default_quality = quality.trim().parse().map_err(|_| {
                CompressionError::Config(format!("{} is not an integer: {}", QUALITY_ENV, quality))
            })?;
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            self.log_level = level;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        validate_quality(Some(self.default_quality))?;
        if self.default_output.as_os_str().is_empty() {
            return Err(CompressionError::Config(
                "default_output must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_quality, 75);
        assert_eq!(settings.default_output, PathBuf::from("output.webp"));
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from_file(temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cfg.toml");
        fs::write(&path, "default_quality = 40\n").unwrap();

        let settings = Settings::load_from_file(&path).unwrap();
        assert_eq!(settings.default_quality, 40);
        assert_eq!(settings.default_output, PathBuf::from("output.webp"));
    }

    #[test]
    fn test_out_of_range_quality_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cfg.toml");
        fs::write(&path, "default_quality = 150\n").unwrap();

        assert!(matches!(
            Settings::load_from_file(&path),
            Err(CompressionError::InvalidQuality(150))
        ));
    }

    #[test]
    fn test_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cfg.toml");
        fs::write(&path, "default_quality = \"high\"\n").unwrap();

        assert!(matches!(
            Settings::load_from_file(&path),
            Err(CompressionError::Config(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> =
            HashMap::from([(QUALITY_ENV, "30"), (LOG_LEVEL_ENV, "debug")]);
        let mut settings = Settings::default();
        settings
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(settings.default_quality, 30);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_env_override_not_a_number() {
        let mut settings = Settings::default();
        let result = settings.apply_overrides(|key| {
            (key == QUALITY_ENV).then(|| "lots".to_string())
        });
        assert!(matches!(result, Err(CompressionError::Config(_))));
    }
}
