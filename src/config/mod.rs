//! Recognizer configuration
//!
//! Tunable settings stored in TOML format. Currently this covers the
//! live-stream prefilter thresholds; the parsing components are table-driven
//! and take no runtime configuration.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Recognizer settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// Stream prefilter settings.
    pub prefilter: PrefilterSettings,
}

/// Stream prefilter thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefilterSettings {
    /// Consecutive qualifying frames required before a trigger.
    pub stable_frames: u32,
    /// Frames to suppress after a trigger.
    pub cooldown_frames: u32,
}

impl Default for PrefilterSettings {
    fn default() -> Self {
        Self {
            stable_frames: 5,
            cooldown_frames: 30,
        }
    }
}

/// Load configuration from file.
pub fn load_config(path: &Path) -> Result<RecognizerConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: RecognizerConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file.
pub fn save_config(config: &RecognizerConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = RecognizerConfig::default();
        assert_eq!(config.prefilter.stable_frames, 5);
        assert_eq!(config.prefilter.cooldown_frames, 30);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = RecognizerConfig::default();
        config.prefilter.stable_frames = 3;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: RecognizerConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.prefilter.stable_frames, 3);
        assert_eq!(parsed.prefilter.cooldown_frames, 30);
    }

    #[test]
    fn test_save_and_load_config() {
        let config = RecognizerConfig::default();
        let temp_file = NamedTempFile::new().unwrap();

        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(config.prefilter.stable_frames, loaded.prefilter.stable_frames);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}
