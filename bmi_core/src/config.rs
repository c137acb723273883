//! Configuration file support for the BMI calculator.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bmi-calc/config.toml`.

use crate::{Error, HeightUnit, Result, WeightUnit};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub units: UnitsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Units preselected in the form
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct UnitsConfig {
    #[serde(default)]
    pub height: HeightUnit,

    #[serde(default)]
    pub weight: WeightUnit,
}

/// Where saved reports go by default
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,

    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            file_name: default_file_name(),
        }
    }
}

// Default value functions
fn default_output_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_file_name() -> String {
    "bmi_results.txt".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        base.join("bmi-calc").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Default path offered when saving a report
    pub fn default_report_path(&self) -> PathBuf {
        self.output.directory.join(&self.output.file_name)
    }

    fn validate(&self) -> Result<()> {
        let name = self.output.file_name.trim();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "output.file_name must be a plain file name, got {:?}",
                self.output.file_name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.units.height, HeightUnit::Meters);
        assert_eq!(config.units.weight, WeightUnit::Kilograms);
        assert_eq!(config.output.file_name, "bmi_results.txt");
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.units.height = HeightUnit::Feet;
        config.output.directory = temp_dir.path().to_path_buf();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.units.height, HeightUnit::Feet);
        assert_eq!(loaded.units.weight, WeightUnit::Kilograms);
        assert_eq!(
            loaded.default_report_path(),
            temp_dir.path().join("bmi_results.txt")
        );
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[units]
weight = "pounds"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.units.weight, WeightUnit::Pounds);
        assert_eq!(config.units.height, HeightUnit::Meters); // default
        assert_eq!(config.output.file_name, "bmi_results.txt"); // default
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let toml_str = r#"
[units]
height = "inches"
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_file_name_with_separator_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nfile_name = \"a/b.txt\"\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
