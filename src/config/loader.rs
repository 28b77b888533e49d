//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading allocation
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{AllocationConfig, OrganizationConfig, ThresholdsConfig};

/// Loads an [`AllocationConfig`] from a configuration directory.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── organization.yaml   # Organization metadata and standard monthly hours
/// └── thresholds.yaml     # Rounding precision and bench threshold (optional)
/// ```
///
/// `thresholds.yaml` may be omitted, in which case the defaults apply.
///
/// # Example
///
/// ```no_run
/// use allocation_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Standard hours: {}", loader.config().standard_monthly_hours());
/// # Ok::<(), allocation_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AllocationConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `organization.yaml` is missing
    /// - Any file contains invalid YAML
    /// - Any value fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let organization_path = path.join("organization.yaml");
        let organization = Self::load_yaml::<OrganizationConfig>(&organization_path)?;

        let thresholds_path = path.join("thresholds.yaml");
        let thresholds = if thresholds_path.exists() {
            Self::load_yaml::<ThresholdsConfig>(&thresholds_path)?
        } else {
            ThresholdsConfig::default()
        };

        let config = AllocationConfig::new(
            organization.organization,
            organization.standard_monthly_hours,
            thresholds,
        )?;

        debug!(
            path = %path.display(),
            organization = %config.organization().code,
            standard_monthly_hours = %config.standard_monthly_hours(),
            "Loaded allocation configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying allocation configuration.
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> AllocationConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "allocation-engine-{}-{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        let config = loader.config();
        assert_eq!(config.organization().code, "default");
        assert_eq!(config.standard_monthly_hours(), dec("160"));
        assert_eq!(config.fte_precision(), 4);
        assert_eq!(config.percentage_precision(), 2);
        assert_eq!(config.bench_threshold(), dec("0.25"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("organization.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_missing_thresholds_file_uses_defaults() {
        let dir = scratch_dir("no-thresholds");
        fs::write(
            dir.join("organization.yaml"),
            "organization:\n  code: acme\n  name: Acme Corp\nstandard_monthly_hours: 168\n",
        )
        .unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(loader.config().standard_monthly_hours(), dec("168"));
        assert_eq!(loader.config().bench_threshold(), dec("0.25"));
        assert_eq!(loader.config().organization().name, "Acme Corp");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir("bad-yaml");
        fs::write(dir.join("organization.yaml"), "organization: [unclosed\n").unwrap();

        let result = ConfigLoader::load(&dir);
        match result {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("organization.yaml"));
            }
            _ => panic!("Expected ConfigParseError"),
        }

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_zero_standard_hours_rejected() {
        let dir = scratch_dir("zero-hours");
        fs::write(
            dir.join("organization.yaml"),
            "organization:\n  code: acme\n  name: Acme\nstandard_monthly_hours: 0\n",
        )
        .unwrap();

        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_into_config_returns_loaded_values() {
        let config = ConfigLoader::load(config_path()).unwrap().into_config();
        assert_eq!(config.standard_monthly_hours(), dec("160"));
    }
}
