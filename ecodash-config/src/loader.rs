//! Configuration loading utilities

use crate::Config;
use ecodash_common::Result as EcodashResult;
use std::env;
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for ecodash_common::EcodashError {
    fn from(err: ConfigError) -> Self {
        ecodash_common::EcodashError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;

        config.validate_all().map_err(ConfigError::ValidationError)?;

        Ok(config)
    }

    /// Load configuration from the default locations.
    ///
    /// Checks `ECODASH_CONFIG_PATH`, then `config.yaml` / `config.yml` in the
    /// working directory, and finally falls back to built-in defaults. Env
    /// overrides apply in every case.
    pub fn load() -> EcodashResult<Config> {
        let config = if let Ok(config_path) = env::var("ECODASH_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else if Path::new("config.yml").exists() {
            Self::load_config("config.yml")?
        } else {
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate_all().map_err(ConfigError::ValidationError)?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> EcodashResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        // Server configuration overrides
        if let Ok(host) = env::var("ECODASH_HOST") {
            config.server.host = host;
        }

        if let Ok(port) = env::var("ECODASH_PORT") {
            config.server.port = port.parse().map_err(|e| ConfigError::EnvParseError {
                var: "ECODASH_PORT".to_string(),
                source: Box::new(e),
            })?;
        }

        // World Bank configuration overrides
        if let Ok(base_url) = env::var("WORLDBANK_BASE_URL") {
            config.worldbank.base_url = base_url;
        }

        if let Ok(timeout) = env::var("WORLDBANK_TIMEOUT") {
            config.worldbank.timeout_seconds =
                timeout.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "WORLDBANK_TIMEOUT".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(per_page) = env::var("WORLDBANK_PER_PAGE") {
            config.worldbank.per_page =
                per_page.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "WORLDBANK_PER_PAGE".to_string(),
                    source: Box::new(e),
                })?;
        }

        // Chart configuration overrides
        if let Ok(width) = env::var("CHART_WIDTH") {
            config.chart.width = width.parse().map_err(|e| ConfigError::EnvParseError {
                var: "CHART_WIDTH".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(height) = env::var("CHART_HEIGHT") {
            config.chart.height = height.parse().map_err(|e| ConfigError::EnvParseError {
                var: "CHART_HEIGHT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(line_color) = env::var("CHART_LINE_COLOR") {
            config.chart.line_color = line_color;
        }

        // Export configuration overrides
        if let Ok(image_dir) = env::var("EXPORT_IMAGE_DIR") {
            config.export.image_dir = Some(image_dir);
        }

        if let Ok(width) = env::var("EXPORT_IMAGE_WIDTH") {
            config.export.image_width =
                width.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "EXPORT_IMAGE_WIDTH".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(height) = env::var("EXPORT_IMAGE_HEIGHT") {
            config.export.image_height =
                height.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "EXPORT_IMAGE_HEIGHT".to_string(),
                    source: Box::new(e),
                })?;
        }

        // Logging configuration overrides
        if let Ok(level) = env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(file) = env::var("LOG_FILE") {
            config.logging.file = Some(file);
        }

        if let Ok(json) = env::var("LOG_JSON") {
            config.logging.json = json.parse().map_err(|e| ConfigError::EnvParseError {
                var: "LOG_JSON".to_string(),
                source: Box::new(e),
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Serializes tests that touch process-wide environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Create a temporary YAML config file for testing
    fn create_test_config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    fn clear_env_overrides() {
        for var in [
            "ECODASH_CONFIG_PATH",
            "ECODASH_HOST",
            "ECODASH_PORT",
            "WORLDBANK_BASE_URL",
            "WORLDBANK_TIMEOUT",
            "WORLDBANK_PER_PAGE",
            "CHART_WIDTH",
            "CHART_HEIGHT",
            "CHART_LINE_COLOR",
            "EXPORT_IMAGE_DIR",
            "EXPORT_IMAGE_WIDTH",
            "EXPORT_IMAGE_HEIGHT",
            "LOG_LEVEL",
            "LOG_FILE",
            "LOG_JSON",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_valid_yaml_config() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env_overrides();

        let yaml_content = "server:\n  host: '0.0.0.0'\n  port: 9100\nworldbank:\n  timeout_seconds: 45\nchart:\n  width: 800\nlogging:\n  level: 'debug'";

        let temp_file = create_test_config_file(yaml_content);
        let config = ConfigLoader::load_config(temp_file.path()).expect("Failed to load config");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.worldbank.timeout_seconds, 45);
        assert_eq!(config.chart.width, 800);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_yaml() {
        let invalid_yaml = "server:\n  host: 'x'\n  bad_field: [unclosed array";

        let temp_file = create_test_config_file(invalid_yaml);
        let result = ConfigLoader::load_config(temp_file.path());

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env_overrides();

        let invalid_config = "worldbank:\n  base_url: 'not_a_url'";

        let temp_file = create_test_config_file(invalid_config);
        let result = ConfigLoader::load_config(temp_file.path());

        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_environment_variable_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env_overrides();
        env::set_var("ECODASH_PORT", "9999");
        env::set_var("WORLDBANK_TIMEOUT", "120");
        env::set_var("CHART_LINE_COLOR", "#D62728");
        env::set_var("LOG_LEVEL", "warn");

        let yaml_content =
            "server:\n  port: 8050\nworldbank:\n  timeout_seconds: 30\nlogging:\n  level: 'info'";

        let temp_file = create_test_config_file(yaml_content);
        let config = ConfigLoader::load_config(temp_file.path()).expect("Failed to load config");

        assert_eq!(config.server.port, 9999);
        assert_eq!(config.worldbank.timeout_seconds, 120);
        assert_eq!(config.chart.line_color, "#D62728");
        assert_eq!(config.logging.level, "warn");

        clear_env_overrides();
    }

    #[test]
    fn test_env_parse_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env_overrides();
        env::set_var("ECODASH_PORT", "not_a_number");

        let temp_file = create_test_config_file("server:\n  port: 8050");
        let result = ConfigLoader::load_config(temp_file.path());

        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::EnvParseError { .. }
        ));

        env::remove_var("ECODASH_PORT");
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_config("/nonexistent/path/config.yaml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }
}
