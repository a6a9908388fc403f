//! Application configuration structures

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    #[validate]
    pub server: ServerConfig,

    /// World Bank API configuration
    #[validate]
    pub worldbank: WorldBankConfig,

    /// Chart rendering settings
    #[validate]
    pub chart: ChartSettings,

    /// Data and plot export settings
    #[validate]
    pub export: ExportConfig,

    /// Logging configuration
    #[validate]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the dashboard server
    #[validate(length(min = 1, message = "Server host cannot be empty"))]
    pub host: String,

    /// Fixed local port the dashboard is served on
    #[validate(range(min = 1, message = "Server port must be non-zero"))]
    pub port: u16,
}

/// World Bank API configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WorldBankConfig {
    /// API base URL
    #[validate(url(message = "World Bank base URL must be a valid URL"))]
    pub base_url: String,

    /// Numeric id of the statistics source queried for indicator series
    #[validate(range(min = 1, message = "Source id must be non-zero"))]
    pub source_id: u16,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub timeout_seconds: u64,

    /// Page size for API requests
    #[validate(range(min = 100, max = 32000, message = "Page size must be between 100 and 32000"))]
    pub per_page: u32,
}

/// Chart rendering settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartSettings {
    /// Chart width in pixels
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,

    /// Chart height in pixels
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,

    /// Series line color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Line color must be a valid hex color"))]
    pub line_color: String,

    /// Whether to draw grid lines behind the series
    pub show_grid: bool,

    /// Font family for titles and axis labels
    pub font_family: String,

    /// Font size for axis labels
    #[validate(range(min = 8, max = 72, message = "Font size must be between 8 and 72"))]
    pub font_size: u32,
}

/// Data and plot export settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ExportConfig {
    /// Exported plot width in pixels
    #[validate(range(min = 100, max = 4000, message = "Image width must be between 100 and 4000 pixels"))]
    pub image_width: u32,

    /// Exported plot height in pixels
    #[validate(range(min = 100, max = 4000, message = "Image height must be between 100 and 4000 pixels"))]
    pub image_height: u32,

    /// Optional directory where exported plot images are also written
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Invalid export directory path"))]
    pub image_dir: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be one of: trace, debug, info, warn, error"))]
    pub level: String,

    /// Optional log file path
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Invalid log file path"))]
    pub file: Option<String>,

    /// Whether to use compact JSON-style output
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            worldbank: WorldBankConfig::default(),
            chart: ChartSettings::default(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
        }
    }
}

impl Default for WorldBankConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.worldbank.org/v2".to_string(),
            source_id: 2,
            timeout_seconds: 30,
            per_page: 20000,
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 900,
            height: 520,
            line_color: "#1F77B4".to_string(),
            show_grid: true,
            font_family: "sans-serif".to_string(),
            font_size: 14,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            image_width: 1200,
            image_height: 800,
            image_dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            json: false,
        }
    }
}
