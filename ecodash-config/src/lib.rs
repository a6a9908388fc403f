//! Configuration management for the Ecodash dashboard

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{
    ChartSettings, Config, ExportConfig, LoggingConfig, ServerConfig, WorldBankConfig,
};
