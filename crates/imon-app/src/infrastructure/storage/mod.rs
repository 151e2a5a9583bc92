//! On-disk persistence: the preference blob store and the TOML app config.

pub mod blob;
pub mod config;

pub use blob::FileBlobStore;
pub use config::{load_config, save_config, AppConfig, ConfigError};
