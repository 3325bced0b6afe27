pub mod env;
mod loader;

pub use env::{
    AppConfig, BatchConfig, ConfigError, DirectoryConfig, IoConfig, LoggingConfig, RefinementConfig,
    RegionConfig,
};
pub use loader::load_config;
