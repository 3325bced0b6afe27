use std::{path::PathBuf, time::Duration};

use thiserror::Error;

pub const DEFAULT_REGION_NAME: &str = "Valle del Cauca";
pub const DEFAULT_REGION_WORD: &str = "región";
pub const DEFAULT_REFINEMENT_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_REFINEMENT_MODEL: &str = "google/gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub refinement: RefinementConfig,
    pub region: RegionConfig,
    pub lexicon_path: Option<PathBuf>,
    pub batch: BatchConfig,
    pub io: IoConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct RefinementConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout: Option<Duration>,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            api_url: DEFAULT_REFINEMENT_URL.to_string(),
            model: DEFAULT_REFINEMENT_MODEL.to_string(),
            timeout: None,
        }
    }
}

/// Region whose articles get the department/region-word impact promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionConfig {
    pub name: String,
    pub word: String,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_REGION_NAME.to_string(),
            word: DEFAULT_REGION_WORD.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub concurrency: usize,
    pub trends_window_days: i64,
}

#[derive(Debug, Clone)]
pub struct IoConfig {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    /// Trend summary of the batch is written here when set.
    pub trends_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
