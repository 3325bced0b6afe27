use std::{env, path::PathBuf, str::FromStr, time::Duration};

use super::env::{
    AppConfig, BatchConfig, ConfigError, DirectoryConfig, IoConfig, LoggingConfig,
    RefinementConfig, RegionConfig, DEFAULT_REFINEMENT_MODEL, DEFAULT_REFINEMENT_URL,
    DEFAULT_REGION_NAME, DEFAULT_REGION_WORD,
};

const DEFAULT_CONCURRENCY: usize = 4;
const DEFAULT_TRENDS_WINDOW_DAYS: i64 = 7;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let refinement = RefinementConfig {
            enabled: parse_bool(get("REFINEMENT_ENABLED"), "REFINEMENT_ENABLED")?.unwrap_or(true),
            api_key: get("REFINEMENT_API_KEY"),
            api_url: get("REFINEMENT_API_URL")
                .unwrap_or_else(|| DEFAULT_REFINEMENT_URL.to_string()),
            model: get("REFINEMENT_MODEL").unwrap_or_else(|| DEFAULT_REFINEMENT_MODEL.to_string()),
            timeout: parse_num::<u64>(get("REFINEMENT_TIMEOUT_MS"), "REFINEMENT_TIMEOUT_MS")?
                .map(Duration::from_millis),
        };

        let region = RegionConfig {
            name: get("REGION_NAME").unwrap_or_else(|| DEFAULT_REGION_NAME.to_string()),
            word: get("REGION_WORD").unwrap_or_else(|| DEFAULT_REGION_WORD.to_string()),
        };

        let concurrency = parse_num::<usize>(get("CLASSIFY_CONCURRENCY"), "CLASSIFY_CONCURRENCY")?
            .unwrap_or(DEFAULT_CONCURRENCY);
        if concurrency == 0 {
            return Err(ConfigError::Invalid {
                key: "CLASSIFY_CONCURRENCY",
                value: "0".to_string(),
            });
        }

        let trends_window_days = parse_num::<i64>(get("TRENDS_WINDOW_DAYS"), "TRENDS_WINDOW_DAYS")?
            .unwrap_or(DEFAULT_TRENDS_WINDOW_DAYS);
        if trends_window_days <= 0 {
            return Err(ConfigError::Invalid {
                key: "TRENDS_WINDOW_DAYS",
                value: trends_window_days.to_string(),
            });
        }

        let io = IoConfig {
            input_path: get("INPUT_PATH").filter(|p| p != "-").map(PathBuf::from),
            output_path: get("OUTPUT_PATH").filter(|p| p != "-").map(PathBuf::from),
            trends_path: get("TRENDS_PATH").map(PathBuf::from),
        };

        let directories = DirectoryConfig {
            logs_dir: get("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        Ok(Self {
            refinement,
            region,
            lexicon_path: get("LEXICON_PATH").map(PathBuf::from),
            batch: BatchConfig {
                concurrency,
                trends_window_days,
            },
            io,
            directories,
            logging,
        })
    }
}

fn parse_num<T: FromStr>(
    value: Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| v.parse::<T>().map_err(|_| ConfigError::Invalid { key, value: v }))
        .transpose()
}

fn parse_bool(value: Option<String>, key: &'static str) -> Result<Option<bool>, ConfigError> {
    value
        .map(|v| match v.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value: v }),
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert!(cfg.refinement.enabled);
        assert!(cfg.refinement.api_key.is_none());
        assert_eq!(cfg.refinement.api_url, DEFAULT_REFINEMENT_URL);
        assert!(cfg.refinement.timeout.is_none());
        assert_eq!(cfg.region, RegionConfig::default());
        assert_eq!(cfg.batch.concurrency, DEFAULT_CONCURRENCY);
        assert!(cfg.io.input_path.is_none());
        assert!(cfg.io.trends_path.is_none());
        assert_eq!(cfg.batch.trends_window_days, DEFAULT_TRENDS_WINDOW_DAYS);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = config(&[("REFINEMENT_API_KEY", "  "), ("REGION_NAME", "")]).unwrap();
        assert!(cfg.refinement.api_key.is_none());
        assert_eq!(cfg.region.name, DEFAULT_REGION_NAME);
    }

    #[test]
    fn explicit_values_are_parsed() {
        let cfg = config(&[
            ("REFINEMENT_ENABLED", "off"),
            ("REFINEMENT_TIMEOUT_MS", "2500"),
            ("CLASSIFY_CONCURRENCY", "8"),
            ("INPUT_PATH", "-"),
            ("OUTPUT_PATH", "out/report.json"),
            ("TRENDS_PATH", "out/trends.json"),
            ("TRENDS_WINDOW_DAYS", "30"),
        ])
        .unwrap();
        assert!(!cfg.refinement.enabled);
        assert_eq!(cfg.refinement.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(cfg.batch.concurrency, 8);
        assert!(cfg.io.input_path.is_none());
        assert_eq!(cfg.io.output_path, Some(PathBuf::from("out/report.json")));
        assert_eq!(cfg.io.trends_path, Some(PathBuf::from("out/trends.json")));
        assert_eq!(cfg.batch.trends_window_days, 30);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert_eq!(
            config(&[("CLASSIFY_CONCURRENCY", "many")]).unwrap_err(),
            ConfigError::Invalid {
                key: "CLASSIFY_CONCURRENCY",
                value: "many".to_string()
            }
        );
        assert!(config(&[("CLASSIFY_CONCURRENCY", "0")]).is_err());
        assert!(config(&[("REFINEMENT_ENABLED", "maybe")]).is_err());
        assert!(config(&[("TRENDS_WINDOW_DAYS", "0")]).is_err());
    }
}
