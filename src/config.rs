// src/config.rs
use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: String,
    pub session_ttl: Duration,
    pub thinking_min: Duration,
    pub thinking_max: Duration,
    pub admin_key: String,
    pub data_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub aggregation_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            session_ttl: Duration::from_secs(30 * 60),
            thinking_min: Duration::from_millis(600),
            thinking_max: Duration::from_millis(1500),
            admin_key: "change-me".to_string(),
            data_dir: PathBuf::from("data"),
            catalog_path: None,
            aggregation_url: None,
        }
    }
}

impl AppConfig {
    /// Read the config from `TADOW_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            bind: get("TADOW_BIND").unwrap_or(defaults.bind),
            session_ttl: parse_or(&get, "TADOW_SESSION_TTL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_ttl),
            thinking_min: parse_or(&get, "TADOW_THINKING_MIN_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.thinking_min),
            thinking_max: parse_or(&get, "TADOW_THINKING_MAX_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.thinking_max),
            admin_key: get("TADOW_ADMIN_KEY").unwrap_or(defaults.admin_key),
            data_dir: get("TADOW_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            catalog_path: get("TADOW_CATALOG_PATH").map(PathBuf::from),
            aggregation_url: get("TADOW_AGGREGATION_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
        };

        if config.thinking_min > config.thinking_max {
            return Err(AppError::Config(
                "TADOW_THINKING_MIN_MS must not exceed TADOW_THINKING_MAX_MS".to_string(),
            ));
        }
        Ok(config)
    }
}

fn parse_or<G, T>(get: &G, key: &str) -> Result<Option<T>, AppError>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{key} has an invalid value: {raw}"))),
        None => Ok(None),
    }
}
