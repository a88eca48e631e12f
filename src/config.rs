// src/config.rs

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::error::ExportError;
use crate::fetch::RetryPolicy;
use crate::mapping::{bundled_mapping_dir, KEYWORD_MAPPING_FILE, TOPIC_MAPPING_FILE};

pub const DEFAULT_API_BASE_URL: &str = "https://api.learn.mit.edu";
pub const COURSES_PATH: &str = "/api/v1/courses/?platform=ocw";
pub const DEFAULT_SNAPSHOT_PATH: &str = "ocw_api_data.json";
pub const DEFAULT_CSV_PATH: &str = "ocw_oer_export.csv";

/// Runtime settings for an export run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Full course listing URL, first page.
    pub api_url: String,
    /// Directory containing the two reference CSVs.
    pub mapping_dir: PathBuf,
    pub page_size: usize,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: format!("{DEFAULT_API_BASE_URL}{COURSES_PATH}"),
            mapping_dir: bundled_mapping_dir(),
            page_size: 100,
            request_timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
        }
    }
}

impl Config {
    /// Defaults, overridden by `API_BASE_URL` and `OCW_MAPPING_DIR`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = env::var("API_BASE_URL") {
            config.api_url = format!("{}{COURSES_PATH}", base.trim_end_matches('/'));
        }
        if let Ok(dir) = env::var("OCW_MAPPING_DIR") {
            config.mapping_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn topic_mapping_path(&self) -> PathBuf {
        self.mapping_dir.join(TOPIC_MAPPING_FILE)
    }

    pub fn keyword_mapping_path(&self) -> PathBuf {
        self.mapping_dir.join(KEYWORD_MAPPING_FILE)
    }
}

/// Where course records come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Live paginated fetch from the listing API.
    Api,
    /// A JSON snapshot written earlier by `create_json`.
    Json,
}

impl FromStr for DataSource {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api" => Ok(Self::Api),
            "json" => Ok(Self::Json),
            other => Err(ExportError::Configuration(format!(
                "invalid source {other:?}, use 'api' or 'json'"
            ))),
        }
    }
}
