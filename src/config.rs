// src/config.rs

use std::{env, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:7860";
pub const DEFAULT_FLOW_ID: &str = "566af723-984b-476d-89f1-0605fcdafcf1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    /// Bearer credential, attached to downstream calls only when present.
    pub api_key: Option<String>,
    pub flow_id: String,
    pub request_timeout: Duration,
    pub port: u16,
    pub static_dir: String,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            api_key: None,
            flow_id: DEFAULT_FLOW_ID.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            port: DEFAULT_PORT,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from `LANGFLOW_*`, `PORT` and `STATIC_DIR`. Blank values count as unset.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| get(name).filter(|v| !v.trim().is_empty());

        let base_url = var("LANGFLOW_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(base_url);

        config.api_key = var("LANGFLOW_API_KEY");
        if let Some(flow_id) = var("LANGFLOW_FLOW_ID") {
            config.flow_id = flow_id;
        }
        if let Some(raw) = var("LANGFLOW_TIMEOUT_SECS") {
            config.request_timeout = parse_timeout("LANGFLOW_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = var("PORT") {
            config.port = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw.clone(),
            })?;
        }
        if let Some(dir) = var("STATIC_DIR") {
            config.static_dir = dir;
        }

        Ok(config)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    pub fn with_flow_id(mut self, flow_id: impl Into<String>) -> Self {
        self.flow_id = flow_id.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn run_url(&self) -> String {
        format!("{}/api/v1/run/{}", self.base_url, self.flow_id)
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn parse_timeout(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
        }),
    }
}
