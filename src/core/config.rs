use std::{
    path::PathBuf,
    time::Duration,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::persistence;

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_BASE_URL: &str = "https://api.renshuu.org/v1/";
/// Port AnkiConnect listens on; flashcard plugins expect it.
pub const DEFAULT_PORT: u16 = 8765;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            log_filter: "renshuu_connect=info,tower_http=warn".to_string(),
        }
    }
}

/// Values given on the command line or through the environment. `None` keeps
/// whatever the config file (or the defaults) said.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        persistence::get_data_file_path(CONFIG_FILE)
    }

    pub fn load(path: Option<PathBuf>, overrides: Overrides) -> Self {
        let path = path.unwrap_or_else(Self::default_path);
        let config: Config = persistence::load_json_or_default(&path);
        config.with_overrides(overrides)
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.request_timeout_secs = secs;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Base URL with a guaranteed trailing slash so relative joins keep the
    /// version segment.
    pub fn normalized_base_url(&self) -> String {
        if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
