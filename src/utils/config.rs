use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::convert::Quality;

const DEFAULT_ENDPOINT: &str =
    "https://universal-raw-to-jpeg-convertor-api.onrender.com/convert";
const CONFIG_FILE: &str = "config.json";
const ENDPOINT_ENV: &str = "RAW_CONVERT_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub quality: Quality,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            quality: Quality::default(),
        }
    }
}

impl AppConfig {
    /// Reads `config.json` from the working directory when present; the
    /// `RAW_CONVERT_ENDPOINT` environment variable overrides the endpoint
    /// either way.
    pub fn load() -> Self {
        let mut config = Self::load_from(Path::new(CONFIG_FILE));
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            log::info!("endpoint overridden from environment: {endpoint}");
            config.endpoint = endpoint;
        }
        config
    }

    fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("ignoring unreadable {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
