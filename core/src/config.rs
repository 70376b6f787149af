use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the recommendation service.
    pub service_url: String,
    /// Where field drafts are persisted. Defaults to `~/.strive/fields`.
    pub state_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:4000".to_string(),
            state_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SERVICE_URL") {
            config.service_url = url;
        }

        if let Ok(dir) = std::env::var("STRIVE_STATE_DIR") {
            config.state_dir = Some(PathBuf::from(dir));
        }

        config
    }
}
