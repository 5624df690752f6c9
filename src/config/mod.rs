use std::path::PathBuf;

use crate::errors::{FeederError, FeederResult};

pub const DEFAULT_DATA_FILE: &str = "feeds.json";

const ENV_TOKEN: &str = "PUSHOVER_RSS_TOKEN";
const ENV_USER: &str = "PUSHOVER_USER";
const ENV_DATA: &str = "FEED_DATA";
const ENV_API_URL: &str = "PUSHOVER_API_URL";

#[derive(Debug, Clone)]
pub struct Config {
    pub pushover_url: String,
    pub pushover_token: Option<String>,
    pub pushover_user: Option<String>,
    pub data_path: PathBuf,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> FeederResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let pushover_url = non_empty_var(ENV_API_URL)
            .unwrap_or_else(|| pushover::DEFAULT_API_URL.to_string());

        let data_path = non_empty_var(ENV_DATA)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        Ok(Self {
            pushover_url,
            pushover_token: non_empty_var(ENV_TOKEN),
            pushover_user: non_empty_var(ENV_USER),
            data_path,
        })
    }

    /// Override the checkpoint path, e.g. from the command line
    pub fn with_data_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.data_path = path;
        }
        self
    }

    /// Token and user key, both required to actually send anything
    pub fn credentials(&self) -> FeederResult<(&str, &str)> {
        let token = self
            .pushover_token
            .as_deref()
            .ok_or_else(|| FeederError::MissingEnvVar(ENV_TOKEN.to_string()))?;
        let user = self
            .pushover_user
            .as_deref()
            .ok_or_else(|| FeederError::MissingEnvVar(ENV_USER.to_string()))?;
        Ok((token, user))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
