use std::env;
use std::path::PathBuf;

use dotenv::dotenv;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_IMAGES_DIR: &str = "static/images";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub images_dir: PathBuf,
}

/// Loads `.env` and reads the configuration from the environment.
pub fn init_app_config() -> Config {
    dotenv().ok();
    Config::from_lookup(|key| env::var(key).ok())
}

impl Config {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("T20_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let images_dir = lookup("T20_IMAGES_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR), PathBuf::from);

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            images_dir,
        }
    }
}
