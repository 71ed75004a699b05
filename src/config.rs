use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the scraped free-with-ads catalog JSON file
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Letterboxd base URL
    #[serde(default = "default_letterboxd_url")]
    pub letterboxd_url: String,

    /// Timeout for a single profile page request, in seconds
    #[serde(default = "default_profile_timeout_secs")]
    pub profile_timeout_secs: u64,

    /// Retries per profile page after the first attempt
    #[serde(default = "default_profile_max_retries")]
    pub profile_max_retries: u32,

    /// Upper bound on pages fetched per list
    #[serde(default = "default_profile_max_pages")]
    pub profile_max_pages: u32,

    /// Origin allowed by CORS; any origin when unset
    #[serde(default)]
    pub cors_allowed_origin: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_path() -> String {
    "youtube_free_with_ads.json".to_string()
}

fn default_letterboxd_url() -> String {
    "https://letterboxd.com".to_string()
}

fn default_profile_timeout_secs() -> u64 {
    15
}

fn default_profile_max_retries() -> u32 {
    2
}

fn default_profile_max_pages() -> u32 {
    100
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn profile_timeout(&self) -> Duration {
        Duration::from_secs(self.profile_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
