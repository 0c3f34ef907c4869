use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_DIRECTORY_BASE_URL: &str = "https://dummyjson.com";
pub const DEFAULT_USER_AGENT: &str = "HelpSpot-LiveLookup-Bridge/1.0 (+https://helpspot.com)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub directory_base_url: String,
    pub directory_timeout_secs: u64,
    pub directory_user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            directory_base_url: DEFAULT_DIRECTORY_BASE_URL.to_string(),
            directory_timeout_secs: DEFAULT_TIMEOUT_SECS,
            directory_user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            directory_base_url: validate_base_url(
                std::env::var("DIRECTORY_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DIRECTORY_BASE_URL.to_string()),
            )?,
            directory_timeout_secs: std::env::var("DIRECTORY_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("DIRECTORY_TIMEOUT_SECS must be a whole number"))
                .and_then(|secs| {
                    if secs == 0 {
                        anyhow::bail!("DIRECTORY_TIMEOUT_SECS must be at least 1");
                    }
                    Ok(secs)
                })?,
            directory_user_agent: std::env::var("DIRECTORY_USER_AGENT")
                .ok()
                .filter(|agent| !agent.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        };

        tracing::debug!("Directory Base URL: {}", config.directory_base_url);
        tracing::debug!("Directory timeout: {}s", config.directory_timeout_secs);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    /// Upstream request timeout as a `Duration`.
    pub fn directory_timeout(&self) -> Duration {
        Duration::from_secs(self.directory_timeout_secs)
    }
}

fn validate_base_url(url: String) -> anyhow::Result<String> {
    if url.trim().is_empty() {
        anyhow::bail!("DIRECTORY_BASE_URL cannot be empty");
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("DIRECTORY_BASE_URL must start with http:// or https://");
    }
    Ok(url.trim_end_matches('/').to_string())
}
