use std::time::Duration;

/// Default lookup API base URL.
pub const DEFAULT_LOOKUP_BASE_URL: &str = "https://motorent.mv/";
/// Region used when neither the event nor the environment supplies one.
pub const DEFAULT_REGION: &str = "US";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub lookup_base_url: String,
    pub default_region: String,
    pub overlay_stop_delay_secs: u64,
    pub webhook_secret: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            lookup_base_url: DEFAULT_LOOKUP_BASE_URL.to_string(),
            default_region: DEFAULT_REGION.to_string(),
            overlay_stop_delay_secs: 10,
            webhook_secret: None,
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
            lookup_base_url: validate_base_url(
                std::env::var("LOOKUP_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_LOOKUP_BASE_URL.to_string()),
            )?,
            default_region: std::env::var("DEFAULT_REGION")
                .ok()
                .map(|r| r.trim().to_ascii_uppercase())
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            overlay_stop_delay_secs: std::env::var("OVERLAY_STOP_DELAY_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| {
                    anyhow::anyhow!("OVERLAY_STOP_DELAY_SECS must be a non-negative integer")
                })?,
            webhook_secret: std::env::var("WEBHOOK_SECRET")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Lookup Base URL: {}", config.lookup_base_url);
        tracing::debug!("Default region: {}", config.default_region);
        tracing::debug!("Overlay stop delay: {}s", config.overlay_stop_delay_secs);
        tracing::debug!("Server Port: {}", config.port);
        if config.webhook_secret.is_none() {
            tracing::warn!("WEBHOOK_SECRET not set, call event endpoint is unauthenticated");
        }

        Ok(config)
    }

    pub fn overlay_stop_delay(&self) -> Duration {
        Duration::from_secs(self.overlay_stop_delay_secs)
    }
}

fn validate_base_url(url: String) -> anyhow::Result<String> {
    if url.trim().is_empty() {
        anyhow::bail!("LOOKUP_BASE_URL cannot be empty");
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("LOOKUP_BASE_URL must start with http:// or https://");
    }
    url::Url::parse(&url)
        .map_err(|e| anyhow::anyhow!("LOOKUP_BASE_URL is not a valid URL: {}", e))?;
    Ok(url)
}
