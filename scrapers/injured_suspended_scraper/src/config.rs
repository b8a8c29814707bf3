use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://www.equipeactu.fr/blessures-et-suspensions/fodbold/";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateLimits {
    pub requests_per_second: u32,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            requests_per_second: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapingConfig {
    pub base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub proxy: Option<String>,
    pub ssl_certificates_check: bool,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: "Mozilla/5.0 (compatible; InjuredSuspendedScraper/1.0)".to_string(),
            request_timeout_secs: 30,
            proxy: None,
            ssl_certificates_check: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScraperConfig {
    pub rate_limits: RateLimits,
    pub scraping: ScrapingConfig,
}

impl ScraperConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("EQUIPEACTU_URL") {
            config.scraping.base_url = with_trailing_slash(&url);
        }
        if let Ok(user_agent) = env::var("SCRAPER_USER_AGENT") {
            config.scraping.user_agent = user_agent;
        }
        if let Some(timeout) = parse_var::<u64>("SCRAPER_TIMEOUT_SECS") {
            config.scraping.request_timeout_secs = timeout;
        }
        if let Ok(proxy) = env::var("SCRAPER_PROXY") {
            if !proxy.trim().is_empty() {
                config.scraping.proxy = Some(proxy);
            }
        }
        if let Some(check) = parse_var::<bool>("SCRAPER_SSL_CHECK") {
            config.scraping.ssl_certificates_check = check;
        }
        if let Some(rps) = parse_var::<u32>("RATE_LIMIT_RPS") {
            config.rate_limits.requests_per_second = rps;
        }

        config
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.trim().parse().ok())
}

pub fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}
