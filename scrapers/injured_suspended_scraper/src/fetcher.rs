use anyhow::{anyhow, Context, Result};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{
    fs,
    num::NonZeroU32,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};
use tracing::{info, warn};

use crate::config::ScraperConfig;

const MAX_RETRIES: u32 = 2;
const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(1);

pub trait HtmlFetcher {
    fn fetch_html(&self, url: &str) -> Result<String>;
}

/// Fetches pages over HTTP, honouring proxy, TLS and rate limit settings.
pub struct WebHtmlFetcher {
    client: reqwest::blocking::Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl WebHtmlFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(&config.scraping.user_agent)
            .timeout(Duration::from_secs(config.scraping.request_timeout_secs))
            .danger_accept_invalid_certs(!config.scraping.ssl_certificates_check);
        if let Some(proxy) = &config.scraping.proxy {
            let proxy = reqwest::Proxy::all(proxy).with_context(|| format!("Invalid proxy URL: {}", proxy))?;
            builder = builder.proxy(proxy);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.rate_limits.requests_per_second)
                .ok_or_else(|| anyhow!("Invalid requests_per_second value"))?,
        );

        Ok(Self {
            client,
            rate_limiter: RateLimiter::direct(quota),
        })
    }

    fn fetch_once(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            anyhow::bail!("Failed to fetch HTML: HTTP {}", response.status());
        }
        let html = response.text()?;
        info!("Downloaded {} bytes from {}", html.len(), url);
        Ok(html)
    }
}

impl HtmlFetcher for WebHtmlFetcher {
    fn fetch_html(&self, url: &str) -> Result<String> {
        while self.rate_limiter.check().is_err() {
            thread::sleep(Duration::from_millis(100));
        }
        retry_with_backoff(|| self.fetch_once(url))
    }
}

/// Reads pages saved on disk as `<country>_<league>.html`, for offline runs.
pub struct FileHtmlFetcher {
    dir: PathBuf,
}

impl FileHtmlFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, url: &str) -> PathBuf {
        let mut segments: Vec<&str> = url
            .trim_end_matches('/')
            .rsplit('/')
            .take(2)
            .collect();
        segments.reverse();
        self.dir.join(format!("{}.html", segments.join("_")))
    }
}

impl HtmlFetcher for FileHtmlFetcher {
    fn fetch_html(&self, url: &str) -> Result<String> {
        let path = self.path_for(url);
        read_page(&path)
    }
}

fn read_page(path: &Path) -> Result<String> {
    let html = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    info!("Read {} bytes from {:?}", html.len(), path);
    Ok(html)
}

fn retry_with_backoff<F, T>(mut operation: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let mut delay = INITIAL_RETRY_DELAY;
    let mut attempt = 1;

    loop {
        match operation() {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt >= MAX_RETRIES {
                    return Err(e.context("Max retries exceeded"));
                }
                warn!("Retry attempt {} after error: {}", attempt, e);
                thread::sleep(delay);
                delay *= 2;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_path_for() {
        let fetcher = FileHtmlFetcher::new("pages");
        assert_eq!(
            fetcher.path_for("https://www.equipeactu.fr/blessures-et-suspensions/fodbold/france/ligue-1"),
            Path::new("pages").join("france_ligue-1.html")
        );
        assert_eq!(
            fetcher.path_for("http://localhost/italie/serie-a/"),
            Path::new("pages").join("italie_serie-a.html")
        );
    }

    #[test]
    fn test_retry_succeeds_on_second_attempt() {
        let calls = Cell::new(0);
        let result = retry_with_backoff(|| {
            calls.set(calls.get() + 1);
            if calls.get() < 2 {
                anyhow::bail!("transient");
            }
            Ok("page")
        });
        assert_eq!(result.unwrap(), "page");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_retry_gives_up() {
        let calls = Cell::new(0);
        let result: Result<()> = retry_with_backoff(|| {
            calls.set(calls.get() + 1);
            anyhow::bail!("down")
        });
        assert!(result.is_err());
        assert_eq!(calls.get(), MAX_RETRIES);
    }

    #[test]
    fn test_zero_rate_limit_is_rejected() {
        let mut config = ScraperConfig::default();
        config.rate_limits.requests_per_second = 0;
        assert!(WebHtmlFetcher::new(&config).is_err());
    }
}
