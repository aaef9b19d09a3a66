//! API configuration
//!
//! The API base URL may be absolute (`https://parts.example.com/api`) or a
//! site-relative path (`/api`), in which case it is resolved against the
//! site origin.

use crate::error::{Error, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Base URL used when `PARTS_API_URL` is unset
pub const DEFAULT_API_BASE: &str = "/api";

/// Origin that relative base URLs are resolved against
pub const DEFAULT_SITE_ORIGIN: &str = "http://localhost:8000";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Delay between a confirmed inquiry and navigation away from the form
const DEFAULT_REDIRECT_DELAY_MS: u64 = 5000;

/// Runtime configuration for the API client and submission pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Absolute API base URL, without trailing slash
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// How long a confirmation stays up before navigating away
    pub redirect_delay: Duration,
}

impl ApiConfig {
    /// Build a config for a base URL with default timings
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: resolve_base_url(base_url, DEFAULT_SITE_ORIGIN)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            redirect_delay: Duration::from_millis(DEFAULT_REDIRECT_DELAY_MS),
        })
    }

    /// Load configuration from the environment
    ///
    /// - `PARTS_API_URL`: API base (default `/api`)
    /// - `PARTS_SITE_ORIGIN`: origin for relative bases (default `http://localhost:8000`)
    /// - `PARTS_API_TIMEOUT_SECS`: request timeout (default 30)
    /// - `PARTS_REDIRECT_DELAY_MS`: post-submit navigation delay (default 5000)
    pub fn from_env() -> Result<Self> {
        let base = env::var("PARTS_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let origin =
            env::var("PARTS_SITE_ORIGIN").unwrap_or_else(|_| DEFAULT_SITE_ORIGIN.to_string());

        let timeout = env_u64("PARTS_API_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let redirect = env_u64("PARTS_REDIRECT_DELAY_MS")?.unwrap_or(DEFAULT_REDIRECT_DELAY_MS);

        Ok(Self {
            base_url: resolve_base_url(&base, &origin)?,
            timeout: Duration::from_secs(timeout),
            redirect_delay: Duration::from_millis(redirect),
        })
    }

    /// Replace the base URL, keeping timings
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = resolve_base_url(base_url, DEFAULT_SITE_ORIGIN)?;
        Ok(self)
    }

    /// Replace the post-submit navigation delay
    #[must_use]
    pub const fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Full URL for an endpoint path such as `/manufacturers/`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{key} must be a non-negative integer, got {raw:?}"))),
        Err(_) => Ok(None),
    }
}

/// Resolve a possibly relative base against an origin
fn resolve_base_url(base: &str, origin: &str) -> Result<Url> {
    let base = base.trim();
    if base.is_empty() {
        return Err(Error::Config("API base URL is empty".to_string()));
    }

    let url = match Url::parse(base) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(origin)?.join(base)?,
        Err(e) => return Err(e.into()),
    };

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "unsupported scheme in API base URL: {}",
            url.scheme()
        )));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_base_resolves_against_origin() {
        let url = resolve_base_url("/api", "http://localhost:8000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api");
    }

    #[test]
    fn test_absolute_base_kept() {
        let url = resolve_base_url("https://parts.example.com/v2/api/", DEFAULT_SITE_ORIGIN).unwrap();
        assert_eq!(url.as_str(), "https://parts.example.com/v2/api/");
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ApiConfig::new("https://parts.example.com/api/").unwrap();
        assert_eq!(
            config.endpoint("/manufacturers/"),
            "https://parts.example.com/api/manufacturers/"
        );
    }

    #[test]
    fn test_rejects_bad_scheme_and_empty() {
        assert!(matches!(
            resolve_base_url("ftp://parts.example.com", DEFAULT_SITE_ORIGIN),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            resolve_base_url("  ", DEFAULT_SITE_ORIGIN),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::new(DEFAULT_API_BASE).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.redirect_delay, Duration::from_secs(5));
        assert_eq!(config.endpoint("/part-categories/"), "http://localhost:8000/api/part-categories/");
    }
}
