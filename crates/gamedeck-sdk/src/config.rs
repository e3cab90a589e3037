//! Client configuration.
//!
//! The only deployment option the API recognises is its origin. The
//! request timeout is fixed at 30 seconds unless overridden for tests or
//! slow links.

use std::time::Duration;

use reqwest::Url;

use crate::error::SdkError;

/// Default API origin used when `GAMEDECK_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default overall request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Settings needed to reach the operator API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API origin, e.g. `https://api.example.com`.
    pub api_url: Url,
    /// Overall timeout applied to every request.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a configuration for `api_url` with the default timeout.
    pub fn new(api_url: &str) -> Result<Self, SdkError> {
        let api_url = Url::parse(api_url)
            .map_err(|e| SdkError::Config(format!("invalid API URL \"{api_url}\": {e}")))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(SdkError::Config(format!(
                "unsupported API URL scheme \"{}\"",
                api_url.scheme()
            )));
        }
        Ok(Self {
            api_url,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        })
    }

    /// Build the configuration from environment variables.
    ///
    /// | Variable              | Default                 | Description              |
    /// |-----------------------|-------------------------|--------------------------|
    /// | `GAMEDECK_API_URL`    | `http://localhost:8080` | API origin               |
    /// | `GAMEDECK_TIMEOUT_MS` | `30000`                 | Overall request timeout  |
    pub fn from_env() -> Result<Self, SdkError> {
        let api_url =
            std::env::var("GAMEDECK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&api_url)?.with_timeout(timeout_from_env()?)
    }

    /// Replace the request timeout. A zero timeout would fail every request
    /// and is rejected.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, SdkError> {
        if timeout.is_zero() {
            return Err(SdkError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Resolve an API path against the configured origin.
    ///
    /// Any path prefix on the origin is kept, so `https://host/casino`
    /// resolves `api/games/dashboard` to `https://host/casino/api/games/dashboard`.
    pub fn endpoint(&self, path: &str) -> Result<Url, SdkError> {
        let mut base = self.api_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|e| SdkError::Config(format!("invalid endpoint path \"{path}\": {e}")))
    }
}

/// Read `GAMEDECK_TIMEOUT_MS` on its own, so callers that take the URL from
/// elsewhere still honour it.
pub fn timeout_from_env() -> Result<Duration, SdkError> {
    parse_timeout_ms(std::env::var("GAMEDECK_TIMEOUT_MS").ok().as_deref())
}

/// Parse a millisecond timeout; `None` means the default.
pub fn parse_timeout_ms(raw: Option<&str>) -> Result<Duration, SdkError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_millis(DEFAULT_TIMEOUT_MS));
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(SdkError::Config(
            "GAMEDECK_TIMEOUT_MS must be greater than zero".to_string(),
        )),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(e) => Err(SdkError::Config(format!(
            "invalid GAMEDECK_TIMEOUT_MS \"{raw}\": {e}"
        ))),
    }
}
