//! HTTP client for the operator API.
//!
//! [`GameDeckClient`] wraps a [`reqwest::Client`] configured with the API
//! origin and a fixed overall timeout. Screens talk to it through the
//! [`GameApi`] trait so the launch flow can be driven by a fake in tests.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use gamedeck_sdk::{ClientConfig, GameApi, GameDeckClient};
//!
//! # async fn run() -> Result<(), gamedeck_sdk::SdkError> {
//! let config = ClientConfig::new("https://api.example.com")?;
//! let client = GameDeckClient::new(&config)?;
//!
//! let dashboard = client.dashboard().await?;
//! println!("{} games", dashboard.games.len());
//! # Ok(())
//! # }
//! ```

use std::future::Future;

use gamedeck_models::{DashboardResponse, LaunchRequest, LaunchResponse};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::config::ClientConfig;
use crate::error::SdkError;

/// Path of the catalog endpoint.
pub const DASHBOARD_PATH: &str = "/api/games/dashboard";

/// Path of the login-and-launch endpoint.
pub const LAUNCH_PATH: &str = "/wallet/doLoginAndLaunchGame";

/// The two calls the front end makes against the operator API.
pub trait GameApi {
    /// `GET /api/games/dashboard`.
    fn dashboard(&self) -> impl Future<Output = Result<DashboardResponse, SdkError>> + Send;

    /// `POST /wallet/doLoginAndLaunchGame`.
    fn login_and_launch(
        &self,
        request: &LaunchRequest,
    ) -> impl Future<Output = Result<LaunchResponse, SdkError>> + Send;
}

/// Connection to the operator API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct GameDeckClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl GameDeckClient {
    /// Build a client from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, SdkError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a prepared request and decode a JSON body.
    ///
    /// Every failure is logged here before being returned, so callers only
    /// need to turn the error into a message.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<T, SdkError> {
        let res = request.send().await.map_err(|e| self.transport(e, path))?;

        let status = res.status();
        let text = res.text().await.map_err(|e| self.transport(e, path))?;

        if !status.is_success() {
            error!(path, status = status.as_u16(), body = %text, "API responded with error status");
            return Err(SdkError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            error!(path, error = %e, "API response could not be decoded");
            SdkError::Serialization(e)
        })
    }

    fn transport(&self, e: reqwest::Error, path: &str) -> SdkError {
        if e.is_timeout() {
            let ms = u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX);
            warn!(path, timeout_ms = ms, "API request timed out");
            SdkError::Timeout(ms)
        } else {
            error!(path, error = %e, "API request failed without response");
            SdkError::Http(e)
        }
    }
}

impl GameApi for GameDeckClient {
    async fn dashboard(&self) -> Result<DashboardResponse, SdkError> {
        let url = self.config.endpoint(DASHBOARD_PATH)?;
        debug!(%url, "fetching dashboard");
        self.execute(self.http.get(url), DASHBOARD_PATH).await
    }

    async fn login_and_launch(&self, request: &LaunchRequest) -> Result<LaunchResponse, SdkError> {
        let url = self.config.endpoint(LAUNCH_PATH)?;
        debug!(
            %url,
            user_id = %request.user_id,
            game_code = %request.game_code,
            "requesting game launch"
        );
        self.execute(self.http.post(url).json(request), LAUNCH_PATH)
            .await
    }
}
