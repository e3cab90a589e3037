//! # GameDeck SDK
//!
//! Client-side building blocks for browsing an operator's game catalog and
//! launching game sessions.
//!
//! The SDK provides:
//!
//! * [`GameDeckClient`]: HTTP client for the dashboard and
//!   login-and-launch endpoints, behind the [`GameApi`] trait.
//! * [`ClientConfig`]: API origin and request timeout.
//! * [`CredentialStore`]: the session's current identity and the
//!   identities it may switch between.
//! * [`Catalog`]: catalog screen state with client-side search.
//! * [`DetailFlow`]: game detail / launch state machine with stale
//!   response suppression.
//! * [`SdkError`]: unified error type for all SDK operations.
//!
//! Types from [`gamedeck_models`] are re-exported for convenience.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use gamedeck_sdk::{detail, Catalog, ClientConfig, CredentialStore, DetailFlow, GameApi, GameDeckClient};
//!
//! # async fn run() -> Result<(), gamedeck_sdk::SdkError> {
//! let client = GameDeckClient::new(&ClientConfig::from_env()?)?;
//! let mut store = CredentialStore::new();
//!
//! let mut catalog = Catalog::new();
//! let token = catalog.begin_fetch();
//! catalog.on_dashboard(token, client.dashboard().await, &mut store);
//!
//! let (mut flow, effect) = DetailFlow::enter("G1");
//! if let Some(effect) = effect {
//!     detail::drive(&client, &mut flow, &store, effect).await;
//! }
//! println!("{:?}", flow.url());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod credentials;
pub mod detail;
pub mod error;

pub use catalog::{Catalog, CatalogPhase};
pub use client::{GameApi, GameDeckClient};
pub use config::ClientConfig;
pub use credentials::CredentialStore;
pub use detail::{DetailEffect, DetailFlow, DetailPhase, RequestToken};
pub use error::SdkError;

// Re-export the wire types for ergonomic usage.
pub use gamedeck_models::{
    filter_games, BetConfig, DashboardResponse, Game, Identity, LaunchRequest, LaunchResponse,
    ModelError, LAUNCH_SUCCESS_STATUS,
};
