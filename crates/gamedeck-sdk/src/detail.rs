//! Game detail screen: fetch one game, pick an identity, launch it.
//!
//! [`DetailFlow`] is a plain state machine. It never performs I/O itself:
//! every transition that needs the network returns a [`DetailEffect`]
//! stamped with a [`RequestToken`], and the caller feeds the result back
//! with that token. Responses whose token no longer matches the pending
//! request are dropped, so a slow answer for a previous game (or a previous
//! identity) can never overwrite the current state.
//!
//! ```text
//! LoadingGame ──┬─> LoadFailed ──(retry)──> LoadingGame
//!               ├─> GameNotFound
//!               ├─> NoCredentials
//!               └─> AwaitingLaunch ──(auto)──> Launching ──┬─> Launched
//!                                                 ▲        └─> LaunchFailed
//!                                                 └──(select identity / retry)
//! ```

use gamedeck_models::{
    find_game, DashboardResponse, Game, Identity, LaunchRequest, LaunchResponse, ModelError,
};
use tracing::{debug, info, warn};

use crate::client::GameApi;
use crate::credentials::CredentialStore;
use crate::error::SdkError;

/// Message shown when the store holds no identity.
pub const NO_CREDENTIALS_MESSAGE: &str =
    "Credentials not available. Please go back to dashboard.";

/// Where the detail screen is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum DetailPhase {
    /// Fetching the catalog to find the game.
    LoadingGame,
    /// The catalog fetch failed; retry is offered.
    LoadFailed,
    /// No game with the requested code exists.
    GameNotFound,
    /// The credential store holds no identity.
    NoCredentials,
    /// Game and identity are known; no launch in flight.
    AwaitingLaunch,
    /// A launch call is in flight.
    Launching,
    /// The last launch produced a playable URL.
    Launched,
    /// The last launch failed.
    LaunchFailed,
}

/// Identifies the request a response belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestToken {
    /// Game code active when the request was issued.
    pub game_code: String,
    /// Per-flow request counter.
    pub seq: u64,
}

/// Network work requested by the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEffect {
    /// Fetch the dashboard to locate the game.
    FetchCatalog(RequestToken),
    /// Call the login-and-launch endpoint.
    Launch {
        /// Token to hand back with the result.
        token: RequestToken,
        /// Body of the launch call.
        request: LaunchRequest,
    },
}

impl DetailEffect {
    /// The token this effect's result must carry.
    pub fn token(&self) -> &RequestToken {
        match self {
            Self::FetchCatalog(token) | Self::Launch { token, .. } => token,
        }
    }
}

/// State of the game detail screen.
#[derive(Debug, Clone)]
pub struct DetailFlow {
    game_code: String,
    phase: DetailPhase,
    game: Option<Game>,
    identity: Option<Identity>,
    url: Option<String>,
    error: Option<String>,
    /// Game code whose launch already succeeded; suppresses auto-launch.
    launched_for: Option<String>,
    pending: Option<RequestToken>,
    seq: u64,
}

impl DetailFlow {
    /// Open the detail screen for `game_code`.
    ///
    /// Returns the flow and the catalog fetch to perform, or no effect when
    /// the code is empty.
    pub fn enter(game_code: &str) -> (Self, Option<DetailEffect>) {
        let mut flow = Self {
            game_code: String::new(),
            phase: DetailPhase::LoadingGame,
            game: None,
            identity: None,
            url: None,
            error: None,
            launched_for: None,
            pending: None,
            seq: 0,
        };
        let effect = flow.navigate(game_code);
        (flow, effect)
    }

    /// Switch to another game code.
    ///
    /// Clears the displayed URL and the "already launched" marker and
    /// restarts at [`DetailPhase::LoadingGame`].
    pub fn navigate(&mut self, game_code: &str) -> Option<DetailEffect> {
        let game_code = game_code.trim();
        self.game_code = game_code.to_string();
        self.game = None;
        self.identity = None;
        self.url = None;
        self.error = None;
        self.launched_for = None;
        self.pending = None;

        if game_code.is_empty() {
            self.fail(DetailPhase::GameNotFound, ModelError::MissingGameCode.to_string());
            return None;
        }

        Some(self.fetch_catalog())
    }

    /// User-initiated retry.
    ///
    /// Re-fetches after [`DetailPhase::LoadFailed`] and re-launches with the
    /// current identity after [`DetailPhase::LaunchFailed`]. Other phases
    /// have nothing to retry.
    pub fn retry(&mut self, store: &CredentialStore) -> Option<DetailEffect> {
        match self.phase {
            DetailPhase::LoadFailed => {
                self.error = None;
                Some(self.fetch_catalog())
            }
            DetailPhase::LaunchFailed => {
                let identity = store.current().or(self.identity.as_ref())?.clone();
                self.launch(identity)
            }
            _ => None,
        }
    }

    /// Apply the catalog response for `token`.
    ///
    /// Returns the auto-launch effect when the game is found, an identity is
    /// available and this game has not launched yet.
    pub fn on_catalog_loaded(
        &mut self,
        token: &RequestToken,
        result: Result<DashboardResponse, SdkError>,
        store: &CredentialStore,
    ) -> Option<DetailEffect> {
        if !self.accept(token) {
            return None;
        }

        let dashboard = match result {
            Ok(dashboard) => dashboard,
            Err(e) => {
                warn!(game_code = %self.game_code, error = %e, "game fetch failed");
                self.fail(DetailPhase::LoadFailed, e.to_string());
                return None;
            }
        };

        let game = match find_game(&dashboard.games, &self.game_code) {
            Ok(game) => game.clone(),
            Err(e) => {
                info!(game_code = %self.game_code, "game not found in catalog");
                self.fail(DetailPhase::GameNotFound, e.to_string());
                return None;
            }
        };
        self.game = Some(game);

        let Some(identity) = store.current().cloned() else {
            self.fail(DetailPhase::NoCredentials, NO_CREDENTIALS_MESSAGE.to_string());
            return None;
        };
        self.identity = Some(identity.clone());
        self.phase = DetailPhase::AwaitingLaunch;

        if self.already_launched() {
            debug!(game_code = %self.game_code, "game already launched, skipping auto-launch");
            return None;
        }
        self.launch(identity)
    }

    /// Switch to the identity with `user_id` and relaunch with it.
    ///
    /// Ignored (returns `Ok(None)`) when no game is loaded, when the
    /// session has a single identity, or when `user_id` is already current.
    /// Otherwise the store's current identity is updated, the displayed URL
    /// is cleared and exactly one launch effect is returned.
    pub fn select_identity(
        &mut self,
        user_id: &str,
        store: &mut CredentialStore,
    ) -> Result<Option<DetailEffect>, ModelError> {
        if self.game.is_none() || !store.has_choice() {
            return Ok(None);
        }
        if store.current().is_some_and(|id| id.user_id == user_id)
            && self.identity.as_ref().is_some_and(|id| id.user_id == user_id)
        {
            return Ok(None);
        }

        let identity = store.select(user_id)?.clone();
        info!(game_code = %self.game_code, user_id = %identity.user_id, "identity switched");
        Ok(self.launch(identity))
    }

    /// Apply the launch response for `token`.
    ///
    /// Returns `false` when the response is stale and was dropped.
    pub fn on_launch_completed(
        &mut self,
        token: &RequestToken,
        result: Result<LaunchResponse, SdkError>,
    ) -> bool {
        if !self.accept(token) {
            return false;
        }

        let outcome = match result {
            Ok(response) => response
                .playable_url()
                .map(String::from)
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match outcome {
            Ok(url) => {
                info!(game_code = %self.game_code, "game launched");
                self.url = Some(url);
                self.error = None;
                self.launched_for = Some(self.game_code.clone());
                self.phase = DetailPhase::Launched;
            }
            Err(message) => {
                warn!(game_code = %self.game_code, error = %message, "game launch failed");
                self.fail(DetailPhase::LaunchFailed, message);
            }
        }
        true
    }

    /// Current phase.
    pub fn phase(&self) -> DetailPhase {
        self.phase
    }

    /// Game code this screen is showing.
    pub fn game_code(&self) -> &str {
        &self.game_code
    }

    /// Game metadata, once found.
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// Identity used for the current or last launch.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Playable URL; only present while [`DetailPhase::Launched`].
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Message to show for the failure phases.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a launch already succeeded for the current game.
    pub fn already_launched(&self) -> bool {
        self.launched_for.as_deref() == Some(self.game_code.as_str())
    }

    /// Whether a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    fn next_token(&mut self) -> RequestToken {
        self.seq += 1;
        let token = RequestToken {
            game_code: self.game_code.clone(),
            seq: self.seq,
        };
        self.pending = Some(token.clone());
        token
    }

    fn fetch_catalog(&mut self) -> DetailEffect {
        self.phase = DetailPhase::LoadingGame;
        DetailEffect::FetchCatalog(self.next_token())
    }

    fn launch(&mut self, identity: Identity) -> Option<DetailEffect> {
        let request = LaunchRequest::new(&identity, self.game.as_ref()?);
        self.identity = Some(identity);
        self.url = None;
        self.error = None;
        self.phase = DetailPhase::Launching;
        let token = self.next_token();
        debug!(game_code = %self.game_code, seq = token.seq, "launch issued");
        Some(DetailEffect::Launch { token, request })
    }

    /// Consume the pending token if `token` matches it.
    fn accept(&mut self, token: &RequestToken) -> bool {
        if self.pending.as_ref() == Some(token) {
            self.pending = None;
            true
        } else {
            debug!(
                stale_game = %token.game_code,
                stale_seq = token.seq,
                game_code = %self.game_code,
                "dropping stale response"
            );
            false
        }
    }

    fn fail(&mut self, phase: DetailPhase, message: String) {
        self.phase = phase;
        self.url = None;
        self.error = Some(message);
    }
}

/// Run `effect` and every effect it leads to against `api`.
///
/// Used by one-shot front ends that simply await each call in turn.
pub async fn drive<A: GameApi>(
    api: &A,
    flow: &mut DetailFlow,
    store: &CredentialStore,
    effect: DetailEffect,
) {
    let mut next = Some(effect);
    while let Some(effect) = next.take() {
        next = match effect {
            DetailEffect::FetchCatalog(token) => {
                let result = api.dashboard().await;
                flow.on_catalog_loaded(&token, result, store)
            }
            DetailEffect::Launch { token, request } => {
                let result = api.login_and_launch(&request).await;
                flow.on_launch_completed(&token, result);
                None
            }
        };
    }
}
