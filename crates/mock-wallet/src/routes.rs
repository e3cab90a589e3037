//! HTTP handlers mirroring the operator API.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::routing::{get, post};
use axum::Router;
use gamedeck_models::{
    DashboardResponse, Game, Identity, LaunchRequest, LaunchResponse, LAUNCH_SUCCESS_STATUS,
};
use tracing::info;
use uuid::Uuid;

use crate::config::MockConfig;
use crate::fixtures::{self, BROKE_SUFFIX};

/// Wallet status for an unknown identity or bad certificate.
pub const STATUS_INVALID_CREDENTIALS: &str = "1001";
/// Wallet status for an unknown game code.
pub const STATUS_GAME_NOT_FOUND: &str = "1002";
/// Wallet status for a game that is not currently offered.
pub const STATUS_GAME_INACTIVE: &str = "1003";
/// Wallet status for an empty wallet.
pub const STATUS_INSUFFICIENT_BALANCE: &str = "9999";

const OPERATOR_ID: &str = "mock-operator";
const DEFAULT_FRONTEND_HOST: &str = "play.example.com";

/// State shared across all handlers.
pub struct WalletState {
    identities: Vec<Identity>,
    games: Vec<Game>,
}

impl WalletState {
    /// Load the fixtures for `config`.
    pub fn new(config: &MockConfig) -> Self {
        Self {
            identities: fixtures::identities(config),
            games: fixtures::games(),
        }
    }
}

/// Build the router with both endpoints.
pub fn router(state: Arc<WalletState>) -> Router {
    Router::new()
        .route("/api/games/dashboard", get(dashboard))
        .route("/wallet/doLoginAndLaunchGame", post(login_and_launch))
        .with_state(state)
}

/// `GET /api/games/dashboard`
///
/// `availableUsers` is omitted when there are no sub-accounts, exercising
/// the client's single-identity fallback.
async fn dashboard(State(state): State<Arc<WalletState>>) -> Json<DashboardResponse> {
    let primary = &state.identities[0];
    let available_users = (state.identities.len() > 1).then(|| state.identities.clone());

    info!(games = state.games.len(), identities = state.identities.len(), "dashboard served");

    Json(DashboardResponse {
        user_id: primary.user_id.clone(),
        agent_id: primary.agent_id.clone(),
        cert: primary.cert.clone(),
        games: state.games.clone(),
        available_users,
    })
}

/// `POST /wallet/doLoginAndLaunchGame`
///
/// Always answers `200 OK`; the outcome is carried in `status`.
async fn login_and_launch(
    State(state): State<Arc<WalletState>>,
    Json(req): Json<LaunchRequest>,
) -> Json<LaunchResponse> {
    let known = state.identities.iter().any(|id| {
        id.user_id == req.user_id && id.agent_id == req.agent_id && id.cert == req.cert
    });
    if !known {
        info!(user_id = %req.user_id, "launch rejected: invalid credentials");
        return Json(LaunchResponse::failure(
            STATUS_INVALID_CREDENTIALS,
            Some("Invalid credentials"),
        ));
    }

    let Some(game) = state.games.iter().find(|g| g.game_code == req.game_code) else {
        info!(game_code = %req.game_code, "launch rejected: unknown game");
        return Json(LaunchResponse::failure(
            STATUS_GAME_NOT_FOUND,
            Some("Game not found"),
        ));
    };

    if !game.is_active {
        info!(game_code = %req.game_code, "launch rejected: inactive game");
        return Json(LaunchResponse::failure(
            STATUS_GAME_INACTIVE,
            Some("Game is not available"),
        ));
    }

    if req.user_id.ends_with(BROKE_SUFFIX) {
        info!(user_id = %req.user_id, "launch rejected: insufficient balance");
        return Json(LaunchResponse::failure(
            STATUS_INSUFFICIENT_BALANCE,
            Some("Insufficient balance"),
        ));
    }

    let token = Uuid::new_v4().to_string();
    let host = game
        .frontend_host
        .as_deref()
        .unwrap_or(DEFAULT_FRONTEND_HOST);
    let url = format!("https://{host}/play/{}?token={token}", game.game_code);

    info!(user_id = %req.user_id, game_code = %game.game_code, "game launched");

    Json(LaunchResponse {
        status: LAUNCH_SUCCESS_STATUS.to_string(),
        url: Some(url),
        extension: Vec::new(),
        desc: None,
        game_code: Some(game.game_code.clone()),
        operator_id: Some(OPERATOR_ID.to_string()),
        token: Some(token),
    })
}
