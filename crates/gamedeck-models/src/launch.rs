//! Request and response of `POST /wallet/doLoginAndLaunchGame`.
//!
//! The wallet always answers with a well-formed body; success is signalled
//! in-band through [`LaunchResponse::status`]. Use
//! [`LaunchResponse::playable_url`] rather than inspecting the fields
//! directly.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::game::Game;
use crate::identity::Identity;

/// Status code the wallet returns on a successful launch.
pub const LAUNCH_SUCCESS_STATUS: &str = "0000";

/// Message shown when the wallet gives no reason for a failed launch.
pub const LAUNCH_FAILED_MESSAGE: &str = "Failed to launch game";

/// Body of the login-and-launch call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    /// Certificate of the selected identity.
    pub cert: String,
    /// Agent id of the selected identity.
    pub agent_id: String,
    /// User id of the selected identity.
    pub user_id: String,
    /// Game platform.
    pub platform: String,
    /// Game type.
    pub game_type: String,
    /// Game code.
    pub game_code: String,
}

impl LaunchRequest {
    /// Combine an identity and a game into a launch request.
    pub fn new(identity: &Identity, game: &Game) -> Self {
        Self {
            cert: identity.cert.clone(),
            agent_id: identity.agent_id.clone(),
            user_id: identity.user_id.clone(),
            platform: game.platform.clone(),
            game_type: game.game_type.clone(),
            game_code: game.game_code.clone(),
        }
    }
}

/// Wallet answer to a launch call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LaunchResponse {
    /// `"0000"` on success, an operator-specific code otherwise.
    pub status: String,
    /// Playable game URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Operator-specific extension data.
    #[serde(default)]
    pub extension: Vec<serde_json::Value>,
    /// Human-readable failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Echo of the launched game code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_code: Option<String>,
    /// Operator that served the launch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<String>,
    /// Session token issued by the wallet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl LaunchResponse {
    /// A successful response carrying `url`.
    pub fn success(url: impl Into<String>) -> Self {
        Self {
            status: LAUNCH_SUCCESS_STATUS.to_string(),
            url: Some(url.into()),
            extension: Vec::new(),
            desc: None,
            game_code: None,
            operator_id: None,
            token: None,
        }
    }

    /// A failed response with the given status and optional reason.
    pub fn failure(status: impl Into<String>, desc: Option<&str>) -> Self {
        Self {
            status: status.into(),
            url: None,
            extension: Vec::new(),
            desc: desc.map(String::from),
            game_code: None,
            operator_id: None,
            token: None,
        }
    }

    /// Whether the wallet reported success *and* returned a URL.
    pub fn is_success(&self) -> bool {
        self.playable_url().is_ok()
    }

    /// The URL to play, if and only if the launch succeeded.
    ///
    /// Success requires `status == "0000"` and a non-empty `url`; any other
    /// combination is a failure.
    pub fn playable_url(&self) -> Result<&str, ModelError> {
        if self.status != LAUNCH_SUCCESS_STATUS {
            return Err(ModelError::LaunchRejected {
                status: self.status.clone(),
                description: self.desc.clone().filter(|d| !d.is_empty()),
            });
        }
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(ModelError::MissingLaunchUrl),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tests::game;

    #[test]
    fn request_combines_identity_and_game() {
        let id = Identity::new("u1", "a1", "cert-1");
        let req = LaunchRequest::new(&id, &game("G1", "Game One", None));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "cert": "cert-1",
                "agentId": "a1",
                "userId": "u1",
                "platform": "SLOT",
                "gameType": "VIDEO",
                "gameCode": "G1",
            })
        );
    }

    #[test]
    fn success_requires_status_and_url() {
        let resp = LaunchResponse::success("https://x/y");
        assert_eq!(resp.playable_url(), Ok("https://x/y"));
        assert!(resp.is_success());
    }

    #[test]
    fn success_status_without_url_is_failure() {
        let resp: LaunchResponse =
            serde_json::from_value(serde_json::json!({ "status": "0000", "extension": [] }))
                .unwrap();
        assert_eq!(resp.playable_url(), Err(ModelError::MissingLaunchUrl));
        assert!(!resp.is_success());
    }

    #[test]
    fn success_status_with_empty_url_is_failure() {
        let mut resp = LaunchResponse::success("");
        assert!(!resp.is_success());
        resp.url = None;
        assert!(!resp.is_success());
    }

    #[test]
    fn url_with_failure_status_is_failure() {
        let mut resp = LaunchResponse::failure("9999", Some("Insufficient balance"));
        resp.url = Some("https://x/y".into());
        let err = resp.playable_url().unwrap_err();
        assert_eq!(err.to_string(), "Insufficient balance");
    }

    #[test]
    fn empty_description_uses_generic_message() {
        let resp = LaunchResponse::failure("1001", Some(""));
        assert_eq!(
            resp.playable_url().unwrap_err().to_string(),
            LAUNCH_FAILED_MESSAGE
        );
    }

    #[test]
    fn deserializes_full_wallet_body() {
        let resp: LaunchResponse = serde_json::from_value(serde_json::json!({
            "status": "0000",
            "url": "https://games.example.com/play/G1",
            "extension": [{ "k": "v" }],
            "gameCode": "G1",
            "operatorId": "op-1",
            "token": "t0k"
        }))
        .unwrap();
        assert_eq!(resp.extension.len(), 1);
        assert_eq!(resp.operator_id.as_deref(), Some("op-1"));
        assert!(resp.is_success());
    }
}
