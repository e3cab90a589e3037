//! Response of `GET /api/games/dashboard`.

use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::identity::Identity;

/// The full catalog plus the identities the session may play with.
///
/// The top-level `userId` / `agentId` / `cert` describe the primary
/// identity. `availableUsers`, when present and non-empty, is the
/// authoritative list of identities; otherwise the primary identity is
/// the only one (see [`DashboardResponse::identities`]).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Primary user id.
    pub user_id: String,
    /// Primary agent id.
    pub agent_id: String,
    /// Primary certificate.
    pub cert: String,
    /// Every game offered by the operator, in display order.
    pub games: Vec<Game>,
    /// Operator-configured sub-accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_users: Option<Vec<Identity>>,
}

impl DashboardResponse {
    /// The identity described by the top-level credential fields.
    pub fn primary_identity(&self) -> Identity {
        Identity::new(&self.user_id, &self.agent_id, &self.cert)
    }

    /// The list of identities the session may choose from.
    ///
    /// Never empty: falls back to a single-element list holding
    /// [`primary_identity`](Self::primary_identity) when the server omits
    /// `availableUsers` or sends an empty list.
    pub fn identities(&self) -> Vec<Identity> {
        match &self.available_users {
            Some(users) if !users.is_empty() => users.clone(),
            _ => vec![self.primary_identity()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(available_users: Option<serde_json::Value>) -> DashboardResponse {
        let mut body = serde_json::json!({
            "userId": "player-1",
            "agentId": "agent-7",
            "cert": "c3rt",
            "games": [],
        });
        if let Some(users) = available_users {
            body["availableUsers"] = users;
        }
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn missing_available_users_falls_back_to_primary() {
        let resp = response(None);
        assert_eq!(resp.available_users, None);
        assert_eq!(
            resp.identities(),
            vec![Identity::new("player-1", "agent-7", "c3rt")]
        );
    }

    #[test]
    fn empty_available_users_falls_back_to_primary() {
        let resp = response(Some(serde_json::json!([])));
        assert_eq!(resp.identities(), vec![resp.primary_identity()]);
    }

    #[test]
    fn available_users_are_authoritative() {
        let resp = response(Some(serde_json::json!([
            { "userId": "sub-1", "agentId": "agent-7", "cert": "a" },
            { "userId": "sub-2", "agentId": "agent-7", "cert": "b" },
        ])));
        let ids = resp.identities();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].user_id, "sub-1");
        assert_eq!(ids[1].user_id, "sub-2");
    }
}
