//! Player identities used to launch games.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Credentials identifying a player session.
///
/// * `user_id`  – player account.
/// * `agent_id` – operator agent the account belongs to.
/// * `cert`     – opaque certificate token presented to the wallet.
///
/// An operator may expose several identities (sub-accounts) per session;
/// exactly one of them is selected at a time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Player account identifier.
    pub user_id: String,
    /// Agent identifier.
    pub agent_id: String,
    /// Certificate token.
    pub cert: String,
}

impl Identity {
    /// Build an identity from its three parts.
    pub fn new(
        user_id: impl Into<String>,
        agent_id: impl Into<String>,
        cert: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            agent_id: agent_id.into(),
            cert: cert.into(),
        }
    }
}

/// Displays `user_id@agent_id`; the certificate is never printed.
impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user_id, self.agent_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() {
        let id = Identity::new("u1", "a1", "secret");
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "userId": "u1", "agentId": "a1", "cert": "secret" })
        );
    }

    #[test]
    fn display_hides_certificate() {
        let id = Identity::new("u1", "a1", "secret");
        assert_eq!(id.to_string(), "u1@a1");
    }
}
