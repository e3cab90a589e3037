//! Mock wallet configuration, read from the environment at startup.

/// Settings for the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConfig {
    /// Port to listen on (default `8080`).
    pub listen_port: u16,
    /// Number of sub-accounts advertised next to the primary identity.
    pub sub_accounts: usize,
    /// Agent id shared by every identity.
    pub agent_id: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            listen_port: 8080,
            sub_accounts: 2,
            agent_id: "mock-agent".to_string(),
        }
    }
}

impl MockConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                   | Default      | Description                         |
    /// |----------------------------|--------------|-------------------------------------|
    /// | `MOCK_WALLET_PORT`         | `8080`       | HTTP listen port                    |
    /// | `MOCK_WALLET_SUB_ACCOUNTS` | `2`          | Extra identities in `availableUsers` |
    /// | `MOCK_WALLET_AGENT_ID`     | `mock-agent` | Agent id of every identity          |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let listen_port = std::env::var("MOCK_WALLET_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.listen_port);
        let sub_accounts = std::env::var("MOCK_WALLET_SUB_ACCOUNTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.sub_accounts);
        let agent_id = std::env::var("MOCK_WALLET_AGENT_ID").unwrap_or(defaults.agent_id);

        Self {
            listen_port,
            sub_accounts,
            agent_id,
        }
    }
}
