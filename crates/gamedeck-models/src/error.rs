//! Error types for the `gamedeck-models` crate.
//!
//! Lookups and launch classification return variants of [`ModelError`].

/// Errors produced when interpreting API data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// No game code was supplied.
    #[error("Game code is required")]
    MissingGameCode,

    /// The catalog does not contain a game with this code.
    #[error("Game not found: {code}")]
    GameNotFound {
        /// The code that was looked up.
        code: String,
    },

    /// The user id is not one of the available identities.
    #[error("unknown user id \"{user_id}\"")]
    UnknownIdentity {
        /// The user id that was requested.
        user_id: String,
    },

    /// The launch endpoint answered with a non-success status.
    #[error("{}", .description.as_deref().unwrap_or(crate::launch::LAUNCH_FAILED_MESSAGE))]
    LaunchRejected {
        /// Status code returned by the wallet.
        status: String,
        /// Optional human-readable reason (`desc`).
        description: Option<String>,
    },

    /// The launch endpoint reported success but returned no URL.
    #[error("{}", crate::launch::LAUNCH_FAILED_MESSAGE)]
    MissingLaunchUrl,
}
