//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK. It separates the failure kinds a screen may want
//! to word differently: no response at all, an HTTP error status from the
//! server, and a body that could not be decoded.

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid or missing configuration (e.g. bad API URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The server answered with a non-success HTTP status.
    #[error("server error {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// Transport-level failure (connection refused, DNS, TLS...).
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = SdkError::Api {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "server error 502: bad gateway");
    }

    #[test]
    fn timeout_display() {
        assert_eq!(
            SdkError::Timeout(30_000).to_string(),
            "request timed out after 30000 ms"
        );
    }
}
