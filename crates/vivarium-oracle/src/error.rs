//! Error types for the decision oracle client.
//!
//! None of these ever reach the tick loop: the client logs them and answers
//! `WANDER` instead.

/// Errors that can occur while consulting the decision oracle.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The request could not be sent or the connection failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The oracle answered with a non-success status.
    #[error("oracle returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response could not be interpreted as a behavior.
    #[error("response parse error: {0}")]
    Parse(String),

    /// Failed to render a prompt template.
    #[error("template render error: {0}")]
    Template(String),

    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// Serialization or deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
