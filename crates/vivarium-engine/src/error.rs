//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps every failure
//! mode during engine startup.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: vivarium_core::ConfigError,
    },

    /// The configured playfield is invalid.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: vivarium_world::WorldError,
    },

    /// The oracle client could not be configured.
    #[error("oracle error: {source}")]
    Oracle {
        /// The underlying oracle error.
        #[from]
        source: vivarium_oracle::OracleError,
    },
}
