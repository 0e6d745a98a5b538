//! Error types for world construction.

/// Errors that can occur when building the world.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    /// The playfield dimensions cannot hold any wander area.
    #[error("invalid world bounds {width}x{height} with margin {margin}")]
    InvalidBounds {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
        /// Requested inner margin.
        margin: f64,
    },
}
