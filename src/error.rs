//! Error types for network map generation.

/// Errors raised while building, annotating or emitting a network map
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid topology parameters: {reason}")]
    InvalidTopologyParameters { reason: String },

    #[error("Sum of {field} exceeds the representable range")]
    AggregateOverflow { field: &'static str },

    #[error("Failed to write network map: {0}")]
    SinkWriteFailure(#[source] std::io::Error),

    #[error("Failed to serialize network map: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MapError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        MapError::InvalidTopologyParameters { reason: reason.into() }
    }
}
