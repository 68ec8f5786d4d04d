/// Crate-wide result alias.
pub type PixelprintResult<T> = Result<T, PixelprintError>;

/// Errors produced by fallible construction and host-side adapters.
///
/// Session stepping never returns these: not-ready and degenerate states are recovered locally.
#[derive(thiserror::Error, Debug)]
pub enum PixelprintError {
    /// Invalid input shape or parameter (buffer length, cluster count, dimensions).
    #[error("validation error: {0}")]
    Validation(String),

    /// Image bytes could not be decoded into a pixel buffer.
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixelprintError {
    /// Build a [`PixelprintError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PixelprintError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PixelprintError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PixelprintError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
