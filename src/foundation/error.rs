/// Convenience result type used across postkit.
pub type PostkitResult<T> = Result<T, PostkitError>;

/// Top-level error taxonomy used by engine, store and renderer APIs.
#[derive(thiserror::Error, Debug)]
pub enum PostkitError {
    /// Invalid caller-provided values (sizes, indices that must exist, option values).
    #[error("validation error: {0}")]
    Validation(String),

    /// An input bitmap could not be decoded (non-image file, corrupt data).
    #[error("decode error: {0}")]
    Decode(String),

    /// A template file or template store could not be read or written.
    #[error("template error: {0}")]
    Template(String),

    /// Raster serialization failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PostkitError {
    /// Build a [`PostkitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PostkitError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PostkitError::Template`] value.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Build a [`PostkitError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PostkitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PostkitError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
