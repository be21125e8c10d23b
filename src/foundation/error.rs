/// Convenience result type used across quotewall.
pub type QuotewallResult<T> = Result<T, QuotewallError>;

/// Top-level error taxonomy used by the generator APIs.
///
/// Recoverable conditions (missing font, empty quote store) are absorbed
/// inside the generation flow with deterministic fallbacks; these variants
/// surface only from the strict loading and persistence entry points.
#[derive(thiserror::Error, Debug)]
pub enum QuotewallError {
    /// A bundled or user-supplied resource could not be read or parsed.
    #[error("resource error: {0}")]
    Resource(String),

    /// Invalid geometry or text layout input.
    #[error("layout error: {0}")]
    Layout(String),

    /// The composed image could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuotewallError {
    /// Build a [`QuotewallError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`QuotewallError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`QuotewallError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
