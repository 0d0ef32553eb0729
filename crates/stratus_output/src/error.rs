//! Error types for output resolution.

/// Error resolving an output's payload.
///
/// Outputs never generate failures themselves; this carries a failure from
/// whatever computation produced the payload. It is `Clone` because every
/// clone of an output observes the same result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutputError {
    /// The computation producing the payload failed.
    #[error("upstream computation failed: {message}")]
    Upstream {
        /// Description of the upstream failure.
        message: String,
    },
}

impl OutputError {
    /// Creates an [`Upstream`](Self::Upstream) error.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }
}
