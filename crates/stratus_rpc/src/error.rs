//! Error types for property decoding.

use stratus_resource::ResolveError;

/// A special-value object whose shape is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct MalformedSpecialValue {
    reason: String,
}

impl MalformedSpecialValue {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Describes what is wrong with the value.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Errors that abort a decode call.
///
/// A decode either produces every property or fails as a whole; no partial
/// results are returned alongside these errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A signature key was present with an unrecognized signature or fields.
    #[error("malformed special value at '{path}': {source}")]
    MalformedSpecialValue {
        /// Location of the offending node, e.g. `tags.owners[0]`.
        path: String,
        /// What was wrong with it.
        #[source]
        source: MalformedSpecialValue,
    },

    /// A resource reference has an unrecognized type under a strict policy.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
