//! Error types for resource resolution.

/// A URN that does not follow the engine grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrnError {
    /// The URN could not be split into stack, project, type and name.
    #[error("malformed urn '{0}': expected 'urn:pulumi:<stack>::<project>::<type>::<name>'")]
    Malformed(String),
}

/// Error turning a resource reference into a handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No registered constructor accepts the reference's type.
    #[error("unrecognized resource type '{type_token}' for urn '{urn}'")]
    UnrecognizedResourceType {
        /// The type token extracted from the URN, or empty if it did not parse.
        type_token: String,
        /// The URN of the reference.
        urn: String,
    },
}
