//! Decoder configuration.

use stratus_resource::UnknownTypePolicy;

/// Options controlling a [`Decoder`](crate::Decoder).
///
/// # Example
///
/// ```
/// use stratus_rpc::DecodeOptions;
/// use stratus_resource::UnknownTypePolicy;
///
/// let options = DecodeOptions::new()
///     .with_unknown_type_policy(UnknownTypePolicy::Strict)
///     .with_keep_unknowns(false);
///
/// assert_eq!(options.unknown_type_policy(), UnknownTypePolicy::Strict);
/// assert!(!options.keep_unknowns());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    unknown_type_policy: UnknownTypePolicy,
    keep_unknowns: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            unknown_type_policy: UnknownTypePolicy::default(),
            keep_unknowns: true,
        }
    }
}

impl DecodeOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets what happens to references whose type has no constructor.
    #[must_use]
    pub fn with_unknown_type_policy(mut self, policy: UnknownTypePolicy) -> Self {
        self.unknown_type_policy = policy;
        self
    }

    /// Sets whether wholly unknown properties are kept.
    ///
    /// When `false`, a property that would decode to an unknown output is
    /// left out of the result.
    #[must_use]
    pub fn with_keep_unknowns(mut self, keep: bool) -> Self {
        self.keep_unknowns = keep;
        self
    }

    /// Returns the unknown type policy.
    #[must_use]
    pub fn unknown_type_policy(&self) -> UnknownTypePolicy {
        self.unknown_type_policy
    }

    /// Returns whether wholly unknown properties are kept.
    #[must_use]
    pub fn keep_unknowns(&self) -> bool {
        self.keep_unknowns
    }
}
