//! Resource URNs and type tokens.
//!
//! The engine names every resource instance with a URN of the form:
//!
//! ```text
//! urn:pulumi:<stack>::<project>::<qualified type>::<name>
//! ```
//!
//! The qualified type lists parent types separated by `$`; the last segment
//! is the resource's own type token, `package:module:Type`.
//!
//! [`Urn`] itself is unchecked: dependency annotations may carry arbitrary
//! strings, so parsing only happens when a caller asks for [`Urn::parts`].

use crate::error::UrnError;
use core::fmt;
use std::sync::Arc;

const URN_PREFIX: &str = "urn:pulumi:";
const SEGMENT_SEPARATOR: &str = "::";

/// Unique identifier for a resource instance.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Urn(Arc<str>);

impl Urn {
    /// Wraps a URN string without validating it.
    #[must_use]
    pub fn new(urn: impl AsRef<str>) -> Self {
        Self(Arc::from(urn.as_ref()))
    }

    /// Returns the URN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the URN into its components.
    ///
    /// # Errors
    ///
    /// Returns [`UrnError::Malformed`] if the URN does not follow the engine
    /// grammar.
    pub fn parts(&self) -> Result<UrnParts<'_>, UrnError> {
        let malformed = || UrnError::Malformed(self.0.to_string());

        let rest = self.0.strip_prefix(URN_PREFIX).ok_or_else(malformed)?;
        let mut segments = rest.splitn(4, SEGMENT_SEPARATOR);
        let (Some(stack), Some(project), Some(qualified_type), Some(name)) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(malformed());
        };

        if qualified_type.is_empty() {
            return Err(malformed());
        }

        // Parent types come first; the resource's own type is the last segment.
        let type_token = qualified_type.rsplit('$').next().unwrap_or(qualified_type);

        Ok(UrnParts {
            stack,
            project,
            qualified_type,
            type_token: TypeToken::parse(type_token),
            name,
        })
    }
}

impl fmt::Debug for Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Urn").field(&&*self.0).finish()
    }
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Urn {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Urn {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl AsRef<str> for Urn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The components of a parsed [`Urn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrnParts<'a> {
    /// Stack the resource belongs to.
    pub stack: &'a str,
    /// Project the resource belongs to.
    pub project: &'a str,
    /// Full `$`-separated type chain including parent types.
    pub qualified_type: &'a str,
    /// The resource's own type token.
    pub type_token: TypeToken<'a>,
    /// The resource's logical name.
    pub name: &'a str,
}

/// A `package:module:Type` type token.
///
/// Missing trailing segments parse as empty strings, so `"pkg"` yields an
/// empty module and type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeToken<'a> {
    raw: &'a str,
    /// Package segment.
    pub package: &'a str,
    /// Module segment.
    pub module: &'a str,
    /// Type name segment.
    pub name: &'a str,
}

impl<'a> TypeToken<'a> {
    /// Splits a raw type token.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        let mut segments = raw.splitn(3, ':');
        let package = segments.next().unwrap_or_default();
        let module = segments.next().unwrap_or_default();
        let name = segments.next().unwrap_or_default();
        Self {
            raw,
            package,
            module,
            name,
        }
    }

    /// Returns the unsplit token.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Returns `true` for provider types (`pulumi:providers:<package>`).
    ///
    /// For providers the type name is the package whose provider this is.
    #[must_use]
    pub fn is_provider(&self) -> bool {
        self.package == "pulumi" && self.module == "providers"
    }
}

impl fmt::Display for TypeToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}
