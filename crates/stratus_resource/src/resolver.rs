//! Resource reference resolution.
//!
//! [`ResourceResolver`] turns the `(urn, id)` pair carried by a resource
//! reference into a [`Resolution`], using the constructors in a
//! [`ResourceRegistry`]. When no constructor matches, the
//! [`UnknownTypePolicy`] decides what happens.

use crate::error::ResolveError;
use crate::handle::ResourceHandle;
use crate::registry::ResourceRegistry;
use crate::urn::Urn;

/// What to do with a reference whose type has no registered constructor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownTypePolicy {
    /// Fail with [`ResolveError::UnrecognizedResourceType`].
    Strict,
    /// Fall back to a dependency-only handle (default).
    #[default]
    DependencyOnly,
    /// Degrade the reference to its id, or its URN if it has no id.
    Identifier,
}

/// Outcome of resolving a resource reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A typed or dependency-only handle.
    Handle(ResourceHandle),
    /// The reference's identifier string, or `None` if its id is not yet known.
    Identifier(Option<String>),
}

/// Resolves resource references against a registry.
#[derive(Debug, Clone, Copy)]
pub struct ResourceResolver<'a> {
    registry: &'a ResourceRegistry,
    policy: UnknownTypePolicy,
}

impl<'a> ResourceResolver<'a> {
    /// Creates a resolver over `registry`.
    #[must_use]
    pub fn new(registry: &'a ResourceRegistry, policy: UnknownTypePolicy) -> Self {
        Self { registry, policy }
    }

    /// Resolves a reference.
    ///
    /// An empty `raw_id` means the id is not yet known: typed handles store
    /// it as absent and [`UnknownTypePolicy::Identifier`] yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnrecognizedResourceType`] under
    /// [`UnknownTypePolicy::Strict`] when no constructor accepts the type.
    pub fn resolve(&self, urn: &Urn, raw_id: Option<&str>) -> Result<Resolution, ResolveError> {
        let Ok(parts) = urn.parts() else {
            tracing::debug!(%urn, "resource reference urn does not parse");
            return self.fallback(urn, raw_id, "");
        };

        let type_token = parts.type_token;
        let constructed = self
            .registry
            .lookup(&type_token)
            .and_then(|module| module.construct(parts.name, type_token.as_str(), urn));

        match constructed {
            Some(resource) => {
                let id = raw_id.filter(|id| !id.is_empty()).map(str::to_string);
                Ok(Resolution::Handle(ResourceHandle::typed(
                    urn.clone(),
                    id,
                    resource,
                )))
            }
            None => self.fallback(urn, raw_id, type_token.as_str()),
        }
    }

    fn fallback(
        &self,
        urn: &Urn,
        raw_id: Option<&str>,
        type_token: &str,
    ) -> Result<Resolution, ResolveError> {
        match self.policy {
            UnknownTypePolicy::Strict => Err(ResolveError::UnrecognizedResourceType {
                type_token: type_token.to_string(),
                urn: urn.to_string(),
            }),
            UnknownTypePolicy::DependencyOnly => {
                tracing::warn!(
                    %urn,
                    type_token,
                    "no resource module for type, using dependency-only handle"
                );
                Ok(Resolution::Handle(ResourceHandle::dependency(urn.clone())))
            }
            UnknownTypePolicy::Identifier => {
                let identifier = match raw_id {
                    Some("") => None,
                    Some(id) => Some(id.to_string()),
                    None => Some(urn.to_string()),
                };
                Ok(Resolution::Identifier(identifier))
            }
        }
    }
}
