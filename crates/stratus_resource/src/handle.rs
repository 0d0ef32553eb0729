//! Resource handles produced by decoding.
//!
//! A [`ResourceHandle`] is either:
//!
//! - **Typed**: built by a registered [`ResourceModule`](crate::ResourceModule)
//!   and downcastable to the concrete resource type.
//! - **Dependency**: a bare URN with no state, used when no richer reference
//!   is available.

use crate::urn::Urn;
use core::any::Any;
use core::fmt;
use std::sync::Arc;

/// A concrete resource object constructed through the registry.
///
/// Implementors are ordinary structs; their own fields may hold deferred
/// values that resolve later. Handles are opaque to output scanning, so
/// those fields are never inspected by this crate.
pub trait Resource: Any + Send + Sync + fmt::Debug {
    /// The URN this resource was constructed for.
    fn urn(&self) -> &Urn;
}

/// A resource handle keyed by URN.
#[derive(Clone, Debug)]
pub enum ResourceHandle {
    /// A handle backed by a constructed resource object.
    Typed(TypedHandle),
    /// A minimal handle carrying only a URN.
    Dependency(DependencyResource),
}

impl ResourceHandle {
    /// Creates a typed handle.
    #[must_use]
    pub fn typed(urn: Urn, id: Option<String>, resource: Arc<dyn Resource>) -> Self {
        Self::Typed(TypedHandle { urn, id, resource })
    }

    /// Creates a dependency-only handle.
    #[must_use]
    pub fn dependency(urn: Urn) -> Self {
        Self::Dependency(DependencyResource { urn })
    }

    /// Returns the URN identifying this resource.
    #[must_use]
    pub fn urn(&self) -> &Urn {
        match self {
            Self::Typed(handle) => &handle.urn,
            Self::Dependency(handle) => &handle.urn,
        }
    }

    /// Returns the provider-assigned id, if known.
    ///
    /// Dependency-only handles never carry an id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Typed(handle) => handle.id.as_deref(),
            Self::Dependency(_) => None,
        }
    }

    /// Returns `true` for dependency-only handles.
    #[must_use]
    pub fn is_dependency_only(&self) -> bool {
        matches!(self, Self::Dependency(_))
    }

    /// Returns the constructed resource object, if this handle is typed.
    #[must_use]
    pub fn resource(&self) -> Option<&Arc<dyn Resource>> {
        match self {
            Self::Typed(handle) => Some(&handle.resource),
            Self::Dependency(_) => None,
        }
    }

    /// Downcasts the constructed resource to a concrete type.
    #[must_use]
    pub fn downcast_ref<R: Resource>(&self) -> Option<&R> {
        let resource: &dyn Any = &**self.resource()?;
        resource.downcast_ref::<R>()
    }
}

impl PartialEq for ResourceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.is_dependency_only() == other.is_dependency_only()
            && self.urn() == other.urn()
            && self.id() == other.id()
    }
}

/// Handle to a resource constructed through the registry.
#[derive(Clone)]
pub struct TypedHandle {
    urn: Urn,
    id: Option<String>,
    resource: Arc<dyn Resource>,
}

impl fmt::Debug for TypedHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedHandle")
            .field("urn", &self.urn)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// A resource known only by its URN.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyResource {
    urn: Urn,
}

impl DependencyResource {
    /// Creates a dependency-only resource.
    #[must_use]
    pub fn new(urn: Urn) -> Self {
        Self { urn }
    }

    /// Returns the URN.
    #[must_use]
    pub fn urn(&self) -> &Urn {
        &self.urn
    }
}
