//! Resource constructor registry.
//!
//! The [`ResourceRegistry`] maps a scope to a [`ResourceModule`] that can
//! rebuild typed resource objects from their URN. A scope is one of:
//!
//! - **Module**: `(package, module)`, e.g. `("aws", "s3/bucket")`.
//! - **Package**: a package name, used for provider resources and as a
//!   package-wide fallback.
//!
//! Resource SDK bootstrap code registers modules once; decoding only reads.
//! The registry is shared behind an `Arc` and passed explicitly to decoders.
//! Tests call [`reset`](ResourceRegistry::reset) between runs.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use stratus_resource::{Resource, ResourceRegistry, Urn};
//!
//! #[derive(Debug)]
//! struct Bucket { urn: Urn }
//!
//! impl Resource for Bucket {
//!     fn urn(&self) -> &Urn { &self.urn }
//! }
//!
//! let registry = ResourceRegistry::new();
//! registry.register_module("aws", "s3", |_name: &str, ty: &str, urn: &Urn| {
//!     (ty == "aws:s3:Bucket").then(|| Arc::new(Bucket { urn: urn.clone() }) as Arc<dyn Resource>)
//! });
//!
//! assert!(registry.has_module("aws", "s3"));
//! ```

use crate::handle::Resource;
use crate::urn::{TypeToken, Urn};
use hashbrown::HashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Constructs typed resources for the types it owns.
pub trait ResourceModule: Send + Sync + 'static {
    /// Builds the resource named `name` with type token `type_token`.
    ///
    /// Returns `None` if this module does not know the type.
    fn construct(&self, name: &str, type_token: &str, urn: &Urn) -> Option<Arc<dyn Resource>>;
}

impl<F> ResourceModule for F
where
    F: Fn(&str, &str, &Urn) -> Option<Arc<dyn Resource>> + Send + Sync + 'static,
{
    fn construct(&self, name: &str, type_token: &str, urn: &Urn) -> Option<Arc<dyn Resource>> {
        self(name, type_token, urn)
    }
}

/// Key under which a module is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegistryScope {
    /// A `package:module` pair.
    Module {
        /// Package name.
        package: String,
        /// Module name within the package.
        module: String,
    },
    /// A whole package.
    Package(String),
}

impl core::fmt::Display for RegistryScope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Module { package, module } => write!(f, "{package}:{module}"),
            Self::Package(package) => f.write_str(package),
        }
    }
}

/// Registry of resource constructors.
#[derive(Default)]
pub struct ResourceRegistry {
    modules: RwLock<HashMap<RegistryScope, Arc<dyn ResourceModule>>>,
}

impl core::fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResourceRegistry")
            .field("scopes", &self.scopes())
            .finish()
    }
}

impl ResourceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            modules: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a module for the `package:module` scope.
    ///
    /// # Panics
    ///
    /// Panics if a module is already registered for the same scope.
    pub fn register_module(
        &self,
        package: impl Into<String>,
        module: impl Into<String>,
        constructor: impl ResourceModule,
    ) {
        self.register(
            RegistryScope::Module {
                package: package.into(),
                module: module.into(),
            },
            constructor,
        );
    }

    /// Registers a module for a whole package.
    ///
    /// Provider resources (`pulumi:providers:<package>`) resolve through the
    /// package scope.
    ///
    /// # Panics
    ///
    /// Panics if a module is already registered for the same package.
    pub fn register_package(&self, package: impl Into<String>, constructor: impl ResourceModule) {
        self.register(RegistryScope::Package(package.into()), constructor);
    }

    /// Registers a module for an explicit scope.
    ///
    /// # Panics
    ///
    /// Panics if a module is already registered for the same scope.
    pub fn register(&self, scope: RegistryScope, constructor: impl ResourceModule) {
        let mut modules = self.modules.write();
        assert!(
            !modules.contains_key(&scope),
            "resource module '{scope}' is already registered"
        );
        tracing::debug!(%scope, "registered resource module");
        modules.insert(scope, Arc::new(constructor));
    }

    /// Removes every registration.
    pub fn reset(&self) {
        self.modules.write().clear();
    }

    /// Returns the most specific module for a type token.
    ///
    /// Providers look up their package scope by type name. Other types try
    /// the module scope first, then the package scope.
    #[must_use]
    pub fn lookup(&self, type_token: &TypeToken<'_>) -> Option<Arc<dyn ResourceModule>> {
        let modules = self.modules.read();

        if type_token.is_provider() {
            return modules
                .get(&RegistryScope::Package(type_token.name.to_string()))
                .cloned();
        }

        let module_scope = RegistryScope::Module {
            package: type_token.package.to_string(),
            module: type_token.module.to_string(),
        };
        modules
            .get(&module_scope)
            .or_else(|| modules.get(&RegistryScope::Package(type_token.package.to_string())))
            .cloned()
    }

    /// Checks if a module is registered for `package:module`.
    #[must_use]
    pub fn has_module(&self, package: &str, module: &str) -> bool {
        self.modules.read().contains_key(&RegistryScope::Module {
            package: package.to_string(),
            module: module.to_string(),
        })
    }

    /// Checks if a module is registered for a whole package.
    #[must_use]
    pub fn has_package(&self, package: &str) -> bool {
        self.modules
            .read()
            .contains_key(&RegistryScope::Package(package.to_string()))
    }

    /// Lists registered scopes.
    #[must_use]
    pub fn scopes(&self) -> Vec<RegistryScope> {
        self.modules.read().keys().cloned().collect()
    }
}
