//! Resource identities for Stratus.
//!
//! Decoded property values refer to resources in two ways: by URN in
//! dependency sets, and by resource-reference sigils that rebuild a handle to
//! the referenced resource. This crate provides both halves:
//!
//! - [`Urn`] / [`TypeToken`] - engine URNs and their type tokens
//! - [`DependencySet`] - union-only sets of URNs
//! - [`ResourceHandle`] - typed or dependency-only resource identities
//! - [`ResourceRegistry`] - constructors for typed resources, keyed by module
//!   or package
//! - [`ResourceResolver`] - turns `(urn, id)` into a [`Resolution`]
//! - [`HandleTable`] - handles seen during a single decode pass
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use stratus_resource::{
//!     Resolution, Resource, ResourceRegistry, ResourceResolver, UnknownTypePolicy, Urn,
//! };
//!
//! #[derive(Debug)]
//! struct Bucket { urn: Urn }
//!
//! impl Resource for Bucket {
//!     fn urn(&self) -> &Urn { &self.urn }
//! }
//!
//! let registry = ResourceRegistry::new();
//! registry.register_module("aws", "s3", |_: &str, _: &str, urn: &Urn| {
//!     Some(Arc::new(Bucket { urn: urn.clone() }) as Arc<dyn Resource>)
//! });
//!
//! let resolver = ResourceResolver::new(&registry, UnknownTypePolicy::Strict);
//! let urn = Urn::new("urn:pulumi:dev::site::aws:s3:Bucket::assets");
//!
//! let Resolution::Handle(handle) = resolver.resolve(&urn, Some("assets-1234"))? else {
//!     unreachable!();
//! };
//! assert!(handle.downcast_ref::<Bucket>().is_some());
//! # Ok::<(), stratus_resource::ResolveError>(())
//! ```

pub mod error;
pub mod registry;
pub mod resolver;

mod dependency;
mod handle;
mod table;
mod urn;

pub use dependency::DependencySet;
pub use error::{ResolveError, UrnError};
pub use handle::{DependencyResource, Resource, ResourceHandle, TypedHandle};
pub use registry::{RegistryScope, ResourceModule, ResourceRegistry};
pub use resolver::{Resolution, ResourceResolver, UnknownTypePolicy};
pub use table::HandleTable;
pub use urn::{TypeToken, Urn, UrnParts};
