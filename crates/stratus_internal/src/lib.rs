//! # Stratus Internal Library
//!
//! Re-exports the Stratus crates for convenience.

/// Tracing setup.
pub use stratus_core;

/// Deferred output values.
pub use stratus_output;

/// URNs, resource handles and the constructor registry.
pub use stratus_resource;

/// Property bag decoding.
pub use stratus_rpc;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use stratus_core::{TracingConfig, TracingFormat};
    pub use stratus_output::{Output, OutputError, Settled};
    pub use stratus_resource::{
        DependencySet, Resource, ResourceHandle, ResourceModule, ResourceRegistry,
        UnknownTypePolicy, Urn,
    };
    pub use stratus_rpc::{
        DecodeError, DecodeOptions, DecodedProperties, Decoder, PropertyBag,
        PropertyDependencies, Value, contains_outputs,
    };
}
