//! Decoding of engine property bags.
//!
//! The engine returns resource properties as loosely typed JSON trees in
//! which special objects, marked by a signature key, stand in for secrets,
//! resource references and values with explicit metadata. This crate turns
//! such a tree into [`Value`]s whose deferred parts are
//! [`Output`](stratus_output::Output)s carrying knowledge, secrecy and
//! dependency information.
//!
//! # Core Concepts
//!
//! - [`classify`](classify::classify) - tags one raw node by shape
//! - [`Decoder`] - decodes a whole property bag in a single pass
//! - [`contains_outputs`] - checks whether a decoded value holds outputs
//! - [`DecodeOptions`] - unknown type policy and unknown retention
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use stratus_resource::{DependencySet, ResourceRegistry};
//! use stratus_rpc::sig::{SECRET_SIG, SIG_KEY};
//! use stratus_rpc::{Decoder, PropertyDependencies};
//!
//! let decoder = Decoder::new(Arc::new(ResourceRegistry::new()));
//! let properties = json!({
//!     "password": { SIG_KEY: SECRET_SIG, "value": "hunter2" },
//!     "port": 5432,
//! });
//! let dependencies = PropertyDependencies::from([(
//!     "port".to_string(),
//!     DependencySet::from_iter(["urn:pulumi:dev::app::db:index:Server::main"]),
//! )]);
//!
//! let decoded = decoder.decode(properties.as_object().unwrap(), &dependencies)?;
//!
//! let password = decoded["password"].as_output().unwrap();
//! assert!(password.is_known() && password.is_secret());
//!
//! let port = decoded["port"].as_output().unwrap();
//! assert!(!port.is_secret());
//! assert_eq!(port.dependencies().len(), 1);
//! # Ok::<(), stratus_rpc::DecodeError>(())
//! ```

pub mod classify;
pub mod error;
pub mod sig;

mod decode;
mod options;
mod path;
mod scan;
mod value;

pub use decode::Decoder;
pub use error::{DecodeError, MalformedSpecialValue};
pub use options::DecodeOptions;
pub use scan::contains_outputs;
pub use value::Value;

/// An engine property bag: property name to raw value, in wire order.
pub type PropertyBag = serde_json::Map<String, serde_json::Value>;

/// Declared dependencies per property name.
pub type PropertyDependencies = indexmap::IndexMap<String, stratus_resource::DependencySet>;

/// Decoded properties, in the order of the input bag.
pub type DecodedProperties = indexmap::IndexMap<String, Value>;
