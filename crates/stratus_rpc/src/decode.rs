//! Recursive property decoding.
//!
//! A [`Decoder`] turns a property bag into [`Value`]s in one synchronous
//! pass. Each raw node is classified, decoded bottom-up into a [`Decoded`]
//! summary, and collapsed at composite boundaries:
//!
//! - an unknown child makes the whole composite unknown,
//! - a secret child makes the whole composite secret,
//! - dependencies always accumulate upwards.
//!
//! Output-value wrappers seal their subtree. Their metadata goes into the
//! [`Output`] they produce and nothing leaks into the enclosing scope.
//!
//! At the top level each property is wrapped in an output if it is secret,
//! unknown, or has declared dependencies that are not already carried by
//! outputs inside it.

use crate::classify::{RawNode, classify};
use crate::error::DecodeError;
use crate::options::DecodeOptions;
use crate::path::PropertyPath;
use crate::scan::contains_outputs;
use crate::value::Value;
use crate::{DecodedProperties, PropertyBag, PropertyDependencies};
use indexmap::IndexMap;
use std::sync::Arc;
use stratus_output::Output;
use stratus_resource::{
    DependencySet, HandleTable, Resolution, ResourceRegistry, ResourceResolver, Urn,
};

/// Decodes engine property bags.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use serde_json::json;
/// use stratus_resource::ResourceRegistry;
/// use stratus_rpc::{Decoder, PropertyDependencies, Value};
///
/// let decoder = Decoder::new(Arc::new(ResourceRegistry::new()));
/// let properties = json!({ "name": "web", "replicas": 3 });
///
/// let decoded = decoder.decode(properties.as_object().unwrap(), &PropertyDependencies::new())?;
/// assert_eq!(decoded["name"], Value::from("web"));
/// # Ok::<(), stratus_rpc::DecodeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Decoder {
    registry: Arc<ResourceRegistry>,
    options: DecodeOptions,
}

impl Decoder {
    /// Creates a decoder with default options.
    #[must_use]
    pub fn new(registry: Arc<ResourceRegistry>) -> Self {
        Self {
            registry,
            options: DecodeOptions::default(),
        }
    }

    /// Replaces the decoder's options.
    #[must_use]
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the decoder's options.
    #[must_use]
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Returns the registry used to resolve resource references.
    #[must_use]
    pub fn registry(&self) -> &Arc<ResourceRegistry> {
        &self.registry
    }

    /// Decodes every property of `properties`.
    ///
    /// `dependencies` lists the resources each property was declared to
    /// depend on; properties without an entry have none. The result keeps
    /// the input order.
    ///
    /// # Errors
    ///
    /// Fails as a whole if any node is a malformed special value, or if a
    /// resource reference has an unrecognized type under
    /// [`UnknownTypePolicy::Strict`](stratus_resource::UnknownTypePolicy::Strict).
    pub fn decode(
        &self,
        properties: &PropertyBag,
        dependencies: &PropertyDependencies,
    ) -> Result<DecodedProperties, DecodeError> {
        tracing::debug!(properties = properties.len(), "decoding property bag");

        let pass = self.pass();
        let none = DependencySet::new();
        let mut decoded = IndexMap::with_capacity(properties.len());

        for (name, raw) in properties {
            let declared = dependencies.get(name).unwrap_or(&none);
            let value = pass.decode_property(PropertyPath::Property(name), raw, declared)?;

            if !self.options.keep_unknowns() && is_unknown_output(&value) {
                tracing::debug!(property = %name, "dropping unknown property");
                continue;
            }
            decoded.insert(name.clone(), value);
        }

        Ok(decoded)
    }

    /// Decodes a single raw value with no declared dependencies.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode).
    pub fn decode_value(&self, raw: &serde_json::Value) -> Result<Value, DecodeError> {
        self.pass()
            .decode_property(PropertyPath::Root, raw, &DependencySet::new())
    }

    fn pass(&self) -> Pass<'_> {
        Pass {
            resolver: ResourceResolver::new(&self.registry, self.options.unknown_type_policy()),
            handles: HandleTable::new(),
        }
    }
}

fn is_unknown_output(value: &Value) -> bool {
    value.as_output().is_some_and(|output| !output.is_known())
}

/// Summary of a decoded node.
#[derive(Debug)]
struct Decoded {
    /// `None` if the node is unknown.
    value: Option<Value>,
    secret: bool,
    dependencies: DependencySet,
    /// The node itself was an output-value wrapper.
    sealed: bool,
}

impl Decoded {
    fn plain(value: Value) -> Self {
        Self {
            value: Some(value),
            secret: false,
            dependencies: DependencySet::new(),
            sealed: false,
        }
    }

    fn unknown() -> Self {
        Self {
            value: None,
            secret: false,
            dependencies: DependencySet::new(),
            sealed: false,
        }
    }

    fn is_known(&self) -> bool {
        self.value.is_some()
    }
}

/// Accumulates the children of one array or object.
#[derive(Default)]
struct Scope {
    secret: bool,
    unknown: bool,
    dependencies: DependencySet,
}

impl Scope {
    fn absorb(&mut self, child: Decoded) -> Option<Value> {
        self.secret |= child.secret;
        self.unknown |= !child.is_known();
        self.dependencies.union_with(&child.dependencies);
        child.value
    }

    fn finish(self, value: Value) -> Decoded {
        Decoded {
            value: (!self.unknown).then_some(value),
            secret: self.secret,
            dependencies: self.dependencies,
            sealed: false,
        }
    }
}

/// State for one decode call.
struct Pass<'a> {
    resolver: ResourceResolver<'a>,
    handles: HandleTable,
}

impl Pass<'_> {
    fn decode_property(
        &self,
        path: PropertyPath<'_>,
        raw: &serde_json::Value,
        declared: &DependencySet,
    ) -> Result<Value, DecodeError> {
        let Decoded {
            value,
            secret,
            dependencies,
            sealed,
        } = self.decode_node(path, raw)?;

        match value {
            Some(value) if !secret && !needs_wrap(&value, sealed, declared) => Ok(value),
            value => {
                let dependencies = dependencies.union(declared);
                tracing::debug!(
                    %path,
                    known = value.is_some(),
                    secret,
                    dependencies = dependencies.len(),
                    "wrapping property in output"
                );
                Ok(Value::Output(Output::new_in(
                    value,
                    secret,
                    dependencies,
                    &self.handles,
                )))
            }
        }
    }

    fn decode_node(
        &self,
        path: PropertyPath<'_>,
        raw: &serde_json::Value,
    ) -> Result<Decoded, DecodeError> {
        let node = classify(raw).map_err(|source| DecodeError::MalformedSpecialValue {
            path: path.to_string(),
            source,
        })?;

        match node {
            RawNode::Unknown => Ok(Decoded::unknown()),
            RawNode::Scalar(scalar) => Ok(Decoded::plain(Value::from(scalar.clone()))),
            RawNode::Sequence(items) => {
                let mut scope = Scope::default();
                let mut values = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let child = self.decode_node(path.index(index), item)?;
                    values.extend(scope.absorb(child));
                }
                Ok(collapsed(path, scope.finish(Value::Array(values))))
            }
            RawNode::Map(fields) => {
                let mut scope = Scope::default();
                let mut values = IndexMap::with_capacity(fields.len());
                for (key, item) in fields {
                    let child = self.decode_node(path.key(key), item)?;
                    if let Some(value) = scope.absorb(child) {
                        values.insert(key.clone(), value);
                    }
                }
                Ok(collapsed(path, scope.finish(Value::Object(values))))
            }
            RawNode::Secret { value } => {
                let mut inner = self.decode_node(path, value)?;
                inner.secret = true;
                inner.sealed = false;
                Ok(inner)
            }
            RawNode::ResourceRef {
                urn,
                id,
                package_version,
            } => self.decode_reference(urn, id, package_version),
            RawNode::OutputValue {
                value,
                secret,
                dependencies,
            } => {
                let inner = match value {
                    Some(value) => self.decode_node(path, value)?,
                    None => Decoded::unknown(),
                };
                let output = Output::new_in(
                    inner.value,
                    secret || inner.secret,
                    dependencies.union(&inner.dependencies),
                    &self.handles,
                );
                Ok(Decoded {
                    value: Some(Value::Output(output)),
                    secret: false,
                    dependencies: DependencySet::new(),
                    sealed: true,
                })
            }
        }
    }

    fn decode_reference(
        &self,
        urn: Urn,
        id: Option<&str>,
        package_version: Option<&str>,
    ) -> Result<Decoded, DecodeError> {
        if let Some(version) = package_version {
            tracing::debug!(%urn, version, "resource reference pins package version");
        }

        let value = match self.resolver.resolve(&urn, id)? {
            Resolution::Handle(handle) => {
                self.handles.record(&handle);
                Some(Value::Resource(handle))
            }
            Resolution::Identifier(identifier) => identifier.map(Value::String),
        };

        Ok(Decoded {
            value,
            secret: false,
            dependencies: DependencySet::single(urn),
            sealed: false,
        })
    }
}

fn collapsed(path: PropertyPath<'_>, decoded: Decoded) -> Decoded {
    if decoded.secret || !decoded.is_known() {
        tracing::debug!(
            %path,
            known = decoded.is_known(),
            secret = decoded.secret,
            "collapsed composite value"
        );
    }
    decoded
}

/// Declared dependencies force a wrap unless something already carries them:
/// a sealed output, outputs nested inside the value, or a resource handle
/// whose own URN is the only declared dependency.
fn needs_wrap(value: &Value, sealed: bool, declared: &DependencySet) -> bool {
    if declared.is_empty() || sealed || contains_outputs(value) {
        return false;
    }
    !matches!(value, Value::Resource(handle) if declared.is_exactly(handle.urn()))
}
