//! Protocol value classification.
//!
//! [`classify`] looks at one raw node and tags it as exactly one
//! [`RawNode`] variant. This is the only place that inspects sigils; the
//! decoder matches on the result and never re-reads raw shapes.

use crate::error::MalformedSpecialValue;
use crate::sig::{OUTPUT_VALUE_SIG, RESOURCE_SIG, SECRET_SIG, SIG_KEY, UNKNOWN_VALUE};
use serde_json::{Map, Value};
use stratus_resource::{DependencySet, Urn};

static NULL: Value = Value::Null;

/// A raw node tagged by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode<'a> {
    /// The unknown sentinel.
    Unknown,
    /// Null, bool, number or string.
    Scalar(&'a Value),
    /// An array without special meaning.
    Sequence(&'a [Value]),
    /// An object without a signature key.
    Map(&'a Map<String, Value>),
    /// A secret wrapper around `value`.
    Secret {
        /// The wrapped value; `null` if the wrapper has none.
        value: &'a Value,
    },
    /// A reference to another resource.
    ResourceRef {
        /// URN of the referenced resource.
        urn: Urn,
        /// Provider-assigned id; empty when not yet known.
        id: Option<&'a str>,
        /// Version of the package that owns the type.
        package_version: Option<&'a str>,
    },
    /// An output value with explicit metadata.
    OutputValue {
        /// The payload; absent when the value is unknown.
        value: Option<&'a Value>,
        /// Whether the payload is secret.
        secret: bool,
        /// Resources the payload depends on.
        dependencies: DependencySet,
    },
}

/// Classifies a raw node.
///
/// # Errors
///
/// Returns [`MalformedSpecialValue`] if the node carries the signature key
/// with an unrecognized signature, or a recognized signature with fields of
/// the wrong type.
pub fn classify(node: &Value) -> Result<RawNode<'_>, MalformedSpecialValue> {
    match node {
        Value::String(s) if s == UNKNOWN_VALUE => Ok(RawNode::Unknown),
        Value::Array(items) => Ok(RawNode::Sequence(items)),
        Value::Object(object) => match object.get(SIG_KEY) {
            Some(sig) => classify_special(sig, object),
            None => Ok(RawNode::Map(object)),
        },
        _ => Ok(RawNode::Scalar(node)),
    }
}

fn classify_special<'a>(
    sig: &'a Value,
    object: &'a Map<String, Value>,
) -> Result<RawNode<'a>, MalformedSpecialValue> {
    let Value::String(sig) = sig else {
        return Err(MalformedSpecialValue::new(format!(
            "signature must be a string, found {}",
            kind_of(sig)
        )));
    };

    match sig.as_str() {
        SECRET_SIG => Ok(RawNode::Secret {
            value: object.get("value").unwrap_or(&NULL),
        }),
        RESOURCE_SIG => {
            let urn = match object.get("urn") {
                Some(Value::String(urn)) => Urn::new(urn),
                Some(other) => {
                    return Err(MalformedSpecialValue::new(format!(
                        "resource reference urn must be a string, found {}",
                        kind_of(other)
                    )));
                }
                None => {
                    return Err(MalformedSpecialValue::new(
                        "resource reference is missing its urn",
                    ));
                }
            };
            Ok(RawNode::ResourceRef {
                urn,
                id: optional_str(object, "id")?,
                package_version: optional_str(object, "packageVersion")?,
            })
        }
        OUTPUT_VALUE_SIG => {
            let secret = match object.get("secret") {
                None | Some(Value::Null) => false,
                Some(Value::Bool(secret)) => *secret,
                Some(other) => {
                    return Err(MalformedSpecialValue::new(format!(
                        "output value secret flag must be a bool, found {}",
                        kind_of(other)
                    )));
                }
            };
            Ok(RawNode::OutputValue {
                value: object.get("value"),
                secret,
                dependencies: dependencies(object)?,
            })
        }
        other => Err(MalformedSpecialValue::new(format!(
            "unrecognized signature '{other}'"
        ))),
    }
}

fn optional_str<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<Option<&'a str>, MalformedSpecialValue> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(MalformedSpecialValue::new(format!(
            "field '{field}' must be a string, found {}",
            kind_of(other)
        ))),
    }
}

fn dependencies(object: &Map<String, Value>) -> Result<DependencySet, MalformedSpecialValue> {
    match object.get("dependencies") {
        None | Some(Value::Null) => Ok(DependencySet::new()),
        Some(Value::Array(urns)) => urns
            .iter()
            .map(|urn| match urn {
                Value::String(urn) => Ok(Urn::new(urn)),
                other => Err(MalformedSpecialValue::new(format!(
                    "output value dependencies must be strings, found {}",
                    kind_of(other)
                ))),
            })
            .collect(),
        Some(other) => Err(MalformedSpecialValue::new(format!(
            "output value dependencies must be an array, found {}",
            kind_of(other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
