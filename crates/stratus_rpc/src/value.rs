//! Decoded property values.

use indexmap::IndexMap;
use serde_json::Number;
use stratus_output::Output;
use stratus_resource::ResourceHandle;

/// A decoded property value.
///
/// Plain JSON shapes decode to the matching variant. Resource references
/// decode to [`Value::Resource`], and anything secret, unknown, or carrying
/// its own metadata decodes to [`Value::Output`].
#[derive(Debug, Clone)]
pub enum Value {
    /// JSON `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number, kept in its wire representation.
    Number(Number),
    /// A string.
    String(String),
    /// An ordered sequence.
    Array(Vec<Value>),
    /// An object, in wire order.
    Object(IndexMap<String, Value>),
    /// A handle to another resource.
    Resource(ResourceHandle),
    /// A deferred value.
    Output(Output<Value>),
}

impl Value {
    /// Returns the deferred value, if this is one.
    #[must_use]
    pub fn as_output(&self) -> Option<&Output<Value>> {
        match self {
            Self::Output(output) => Some(output),
            _ => None,
        }
    }

    /// Returns the resource handle, if this is one.
    #[must_use]
    pub fn as_resource(&self) -> Option<&ResourceHandle> {
        match self {
            Self::Resource(handle) => Some(handle),
            _ => None,
        }
    }

    /// Returns the elements of an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the fields of an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns the string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up a field of an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }

    /// Returns `true` for [`Value::Output`].
    #[must_use]
    pub fn is_output(&self) -> bool {
        matches!(self, Self::Output(_))
    }
}

/// Outputs compare by identity; resource handles by URN, id and kind.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Resource(a), Self::Resource(b)) => a == b,
            (Self::Output(a), Self::Output(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(fields) => Self::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<ResourceHandle> for Value {
    fn from(handle: ResourceHandle) -> Self {
        Self::Resource(handle)
    }
}

impl From<Output<Value>> for Value {
    fn from(output: Output<Value>) -> Self {
        Self::Output(output)
    }
}
