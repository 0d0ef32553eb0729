//! Shared helpers for decoder integration tests.

#![allow(
    dead_code,
    reason = "each test binary uses a different subset of the helpers"
)]

use std::collections::BTreeSet;
use std::sync::{Arc, Once};

use serde_json::{Value as Json, json};
use stratus_core::telemetry::{Level, TracingConfig, TracingFormat};
use stratus_resource::{DependencySet, Resource, ResourceModule, ResourceRegistry, Urn};
use stratus_rpc::sig::{OUTPUT_VALUE_SIG, RESOURCE_SIG, SECRET_SIG, SIG_KEY, UNKNOWN_VALUE};
use stratus_rpc::{DecodeError, DecodeOptions, Decoder, PropertyDependencies, Value};

pub const TEST_URN: &str = "urn:pulumi:stack::project::test:index:TestResource::name";
pub const TEST_ID: &str = "name_id";

static TRACING: Once = Once::new();

/// Installs a compact subscriber once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        TracingConfig::new()
            .with_level(Level::DEBUG)
            .with_format(TracingFormat::Compact)
            .with_default_env(true)
            .init();
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Resources
// ─────────────────────────────────────────────────────────────────────────────

/// Resource rebuilt by [`TestModule`].
#[derive(Debug)]
pub struct TestResource {
    pub urn: Urn,
    pub name: String,
}

impl Resource for TestResource {
    fn urn(&self) -> &Urn {
        &self.urn
    }
}

/// Constructs `test:index:TestResource` and declines everything else.
pub struct TestModule;

impl ResourceModule for TestModule {
    fn construct(&self, name: &str, type_token: &str, urn: &Urn) -> Option<Arc<dyn Resource>> {
        match type_token {
            "test:index:TestResource" => Some(Arc::new(TestResource {
                urn: urn.clone(),
                name: name.to_string(),
            })),
            _ => None,
        }
    }
}

/// A registry with [`TestModule`] registered for `test:index`.
pub fn registry() -> Arc<ResourceRegistry> {
    let registry = ResourceRegistry::new();
    registry.register_module("test", "index", TestModule);
    Arc::new(registry)
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire values
// ─────────────────────────────────────────────────────────────────────────────

pub fn unknown() -> Json {
    json!(UNKNOWN_VALUE)
}

pub fn secret(value: Json) -> Json {
    json!({ SIG_KEY: SECRET_SIG, "value": value })
}

pub fn resource_ref(urn: &str, id: Option<&str>) -> Json {
    let mut reference = json!({ SIG_KEY: RESOURCE_SIG, "urn": urn });
    if let Some(id) = id {
        reference["id"] = json!(id);
    }
    reference
}

pub fn output_value(value: Option<Json>, secret: bool, dependencies: &[&str]) -> Json {
    let mut output = json!({ SIG_KEY: OUTPUT_VALUE_SIG });
    if let Some(value) = value {
        output["value"] = value;
    }
    if secret {
        output["secret"] = json!(true);
    }
    if !dependencies.is_empty() {
        output["dependencies"] = json!(dependencies);
    }
    output
}

pub fn deps(urns: &[&str]) -> DependencySet {
    urns.iter().copied().collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoding
// ─────────────────────────────────────────────────────────────────────────────

/// Decodes `{"value": input}` with `dependencies` declared for `value`.
pub fn decode_property(input: Json, dependencies: &[&str]) -> Value {
    try_decode_property(input, dependencies, DecodeOptions::default())
        .expect("property should decode")
}

pub fn try_decode_property(
    input: Json,
    dependencies: &[&str],
    options: DecodeOptions,
) -> Result<Value, DecodeError> {
    init_tracing();

    let decoder = Decoder::new(registry()).with_options(options);
    let properties = json!({ "value": input });
    let declared = PropertyDependencies::from([("value".to_string(), deps(dependencies))]);

    let mut decoded = decoder.decode(
        properties.as_object().expect("properties are an object"),
        &declared,
    )?;
    Ok(decoded
        .shift_remove("value")
        .expect("decoded properties contain 'value'"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Assertions
// ─────────────────────────────────────────────────────────────────────────────

/// Asserts that `actual` is an output with the given state.
///
/// The dependency check goes through `dependent_resources`, so it sees
/// every resource the output reports, not only the declared URNs.
pub async fn assert_output(
    actual: &Value,
    expected: Option<Value>,
    known: bool,
    secret: bool,
    dependencies: &[&str],
) {
    let output = actual
        .as_output()
        .unwrap_or_else(|| panic!("expected an output, got {actual:?}"));

    assert_eq!(output.resolve().await.expect("output resolves"), expected);
    assert_eq!(output.is_known(), known, "known");
    assert_eq!(output.is_secret(), secret, "secret");

    let actual_urns: BTreeSet<String> = output
        .dependent_resources()
        .await
        .expect("dependencies resolve")
        .iter()
        .map(|handle| handle.urn().to_string())
        .collect();
    let expected_urns: BTreeSet<String> = dependencies.iter().map(ToString::to_string).collect();
    assert_eq!(actual_urns, expected_urns, "dependencies");
}

/// Asserts that `actual` is a typed handle to the test resource.
pub fn assert_test_resource(actual: &Value) {
    let handle = actual
        .as_resource()
        .unwrap_or_else(|| panic!("expected a resource, got {actual:?}"));
    let resource = handle
        .downcast_ref::<TestResource>()
        .expect("handle is a TestResource");

    assert_eq!(resource.urn.as_str(), TEST_URN);
    assert_eq!(resource.name, "name");
    assert_eq!(handle.urn().as_str(), TEST_URN);
    assert_eq!(handle.id(), Some(TEST_ID));
}
