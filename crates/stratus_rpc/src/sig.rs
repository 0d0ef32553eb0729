//! Reserved wire constants.
//!
//! These values are part of the engine's wire contract and must match it
//! exactly.

/// Key whose presence in an object marks it as a special value.
pub const SIG_KEY: &str = "4dabf18193072939515e22adb298388d";

/// Signature of a secret wrapper: `{SIG_KEY: SECRET_SIG, "value": ...}`.
pub const SECRET_SIG: &str = "1b47061264138c4ac30d75fd1eb44270";

/// Signature of a resource reference: `{SIG_KEY: RESOURCE_SIG, "urn": ..., "id"?: ...}`.
pub const RESOURCE_SIG: &str = "5cf8f73096256a8f31e491e813e4eb8e";

/// Signature of an output value:
/// `{SIG_KEY: OUTPUT_VALUE_SIG, "value"?: ..., "secret"?: bool, "dependencies"?: [urn]}`.
pub const OUTPUT_VALUE_SIG: &str = "d0e6a833031e9bbcd3f4e8bde6ca49ad";

/// Sentinel string standing in for a value that is not yet known.
pub const UNKNOWN_VALUE: &str = "04da6b54-80e4-46f7-96ec-b56ff0331ba9";
