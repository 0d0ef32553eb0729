//! Deferred output values for Stratus.
//!
//! An [`Output`] is the value container produced when decoding engine
//! properties that are unknown, secret or derived from other resources. It
//! carries its knowledge, secrecy and dependency metadata synchronously and
//! its payload asynchronously.
//!
//! - [`Output`] - the deferred value and its combinators
//! - [`Settled`] - a resolved payload with its final metadata
//! - [`OutputError`] - failure propagated from the producing computation

pub mod error;
mod output;

pub use error::OutputError;
pub use output::{Output, Settled};
