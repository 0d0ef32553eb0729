//! Decoding of infrastructure engine property bags into deferred values.
//!

pub use stratus_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use stratus_internal::prelude::*;
}
