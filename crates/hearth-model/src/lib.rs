#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # hearth-model
//!
//! Plain data types for tracking home properties, the maintainable items
//! inside them, and the maintenance performed on those items.
//!
//! These types are the *validated* shapes. Untrusted input arrives as JSON and
//! is narrowed into them by `hearth-validation`.

/// Maintenance log entries recorded against a maintainable item.
pub mod log;
/// Maintainable items (appliances, systems, structures) and their enums.
pub mod maintainable;
/// Home properties.
pub mod property;
/// Naming JSON value kinds for human-readable messages.
pub mod value;

pub use log::MaintenanceLog;
pub use maintainable::{Condition, MaintainableData, MaintainableType};
pub use property::{HomeType, Property};
pub use value::ValueKind;

use thiserror::Error;

/// Errors that can occur when working with model types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown {kind} '{value}', expected one of: {expected}")]
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: String,
    },
}

impl Error {
    /// Build an unknown-variant error listing the accepted spellings.
    pub fn unknown_variant(kind: &'static str, value: impl Into<String>, expected: &[&str]) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
            expected: expected.join(", "),
        }
    }
}

/// Crate-local result type for model operations.
pub type Result<T> = std::result::Result<T, Error>;
