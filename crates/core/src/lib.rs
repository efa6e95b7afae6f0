//! `ems-core` — shared value objects for the EMS portal.
//!
//! This crate contains **pure** primitives (no UI, no IO).

pub mod error;
pub mod location;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use location::Location;
pub use value_object::ValueObject;
