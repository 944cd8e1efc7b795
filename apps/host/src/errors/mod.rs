//! Error handling for the Associations host.

pub mod domain;

pub use domain::{DomainError, ValidationKind};
