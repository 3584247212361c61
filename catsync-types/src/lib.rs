//! Core type definitions for the catalog sync relevance engine.
//!
//! This crate defines the small, dependency-free vocabulary shared by the
//! model and engine crates:
//! - Target, scope and tenant identifiers
//! - [`Aspect`] categories of change and the de-duplicated [`AspectSet`]
//! - [`CalculationMethod`], the closed set of stock-status strategies
//! - [`RecordedValue`], a previously synchronized criterion value
//!
//! Nothing here performs I/O or knows about the host platform.

mod aspect;
mod ids;
mod method;
mod recorded;

pub use aspect::{Aspect, AspectSet};
pub use ids::{ScopeId, TargetId, TenantKey};
pub use method::CalculationMethod;
pub use recorded::RecordedValue;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid target id: {0} (must be positive)")]
    InvalidTargetId(i64),

    #[error("invalid target id: {0:?}")]
    UnparsableTargetId(String),

    #[error("unknown aspect code: {0}")]
    UnknownAspectCode(u8),

    #[error("unknown aspect name: {0:?}")]
    UnknownAspectName(String),

    #[error("empty identifier")]
    EmptyIdentifier,
}
