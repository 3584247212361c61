//! Catalog entity model for the sync relevance engine.
//!
//! Defines the data the engine reads on every invocation:
//! - [`Entity`]: a synchronizable unit (target id, optional parent, tenant)
//! - [`Scope`]: a store/view context owned by a tenant
//! - [`EntitySnapshot`]: the signals the host repository returns for an
//!   entity, with per-scope overrides over default-scope values
//! - [`RecordedCriteriaValues`]: what was true at the last synchronization
//!
//! None of these types are retained by the engine between invocations.

mod entity;
mod recorded;
mod scope;
mod snapshot;

pub use entity::{Entity, EntityType};
pub use recorded::RecordedCriteriaValues;
pub use scope::Scope;
pub use snapshot::{EntitySnapshot, ScopeSignals, StockItemSignal};
