//! Change-relevance engine for catalog-to-search synchronization.
//!
//! When a catalog entity changes, the engine decides whether the change
//! matters to the search index and at what granularity.
//!
//! ## Components
//!
//! - **Strategy registry**: resolves the active stock-status calculation
//!   method and runs it as a pure function over a snapshot
//! - **Providers**: compute enabled / in-stock state for an entity in one
//!   scope; a disabled or out-of-stock parent dominates its variants
//! - **Criteria**: compare recorded ledger values with freshly computed
//!   state across every scope of a tenant
//! - **Reconciler**: surfaces disagreement across related entities as a
//!   typed error carrying the full grouping
//! - **Aspect mapper**: turns changed attribute ids into aspects
//!
//! The host supplies scopes, entity snapshots and aspect assignments via the
//! traits in [`collaborators`].
//!
//! # Example
//!
//! ```
//! use catsync_engine::{EngineConfig, InMemoryAspectTable, InMemoryCatalog, RelevanceEngine};
//! use catsync_types::{Aspect, AspectSet};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(InMemoryCatalog::new());
//! let table = Arc::new(InMemoryAspectTable::new().with("price", Aspect::Price));
//! let engine = RelevanceEngine::new(EngineConfig::default(), catalog.clone(), catalog, table);
//!
//! let aspects = engine.map_changed_attributes_to_aspects(&["price"]);
//! assert_eq!(aspects, AspectSet::from(vec![Aspect::Price]));
//! ```

mod aspect;
pub mod cache;
pub mod collaborators;
mod config;
pub mod criteria;
mod deadline;
mod engine;
mod error;
pub mod memory;
pub mod provider;
pub mod reconciler;
pub mod scope;
pub mod strategy;

pub use aspect::AspectMapper;
pub use cache::ScopeCache;
pub use collaborators::{AspectAssignmentTable, EntityRepository, ScopeResolver};
pub use config::{DEFAULT_SCOPE_CONCURRENCY, EngineConfig, TenantConfig};
pub use criteria::{CriteriaEvaluator, CriteriaRegistry, ScopeStateCriterion};
pub use deadline::LookupDeadline;
pub use engine::RelevanceEngine;
pub use error::{RelevanceError, RelevanceResult};
pub use memory::{InMemoryAspectTable, InMemoryCatalog};
pub use provider::{ProviderKind, SnapshotStateProvider, StateComputationProvider};
pub use reconciler::{ConflictEntry, ConflictGroup, ConflictReconciler, GroupKey, Reconciliation};
pub use scope::TenantScopes;
pub use strategy::CalculationStrategyRegistry;
