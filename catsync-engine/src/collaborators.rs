//! Contracts the host platform must supply.
//!
//! The engine consumes these; it never implements catalog storage, scope
//! configuration or attribute metadata itself. See [`crate::memory`] for
//! in-memory implementations.

use crate::error::RelevanceResult;
use async_trait::async_trait;
use catsync_model::{EntitySnapshot, Scope};
use catsync_types::{Aspect, TargetId, TenantKey};

/// Resolves the scopes that must be evaluated for a tenant.
#[async_trait]
pub trait ScopeResolver: Send + Sync {
    /// Returns the tenant's scopes in a deterministic order.
    async fn scopes_for_tenant(&self, tenant_key: &TenantKey) -> RelevanceResult<Vec<Scope>>;
}

/// Loads entity state snapshots.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// Returns the snapshot for an entity.
    /// Fails with `RelevanceError::NoSuchEntity` if it does not exist.
    async fn get_by_id(&self, target_id: TargetId) -> RelevanceResult<EntitySnapshot>;
}

/// Attribute identifier → aspect assignments from attribute metadata.
pub trait AspectAssignmentTable: Send + Sync {
    /// Returns the configured aspect, or `None` if the attribute is unmapped.
    fn get(&self, attribute_id: &str) -> Option<Aspect>;
}
