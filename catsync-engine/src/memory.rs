//! In-memory collaborators, for tests and fixture-driven hosts.

use crate::collaborators::{AspectAssignmentTable, EntityRepository, ScopeResolver};
use crate::error::{RelevanceError, RelevanceResult};
use async_trait::async_trait;
use catsync_model::{EntitySnapshot, Scope};
use catsync_types::{Aspect, ScopeId, TargetId, TenantKey};
use std::collections::HashMap;
use std::sync::RwLock;

/// Scopes per tenant plus entity snapshots, held in memory.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    scopes: RwLock<HashMap<TenantKey, Vec<Scope>>>,
    snapshots: RwLock<HashMap<TargetId, EntitySnapshot>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scope to a tenant's scope list.
    pub fn add_scope(&self, tenant_key: &TenantKey, scope_id: ScopeId) {
        let mut scopes = self.scopes.write().unwrap_or_else(|e| e.into_inner());
        scopes
            .entry(tenant_key.clone())
            .or_default()
            .push(Scope::new(scope_id, tenant_key.clone()));
    }

    /// Stores or replaces an entity snapshot.
    pub fn upsert(&self, snapshot: EntitySnapshot) {
        let mut snapshots = self.snapshots.write().unwrap_or_else(|e| e.into_inner());
        snapshots.insert(snapshot.target_id, snapshot);
    }

    /// Removes an entity. Returns the removed snapshot, if any.
    pub fn remove(&self, target_id: TargetId) -> Option<EntitySnapshot> {
        let mut snapshots = self.snapshots.write().unwrap_or_else(|e| e.into_inner());
        snapshots.remove(&target_id)
    }

    /// Applies an in-place edit to a stored snapshot.
    pub fn update(
        &self,
        target_id: TargetId,
        edit: impl FnOnce(&mut EntitySnapshot),
    ) -> RelevanceResult<()> {
        let mut snapshots = self.snapshots.write().unwrap_or_else(|e| e.into_inner());
        let snapshot = snapshots
            .get_mut(&target_id)
            .ok_or(RelevanceError::NoSuchEntity { target_id })?;
        edit(snapshot);
        Ok(())
    }
}

#[async_trait]
impl ScopeResolver for InMemoryCatalog {
    async fn scopes_for_tenant(&self, tenant_key: &TenantKey) -> RelevanceResult<Vec<Scope>> {
        let scopes = self.scopes.read().unwrap_or_else(|e| e.into_inner());
        Ok(scopes.get(tenant_key).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl EntityRepository for InMemoryCatalog {
    async fn get_by_id(&self, target_id: TargetId) -> RelevanceResult<EntitySnapshot> {
        let snapshots = self.snapshots.read().unwrap_or_else(|e| e.into_inner());
        snapshots
            .get(&target_id)
            .cloned()
            .ok_or(RelevanceError::NoSuchEntity { target_id })
    }
}

/// Attribute → aspect assignments held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAspectTable {
    assignments: HashMap<String, Aspect>,
}

impl InMemoryAspectTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, attribute_id: impl Into<String>, aspect: Aspect) -> Self {
        self.assign(attribute_id, aspect);
        self
    }

    pub fn assign(&mut self, attribute_id: impl Into<String>, aspect: Aspect) {
        self.assignments.insert(attribute_id.into(), aspect);
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl AspectAssignmentTable for InMemoryAspectTable {
    fn get(&self, attribute_id: &str) -> Option<Aspect> {
        self.assignments.get(attribute_id).copied()
    }
}

impl AspectAssignmentTable for HashMap<String, Aspect> {
    fn get(&self, attribute_id: &str) -> Option<Aspect> {
        HashMap::get(self, attribute_id).copied()
    }
}
