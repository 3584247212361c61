//! Caller-owned cache keyed by tenant and scope.
//!
//! The engine itself holds no cache. Hosts that memoize per-scope values
//! (resolved settings, computed states) own one of these and invalidate it
//! on every relevant write.

use catsync_types::{ScopeId, TenantKey};
use std::collections::HashMap;
use std::sync::RwLock;

/// A `(tenant, scope)`-keyed cache with explicit invalidation.
#[derive(Debug)]
pub struct ScopeCache<V> {
    entries: RwLock<HashMap<(TenantKey, ScopeId), V>>,
}

impl<V> Default for ScopeCache<V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<V: Clone> ScopeCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tenant_key: &TenantKey, scope_id: &ScopeId) -> Option<V> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .get(&(tenant_key.clone(), scope_id.clone()))
            .cloned()
    }

    pub fn insert(&self, tenant_key: TenantKey, scope_id: ScopeId, value: V) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert((tenant_key, scope_id), value);
    }

    /// Returns the cached value, computing and storing it on a miss.
    /// A failed computation stores nothing.
    pub fn get_or_insert_with<E>(
        &self,
        tenant_key: &TenantKey,
        scope_id: &ScopeId,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(tenant_key, scope_id) {
            return Ok(value);
        }
        let value = compute()?;
        self.insert(tenant_key.clone(), scope_id.clone(), value.clone());
        Ok(value)
    }

    pub fn invalidate_scope(&self, tenant_key: &TenantKey, scope_id: &ScopeId) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(&(tenant_key.clone(), scope_id.clone()));
    }

    /// Drops every scope of a tenant.
    pub fn invalidate_tenant(&self, tenant_key: &TenantKey) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.retain(|(tenant, _), _| tenant != tenant_key);
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
