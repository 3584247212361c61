use catsync_types::{ScopeId, TenantKey};
use serde::{Deserialize, Serialize};

/// A store/view context. Belongs to exactly one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub scope_id: ScopeId,
    pub tenant_key: TenantKey,
}

impl Scope {
    pub fn new(scope_id: ScopeId, tenant_key: TenantKey) -> Self {
        Self { scope_id, tenant_key }
    }
}
