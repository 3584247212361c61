//! Scope resolution glue around the host's [`ScopeResolver`].

use crate::collaborators::ScopeResolver;
use crate::deadline::LookupDeadline;
use crate::error::RelevanceResult;
use catsync_model::Scope;
use catsync_types::{ScopeId, TenantKey};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Resolves a tenant's scopes through the host collaborator, under the
/// lookup deadline, as an ordered duplicate-free sequence.
#[derive(Clone)]
pub struct TenantScopes {
    resolver: Arc<dyn ScopeResolver>,
    deadline: LookupDeadline,
}

impl TenantScopes {
    pub fn new(resolver: Arc<dyn ScopeResolver>, deadline: LookupDeadline) -> Self {
        Self { resolver, deadline }
    }

    /// Returns the tenant's scopes. Duplicate scope ids are dropped, keeping
    /// the first occurrence, so evaluation order stays deterministic.
    pub async fn resolve(&self, tenant_key: &TenantKey) -> RelevanceResult<Vec<Scope>> {
        let scopes = self
            .deadline
            .run("scope lookup", self.resolver.scopes_for_tenant(tenant_key))
            .await?;
        let resolved = dedup_scopes(scopes);
        debug!("Resolved {} scope(s) for tenant {}", resolved.len(), tenant_key);
        Ok(resolved)
    }
}

pub(crate) fn dedup_scopes(scopes: Vec<Scope>) -> Vec<Scope> {
    let mut seen: HashSet<ScopeId> = HashSet::with_capacity(scopes.len());
    scopes
        .into_iter()
        .filter(|scope| seen.insert(scope.scope_id.clone()))
        .collect()
}
