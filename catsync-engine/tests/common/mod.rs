#![allow(dead_code)]

use async_trait::async_trait;
use catsync_engine::{
    EngineConfig, EntityRepository, InMemoryAspectTable, InMemoryCatalog, RelevanceEngine,
    RelevanceResult, ScopeResolver, TenantConfig,
};
use catsync_model::{Entity, EntitySnapshot, Scope, ScopeSignals, StockItemSignal};
use catsync_types::{ScopeId, TargetId, TenantKey};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn tid(id: i64) -> TargetId {
    TargetId::new(id).unwrap()
}

pub fn tenant() -> TenantKey {
    TenantKey::new("acme").unwrap()
}

pub fn scope_id(id: &str) -> ScopeId {
    ScopeId::new(id).unwrap()
}

pub fn scope(id: &str) -> Scope {
    Scope::new(scope_id(id), tenant())
}

pub fn product(id: i64) -> Entity {
    Entity::product(tid(id), tenant())
}

pub fn variant(id: i64, parent: i64) -> Entity {
    Entity::product(tid(id), tenant()).with_parent(tid(parent))
}

/// Signals for an entity that is enabled and in stock under every method.
pub fn live() -> ScopeSignals {
    ScopeSignals {
        enabled: Some(true),
        stock_item: Some(StockItemSignal::in_stock()),
        stock_registry_in_stock: Some(true),
        is_available: Some(true),
        is_salable: Some(true),
    }
}

/// Signals for an entity that is disabled and out of stock under every method.
pub fn dead() -> ScopeSignals {
    ScopeSignals {
        enabled: Some(false),
        stock_item: Some(StockItemSignal::out_of_stock()),
        stock_registry_in_stock: Some(false),
        is_available: Some(false),
        is_salable: Some(false),
    }
}

pub fn snapshot(id: i64, defaults: ScopeSignals) -> EntitySnapshot {
    EntitySnapshot::new(tid(id), defaults)
}

/// Catalog with tenant "acme" publishing to scopes "en" and "fr".
pub fn catalog() -> Arc<InMemoryCatalog> {
    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.add_scope(&tenant(), scope_id("en"));
    catalog.add_scope(&tenant(), scope_id("fr"));
    catalog
}

pub fn engine(catalog: Arc<InMemoryCatalog>) -> RelevanceEngine {
    engine_with(catalog, EngineConfig::default())
}

pub fn engine_with(catalog: Arc<InMemoryCatalog>, config: EngineConfig) -> RelevanceEngine {
    RelevanceEngine::new(
        config,
        catalog.clone(),
        catalog,
        Arc::new(InMemoryAspectTable::new()),
    )
}

pub fn config_with_method(method: &str) -> EngineConfig {
    EngineConfig {
        tenant: TenantConfig::with_method(method),
        ..Default::default()
    }
}

/// Delegates to an inner catalog and counts calls.
pub struct CountingCatalog {
    pub inner: Arc<InMemoryCatalog>,
    pub scope_calls: AtomicUsize,
    pub entity_calls: AtomicUsize,
}

impl CountingCatalog {
    pub fn new(inner: Arc<InMemoryCatalog>) -> Self {
        Self {
            inner,
            scope_calls: AtomicUsize::new(0),
            entity_calls: AtomicUsize::new(0),
        }
    }

    pub fn scope_calls(&self) -> usize {
        self.scope_calls.load(Ordering::SeqCst)
    }

    pub fn entity_calls(&self) -> usize {
        self.entity_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScopeResolver for CountingCatalog {
    async fn scopes_for_tenant(&self, tenant_key: &TenantKey) -> RelevanceResult<Vec<Scope>> {
        self.scope_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.scopes_for_tenant(tenant_key).await
    }
}

#[async_trait]
impl EntityRepository for CountingCatalog {
    async fn get_by_id(&self, target_id: TargetId) -> RelevanceResult<EntitySnapshot> {
        self.entity_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_by_id(target_id).await
    }
}

/// Repository whose lookups never finish in reasonable time.
pub struct HungRepository;

#[async_trait]
impl EntityRepository for HungRepository {
    async fn get_by_id(&self, target_id: TargetId) -> RelevanceResult<EntitySnapshot> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(EntitySnapshot::new(target_id, live()))
    }
}

/// Scope resolver whose lookups never finish in reasonable time.
pub struct HungScopeResolver;

#[async_trait]
impl ScopeResolver for HungScopeResolver {
    async fn scopes_for_tenant(&self, tenant_key: &TenantKey) -> RelevanceResult<Vec<Scope>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(vec![Scope::new(scope_id("en"), tenant_key.clone())])
    }
}

/// Installs a test log subscriber honoring `RUST_LOG`. Safe to call twice.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
