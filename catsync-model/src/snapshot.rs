//! Entity state snapshots returned by the host repository.
//!
//! A snapshot carries default-scope signals plus sparse per-scope overrides.
//! Resolution falls back field by field: a scope that only overrides
//! `enabled` still inherits the default stock signals.

use catsync_types::{ScopeId, TargetId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The raw stock-item record for an entity in one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItemSignal {
    pub is_in_stock: bool,
    /// When stock is not managed the item is always considered in stock.
    #[serde(default = "default_manage_stock")]
    pub manage_stock: bool,
}

fn default_manage_stock() -> bool {
    true
}

impl StockItemSignal {
    pub fn in_stock() -> Self {
        Self {
            is_in_stock: true,
            manage_stock: true,
        }
    }

    pub fn out_of_stock() -> Self {
        Self {
            is_in_stock: false,
            manage_stock: true,
        }
    }

    pub fn unmanaged() -> Self {
        Self {
            is_in_stock: false,
            manage_stock: false,
        }
    }
}

/// The signals a strategy may read for one entity in one scope.
/// Every field is optional; absence means the host has no value for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSignals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_item: Option<StockItemSignal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_registry_in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_salable: Option<bool>,
}

impl ScopeSignals {
    /// Overlays `self` on `fallback`: each field present here wins.
    #[must_use]
    pub fn or(&self, fallback: &ScopeSignals) -> ScopeSignals {
        ScopeSignals {
            enabled: self.enabled.or(fallback.enabled),
            stock_item: self.stock_item.or(fallback.stock_item),
            stock_registry_in_stock: self
                .stock_registry_in_stock
                .or(fallback.stock_registry_in_stock),
            is_available: self.is_available.or(fallback.is_available),
            is_salable: self.is_salable.or(fallback.is_salable),
        }
    }
}

/// Everything the repository knows about one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub target_id: TargetId,
    #[serde(default)]
    pub defaults: ScopeSignals,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scopes: BTreeMap<ScopeId, ScopeSignals>,
}

impl EntitySnapshot {
    pub fn new(target_id: TargetId, defaults: ScopeSignals) -> Self {
        Self {
            target_id,
            defaults,
            scopes: BTreeMap::new(),
        }
    }

    /// Adds a per-scope override, builder style.
    #[must_use]
    pub fn with_scope(mut self, scope_id: ScopeId, signals: ScopeSignals) -> Self {
        self.scopes.insert(scope_id, signals);
        self
    }

    /// Resolves the effective signals for a scope.
    pub fn signals_for(&self, scope_id: &ScopeId) -> ScopeSignals {
        match self.scopes.get(scope_id) {
            Some(overrides) => overrides.or(&self.defaults),
            None => self.defaults.clone(),
        }
    }
}
