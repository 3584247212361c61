//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of scopes computed concurrently per evaluation.
pub const DEFAULT_SCOPE_CONCURRENCY: usize = 4;

/// Tenant/installation settings as the host stores them.
///
/// Values here may be user-edited and stale; they are normalized by the
/// strategy registry, never trusted verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantConfig {
    /// Raw stock-status calculation method identifier.
    pub calculation_method: Option<String>,
}

impl TenantConfig {
    pub fn with_method(method: impl Into<String>) -> Self {
        Self {
            calculation_method: Some(method.into()),
        }
    }
}

/// Configuration for the relevance engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tenant: TenantConfig,
    /// Maximum scopes computed at once. Zero is treated as one.
    pub scope_concurrency: usize,
    /// Deadline applied to each collaborator call (ms). `None` disables it.
    pub lookup_timeout_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tenant: TenantConfig::default(),
            scope_concurrency: DEFAULT_SCOPE_CONCURRENCY,
            lookup_timeout_ms: None,
        }
    }
}

impl EngineConfig {
    /// Loads a config from a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective concurrency limit, never zero.
    pub fn effective_concurrency(&self) -> usize {
        self.scope_concurrency.max(1)
    }

    pub fn lookup_timeout(&self) -> Option<Duration> {
        self.lookup_timeout_ms.map(Duration::from_millis)
    }
}
