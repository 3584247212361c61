use catsync_types::{TargetId, TenantKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of catalog entity being synchronized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    #[default]
    Product,
    Category,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::Product => f.write_str("product"),
            EntityType::Category => f.write_str("category"),
        }
    }
}

/// A synchronizable unit.
///
/// `target_parent_id` is set when the entity is a variant of a composite
/// parent; the parent's negative state then dominates the variant's.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub target_id: TargetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_parent_id: Option<TargetId>,
    pub tenant_key: TenantKey,
    #[serde(default)]
    pub entity_type: EntityType,
}

impl Entity {
    /// Creates a standalone product entity.
    pub fn product(target_id: TargetId, tenant_key: TenantKey) -> Self {
        Self {
            target_id,
            target_parent_id: None,
            tenant_key,
            entity_type: EntityType::Product,
        }
    }

    /// Marks this entity as a variant of `parent_id`.
    #[must_use]
    pub fn with_parent(mut self, parent_id: TargetId) -> Self {
        self.target_parent_id = Some(parent_id);
        self
    }

    /// Sets the entity type.
    #[must_use]
    pub fn with_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = entity_type;
        self
    }

    /// Returns true when the entity is a variant of a composite parent.
    pub fn is_variant(&self) -> bool {
        self.target_parent_id.is_some()
    }

    /// Builds the parent entity reference, if this entity has one.
    /// The parent lives under the same tenant.
    pub fn parent(&self) -> Option<Entity> {
        self.target_parent_id.map(|parent_id| Entity {
            target_id: parent_id,
            target_parent_id: None,
            tenant_key: self.tenant_key.clone(),
            entity_type: self.entity_type,
        })
    }
}
