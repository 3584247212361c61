use crate::collaborators::AspectAssignmentTable;
use catsync_types::AspectSet;
use std::sync::Arc;
use tracing::debug;

/// Maps changed attribute identifiers to the aspects they belong to.
///
/// Unmapped attributes contribute nothing. Any attribute assigned `All`
/// collapses the result to `{All}`.
#[derive(Clone)]
pub struct AspectMapper {
    table: Arc<dyn AspectAssignmentTable>,
}

impl AspectMapper {
    pub fn new(table: Arc<dyn AspectAssignmentTable>) -> Self {
        Self { table }
    }

    pub fn map<S: AsRef<str>>(&self, changed_attribute_ids: &[S]) -> AspectSet {
        let mut aspects = AspectSet::new();
        for attribute_id in changed_attribute_ids {
            let attribute_id = attribute_id.as_ref();
            match self.table.get(attribute_id) {
                Some(aspect) => aspects.insert(aspect),
                None => debug!("Attribute {} has no aspect assignment", attribute_id),
            }
            if aspects.is_full() {
                break;
            }
        }
        aspects
    }
}
