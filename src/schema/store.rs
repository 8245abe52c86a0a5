// src/schema/store.rs

use std::sync::{Arc, RwLock};

use tracing::info;

use super::header::HeaderSchema;

/// Owner of the single process-wide active schema.
///
/// A successful header submission is the only way the active schema changes;
/// the last successful install wins. Readers take an `Arc` snapshot, so a row
/// being validated keeps a stable axis even while a concurrent header
/// replaces the schema under the write lock.
pub struct SchemaStore {
    active: RwLock<Option<Arc<HeaderSchema>>>,
}

impl SchemaStore {
    pub fn new() -> Self {
        Self {
            active: RwLock::new(None),
        }
    }

    /// Install `schema` as the active one, replacing any prior schema.
    pub fn install(&self, schema: HeaderSchema) -> Arc<HeaderSchema> {
        let schema = Arc::new(schema);
        let mut active = self.active.write().unwrap();
        if active.is_some() {
            info!(axis_len = schema.axis_len(), "replacing active header schema");
        }
        *active = Some(Arc::clone(&schema));
        schema
    }

    /// Snapshot of the active schema, if one has been established.
    pub fn active(&self) -> Option<Arc<HeaderSchema>> {
        self.active.read().unwrap().clone()
    }
}

impl Default for SchemaStore {
    fn default() -> Self {
        Self::new()
    }
}
