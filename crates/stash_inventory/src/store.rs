//! Persistence gateway for container rows

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use stash_core::{ObjectId, OwnerId, Quantity, TemplateId};
use std::collections::HashMap;
use thiserror::Error;

use crate::item::ItemInstance;

/// Which kind of container a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemLocation {
    /// Carried by a character
    Inventory,
    /// Stored in a warehouse
    Warehouse,
    /// Carried by a pet
    PetInventory,
}

/// One persisted item row, keyed by (owner, object id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub owner: OwnerId,
    pub object_id: ObjectId,
    pub template_id: TemplateId,
    pub count: Quantity,
    pub location: ItemLocation,
}

impl ItemRecord {
    /// Capture the current state of an instance
    pub fn from_instance(owner: OwnerId, location: ItemLocation, item: &ItemInstance) -> Self {
        Self {
            owner,
            object_id: item.object_id(),
            template_id: item.template_id(),
            count: item.count(),
            location,
        }
    }
}

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insert of a key that already has a row
    #[error("Row already exists: owner {owner}, item {object_id}")]
    Duplicate { owner: OwnerId, object_id: ObjectId },
    /// Update of a key with no row
    #[error("Row not found: owner {owner}, item {object_id}")]
    NotFound { owner: OwnerId, object_id: ObjectId },
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Backend failure
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Row-level persistence used by container hooks
pub trait ItemStore: Send + Sync {
    /// Insert a new row
    fn insert(&self, record: &ItemRecord) -> StoreResult<()>;

    /// Overwrite an existing row
    fn update(&self, record: &ItemRecord) -> StoreResult<()>;

    /// Delete a row; `Ok(false)` when there was none
    fn delete(&self, owner: OwnerId, object_id: ObjectId) -> StoreResult<bool>;
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    rows: Mutex<HashMap<(OwnerId, ObjectId), ItemRecord>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, owner: OwnerId, object_id: ObjectId) -> Option<ItemRecord> {
        self.rows.lock().get(&(owner, object_id)).cloned()
    }

    /// All rows of `owner`, ordered by object id
    pub fn rows_for(&self, owner: OwnerId) -> Vec<ItemRecord> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .values()
            .filter(|row| row.owner == owner)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.object_id);
        rows
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }

    /// Dump every row as JSON, ordered by owner then object id
    pub fn to_json(&self) -> StoreResult<String> {
        let mut rows: Vec<_> = self.rows.lock().values().cloned().collect();
        rows.sort_by_key(|row| (row.owner, row.object_id));
        Ok(serde_json::to_string_pretty(&rows)?)
    }
}

impl ItemStore for MemoryItemStore {
    fn insert(&self, record: &ItemRecord) -> StoreResult<()> {
        let mut rows = self.rows.lock();
        let key = (record.owner, record.object_id);
        if rows.contains_key(&key) {
            return Err(StoreError::Duplicate {
                owner: record.owner,
                object_id: record.object_id,
            });
        }
        rows.insert(key, record.clone());
        Ok(())
    }

    fn update(&self, record: &ItemRecord) -> StoreResult<()> {
        let mut rows = self.rows.lock();
        match rows.get_mut(&(record.owner, record.object_id)) {
            Some(row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                owner: record.owner,
                object_id: record.object_id,
            }),
        }
    }

    fn delete(&self, owner: OwnerId, object_id: ObjectId) -> StoreResult<bool> {
        Ok(self.rows.lock().remove(&(owner, object_id)).is_some())
    }
}
