//! Hooks that mirror container changes into an [`ItemStore`]

use stash_core::OwnerId;
use std::sync::Arc;

use crate::hooks::ContainerHooks;
use crate::item::ItemInstance;
use crate::store::{ItemLocation, ItemRecord, ItemStore, StoreResult};

/// Keeps one owner's rows in step with a container
///
/// Store failures are logged and swallowed; the in-memory container is the
/// source of truth.
pub struct PersistingHooks {
    owner: OwnerId,
    location: ItemLocation,
    store: Arc<dyn ItemStore>,
}

impl PersistingHooks {
    pub fn new(owner: OwnerId, location: ItemLocation, store: Arc<dyn ItemStore>) -> Self {
        Self {
            owner,
            location,
            store,
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn location(&self) -> ItemLocation {
        self.location
    }

    fn record(&self, item: &ItemInstance) -> ItemRecord {
        ItemRecord::from_instance(self.owner, self.location, item)
    }

    fn report<T>(&self, action: &str, item: &ItemInstance, result: StoreResult<T>) {
        if let Err(e) = result {
            log::warn!(
                "Failed to {} item {} of owner {} ({:?}): {}",
                action,
                item.object_id(),
                self.owner,
                self.location,
                e
            );
        }
    }
}

impl ContainerHooks for PersistingHooks {
    fn on_add(&self, item: &ItemInstance) {
        self.report("insert", item, self.store.insert(&self.record(item)));
    }

    fn on_modify(&self, item: &ItemInstance) {
        self.report("update", item, self.store.update(&self.record(item)));
    }

    fn on_remove(&self, item: &ItemInstance) {
        self.report("delete", item, self.store.delete(self.owner, item.object_id()));
    }

    fn on_destroy(&self, item: &ItemInstance) {
        // Usually already gone after on_remove
        self.report("delete", item, self.store.delete(self.owner, item.object_id()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ItemContainer;
    use crate::item::{ItemTemplate, TemplateItemFactory};
    use crate::registry::TemplateRegistry;
    use crate::store::{MemoryItemStore, StoreError};
    use stash_core::{AtomicIdAllocator, IdAllocator, ObjectId, TemplateId};

    const OWNER: OwnerId = OwnerId::new(7);
    const ADENA: TemplateId = TemplateId::new(57);

    struct FailingStore;

    impl ItemStore for FailingStore {
        fn insert(&self, _record: &ItemRecord) -> StoreResult<()> {
            Err(StoreError::Backend("connection refused".into()))
        }
        fn update(&self, _record: &ItemRecord) -> StoreResult<()> {
            Err(StoreError::Backend("connection refused".into()))
        }
        fn delete(&self, _owner: OwnerId, _object_id: ObjectId) -> StoreResult<bool> {
            Err(StoreError::Backend("connection refused".into()))
        }
    }

    fn container(store: Arc<dyn ItemStore>) -> ItemContainer<PersistingHooks> {
        let mut registry = TemplateRegistry::new();
        registry
            .register(ItemTemplate::new(ADENA, "Adena").with_stackable(true))
            .unwrap();
        let ids: Arc<dyn IdAllocator> = Arc::new(AtomicIdAllocator::starting_at(1));
        let factory = Arc::new(TemplateItemFactory::new(Arc::new(registry), Arc::clone(&ids)));
        ItemContainer::new(
            PersistingHooks::new(OWNER, ItemLocation::Warehouse, store),
            factory,
            ids,
        )
    }

    #[test]
    fn test_rows_follow_container() {
        let store = Arc::new(MemoryItemStore::new());
        let c = container(store.clone());

        let stack = c.add_by_template(ADENA, 10).unwrap();
        let row = store.get(OWNER, stack.object_id()).unwrap();
        assert_eq!(row.count, 10);
        assert_eq!(row.location, ItemLocation::Warehouse);

        c.add_by_template(ADENA, 5).unwrap();
        assert_eq!(store.get(OWNER, stack.object_id()).unwrap().count, 15);

        // The split-off part is not persisted until it is placed
        let part = c.remove_by_object_id(stack.object_id(), 6).unwrap();
        assert!(store.get(OWNER, part.object_id()).is_none());
        assert_eq!(store.get(OWNER, stack.object_id()).unwrap().count, 9);

        assert!(c.destroy_by_object_id(stack.object_id(), 9));
        assert!(store.is_empty());
    }

    #[test]
    fn test_merged_instance_leaves_no_row() {
        let store = Arc::new(MemoryItemStore::new());
        let c = container(store.clone());

        let stack = c.add_by_template(ADENA, 10).unwrap();
        c.add_instance(ItemInstance::new(ObjectId::new(500), ADENA, true).with_count(3))
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(OWNER, stack.object_id()).unwrap().count, 13);
    }

    #[test]
    fn test_store_failure_does_not_block_mutation() {
        let c = container(Arc::new(FailingStore));

        let stack = c.add_by_template(ADENA, 10).unwrap();
        c.add_by_template(ADENA, 10).unwrap();
        assert_eq!(stack.count(), 20);

        assert!(c.destroy_by_template_id(ADENA, 20));
        assert!(c.is_empty());
    }
}
