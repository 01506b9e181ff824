//! Concrete containers: character inventory, pet inventory and warehouse

use parking_lot::Mutex;
use stash_core::{add_and_limit, mul_and_limit, AtomicIdAllocator, IdAllocator, ObjectId, OwnerId, Quantity};
use std::collections::HashMap;
use std::sync::Arc;

use crate::container::ItemContainer;
use crate::hooks::ContainerHooks;
use crate::item::{ItemFactory, ItemInstance, TemplateItemFactory};
use crate::persist::PersistingHooks;
use crate::registry::TemplateRegistry;
use crate::store::{ItemLocation, ItemStore};

/// Character inventory
pub type PlayerInventory = ItemContainer<InventoryHooks>;

/// Warehouse storage
pub type Warehouse = ItemContainer<PersistingHooks>;

/// Collaborators shared by every container of a server
#[derive(Clone)]
pub struct ContainerDeps {
    pub factory: Arc<dyn ItemFactory>,
    pub ids: Arc<dyn IdAllocator>,
    pub store: Arc<dyn ItemStore>,
    pub registry: Arc<TemplateRegistry>,
}

impl ContainerDeps {
    /// Wire a template factory and a default id allocator around `registry`
    pub fn new(registry: Arc<TemplateRegistry>, store: Arc<dyn ItemStore>) -> Self {
        Self::with_ids(registry, Arc::new(AtomicIdAllocator::default()), store)
    }

    /// Same as [`ContainerDeps::new`] with an explicit id allocator
    pub fn with_ids(
        registry: Arc<TemplateRegistry>,
        ids: Arc<dyn IdAllocator>,
        store: Arc<dyn ItemStore>,
    ) -> Self {
        let factory = Arc::new(TemplateItemFactory::new(Arc::clone(&registry), Arc::clone(&ids)));
        Self {
            factory,
            ids,
            store,
            registry,
        }
    }
}

#[derive(Default)]
struct Load {
    /// Quantity last accounted for, per resident entry
    counted: HashMap<ObjectId, Quantity>,
    weight: u64,
}

/// Persistence plus carried-weight tracking
pub struct InventoryHooks {
    persist: PersistingHooks,
    registry: Arc<TemplateRegistry>,
    load: Mutex<Load>,
}

impl InventoryHooks {
    pub fn new(persist: PersistingHooks, registry: Arc<TemplateRegistry>) -> Self {
        Self {
            persist,
            registry,
            load: Mutex::new(Load::default()),
        }
    }

    /// Total weight of everything held
    pub fn total_weight(&self) -> u64 {
        self.load.lock().weight
    }

    pub fn owner(&self) -> OwnerId {
        self.persist.owner()
    }

    fn recount(&self, item: &ItemInstance, count: Option<Quantity>) {
        let unit = self.registry.weight_of(item.template_id());
        let mut load = self.load.lock();
        let old = match count {
            Some(count) => load.counted.insert(item.object_id(), count),
            None => load.counted.remove(&item.object_id()),
        };
        if let Some(old) = old {
            load.weight = load.weight.saturating_sub(mul_and_limit(unit, old));
        }
        if let Some(count) = count {
            load.weight = add_and_limit(load.weight, mul_and_limit(unit, count));
        }
    }
}

impl ContainerHooks for InventoryHooks {
    fn on_add(&self, item: &ItemInstance) {
        self.persist.on_add(item);
        self.recount(item, Some(item.count()));
    }

    fn on_modify(&self, item: &ItemInstance) {
        self.persist.on_modify(item);
        self.recount(item, Some(item.count()));
    }

    fn on_remove(&self, item: &ItemInstance) {
        self.persist.on_remove(item);
        self.recount(item, None);
    }

    fn on_destroy(&self, item: &ItemInstance) {
        self.persist.on_destroy(item);
        self.recount(item, None);
    }

    fn on_clear(&self) {
        *self.load.lock() = Load::default();
    }
}

/// Inventory carried by a character
pub fn player_inventory(owner: OwnerId, deps: &ContainerDeps) -> PlayerInventory {
    carried(owner, ItemLocation::Inventory, deps)
}

/// Inventory carried by a pet
pub fn pet_inventory(owner: OwnerId, deps: &ContainerDeps) -> ItemContainer<InventoryHooks> {
    carried(owner, ItemLocation::PetInventory, deps)
}

/// Warehouse of an owner
pub fn warehouse(owner: OwnerId, deps: &ContainerDeps) -> Warehouse {
    let hooks = PersistingHooks::new(owner, ItemLocation::Warehouse, Arc::clone(&deps.store));
    ItemContainer::new(hooks, Arc::clone(&deps.factory), Arc::clone(&deps.ids))
}

fn carried(owner: OwnerId, location: ItemLocation, deps: &ContainerDeps) -> ItemContainer<InventoryHooks> {
    let persist = PersistingHooks::new(owner, location, Arc::clone(&deps.store));
    let hooks = InventoryHooks::new(persist, Arc::clone(&deps.registry));
    ItemContainer::new(hooks, Arc::clone(&deps.factory), Arc::clone(&deps.ids))
}
