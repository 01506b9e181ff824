//! Stash Inventory - Concurrent Item Containers
//!
//! This crate provides the item containers behind character inventories,
//! warehouses and pet inventories.
//!
//! # Features
//!
//! - Item templates loaded from JSON item data
//! - Thread-safe container with reader/writer locking
//! - Stackable templates coalesce into a single entry
//! - Stack splitting on partial removal, in-place consumption on destroy
//! - Pluggable add/modify/remove/destroy hooks
//! - Row persistence and carried-weight tracking for concrete containers
//!
//! # Example
//!
//! ```ignore
//! use stash_inventory::prelude::*;
//!
//! let registry = TemplateRegistry::load_json("data/items.json")?;
//! let deps = ContainerDeps::new(Arc::new(registry), Arc::new(MemoryItemStore::new()));
//!
//! let inventory = player_inventory(OwnerId::new(1), &deps);
//! inventory.add_by_template(TemplateId::new(57), 1000);
//! let payment = inventory.remove_by_template_id(TemplateId::new(57), 250);
//! ```

pub mod container;
pub mod hooks;
pub mod inventory;
pub mod item;
pub mod persist;
pub mod registry;
pub mod store;

pub mod prelude {
    pub use crate::container::ItemContainer;
    pub use crate::hooks::ContainerHooks;
    pub use crate::inventory::{
        pet_inventory, player_inventory, warehouse, ContainerDeps, InventoryHooks, PlayerInventory, Warehouse,
    };
    pub use crate::item::{ItemFactory, ItemInstance, ItemTemplate, TemplateItemFactory};
    pub use crate::persist::PersistingHooks;
    pub use crate::registry::{RegistryError, TemplateRegistry};
    pub use crate::store::{ItemLocation, ItemRecord, ItemStore, MemoryItemStore, StoreError, StoreResult};
    pub use stash_core::prelude::*;
}

pub use prelude::*;
