//! Concurrent item container
//!
//! One `RwLock` guards membership and quantities together. Public operations
//! take the lock once; the lookups they share are free functions over the
//! already-guarded `Vec`, so nothing ever re-enters the lock.

use parking_lot::RwLock;
use stash_core::{add_and_limit, IdAllocator, ObjectId, Quantity, TemplateId, MAX_QUANTITY};
use std::sync::Arc;

use crate::hooks::ContainerHooks;
use crate::item::{ItemFactory, ItemInstance};

/// Ordered, thread-safe collection of item stacks
///
/// Stackable templates occupy at most one entry; non-stackable templates get
/// one entry per instance. Invalid requests (zero quantity, unknown ids,
/// insufficient quantity, duplicate identity) are no-ops that return `None`
/// or `false`.
pub struct ItemContainer<H: ContainerHooks> {
    /// Entries in insertion order
    items: RwLock<Vec<Arc<ItemInstance>>>,
    /// Side effects of the concrete container
    hooks: H,
    /// Creates instances for `add_by_template`
    factory: Arc<dyn ItemFactory>,
    /// Identities for split-off stacks
    ids: Arc<dyn IdAllocator>,
}

impl<H: ContainerHooks> ItemContainer<H> {
    /// Create an empty container
    pub fn new(hooks: H, factory: Arc<dyn ItemFactory>, ids: Arc<dyn IdAllocator>) -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            hooks,
            factory,
            ids,
        }
    }

    /// Hooks of this container
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Number of distinct entries
    pub fn size(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Point-in-time copy of all entries
    pub fn snapshot(&self) -> Vec<Arc<ItemInstance>> {
        self.items.read().clone()
    }

    pub fn find_by_object_id(&self, id: ObjectId) -> Option<Arc<ItemInstance>> {
        let items = self.items.read();
        position_by_object_id(&items, id).map(|pos| Arc::clone(&items[pos]))
    }

    /// First entry of `template` in insertion order
    pub fn find_by_template_id(&self, template: TemplateId) -> Option<Arc<ItemInstance>> {
        let items = self.items.read();
        position_by_template_id(&items, template).map(|pos| Arc::clone(&items[pos]))
    }

    pub fn find_all_by_template_id(&self, template: TemplateId) -> Vec<Arc<ItemInstance>> {
        self.items
            .read()
            .iter()
            .filter(|item| item.template_id() == template)
            .cloned()
            .collect()
    }

    /// Sum of quantities across every entry of `template`, clamped
    pub fn total_quantity_of(&self, template: TemplateId) -> Quantity {
        self.items
            .read()
            .iter()
            .filter(|item| item.template_id() == template)
            .fold(0, |acc, item| add_and_limit(acc, item.count()))
    }

    /// Add `quantity` units of `template`
    ///
    /// Grows the existing stack for stackable templates, otherwise creates a
    /// new instance through the factory. Returns the entry holding the units.
    pub fn add_by_template(&self, template: TemplateId, quantity: Quantity) -> Option<Arc<ItemInstance>> {
        if quantity < 1 {
            return None;
        }

        let mut items = self.items.write();

        if let Some(pos) = position_by_template_id(&items, template) {
            let existing = &items[pos];
            if existing.is_stackable() {
                existing.set_count(add_and_limit(existing.count(), quantity));
                self.hooks.on_modify(existing);
                return Some(Arc::clone(existing));
            }
        }

        let item = Arc::new(
            self.factory
                .create_item(template)?
                .with_count(quantity.min(MAX_QUANTITY)),
        );
        items.push(Arc::clone(&item));
        self.hooks.on_add(&item);
        Some(item)
    }

    /// Take ownership of an existing instance
    ///
    /// A stackable instance whose template already has a stack is merged into
    /// it and discarded; the surviving stack is returned.
    pub fn add_instance(&self, item: impl Into<Arc<ItemInstance>>) -> Option<Arc<ItemInstance>> {
        let item = item.into();
        if item.count() < 1 {
            return None;
        }

        let mut items = self.items.write();

        if position_by_object_id(&items, item.object_id()).is_some() {
            log::warn!("Rejected second insert of item {}", item.object_id());
            return None;
        }

        if item.is_stackable() {
            if let Some(pos) = position_by_template_id(&items, item.template_id()) {
                let stack = &items[pos];
                stack.set_count(add_and_limit(stack.count(), item.count()));
                self.hooks.on_modify(stack);
                self.hooks.on_destroy(&item);
                return Some(Arc::clone(stack));
            }
        }

        if item.count() > MAX_QUANTITY {
            item.set_count(MAX_QUANTITY);
        }
        items.push(Arc::clone(&item));
        self.hooks.on_add(&item);
        Some(item)
    }

    /// Remove `quantity` units from the entry with object id `id`
    ///
    /// A partial removal leaves the entry in place and returns a new,
    /// unplaced instance carrying the removed units. A full removal returns
    /// the entry itself.
    pub fn remove_by_object_id(&self, id: ObjectId, quantity: Quantity) -> Option<Arc<ItemInstance>> {
        if quantity < 1 {
            return None;
        }
        let mut items = self.items.write();
        let pos = position_by_object_id(&items, id)?;
        self.take_locked(&mut items, pos, quantity)
    }

    /// Remove `quantity` units from the first entry of `template`
    pub fn remove_by_template_id(&self, template: TemplateId, quantity: Quantity) -> Option<Arc<ItemInstance>> {
        if quantity < 1 {
            return None;
        }
        let mut items = self.items.write();
        let pos = position_by_template_id(&items, template)?;
        self.take_locked(&mut items, pos, quantity)
    }

    /// Remove `quantity` units from a resident instance
    pub fn remove_instance(&self, item: &ItemInstance, quantity: Quantity) -> Option<Arc<ItemInstance>> {
        if quantity < 1 || item.count() < quantity {
            return None;
        }
        let mut items = self.items.write();
        let pos = position_by_object_id(&items, item.object_id())?;
        self.take_locked(&mut items, pos, quantity)
    }

    /// Remove a resident instance whatever its quantity
    pub fn remove_entire(&self, item: &ItemInstance) -> Option<Arc<ItemInstance>> {
        let mut items = self.items.write();
        let pos = position_by_object_id(&items, item.object_id())?;
        let removed = items.remove(pos);
        self.hooks.on_remove(&removed);
        Some(removed)
    }

    /// Consume `quantity` units of the entry with object id `id`
    pub fn destroy_by_object_id(&self, id: ObjectId, quantity: Quantity) -> bool {
        if quantity < 1 {
            return false;
        }
        let mut items = self.items.write();
        match position_by_object_id(&items, id) {
            Some(pos) => self.consume_locked(&mut items, pos, quantity),
            None => false,
        }
    }

    /// Consume `quantity` units of the first entry of `template`
    pub fn destroy_by_template_id(&self, template: TemplateId, quantity: Quantity) -> bool {
        if quantity < 1 {
            return false;
        }
        let mut items = self.items.write();
        match position_by_template_id(&items, template) {
            Some(pos) => self.consume_locked(&mut items, pos, quantity),
            None => false,
        }
    }

    /// Consume `quantity` units of a resident instance
    pub fn destroy_instance(&self, item: &ItemInstance, quantity: Quantity) -> bool {
        if quantity < 1 || item.count() < quantity {
            return false;
        }
        let mut items = self.items.write();
        match position_by_object_id(&items, item.object_id()) {
            Some(pos) => self.consume_locked(&mut items, pos, quantity),
            None => false,
        }
    }

    /// Remove and discard a resident instance whatever its quantity
    pub fn destroy_entire(&self, item: &ItemInstance) -> bool {
        let mut items = self.items.write();
        let Some(pos) = position_by_object_id(&items, item.object_id()) else {
            return false;
        };
        let removed = items.remove(pos);
        self.hooks.on_remove(&removed);
        self.hooks.on_destroy(&removed);
        true
    }

    /// Drop every entry with a single bulk notification
    pub fn clear(&self) {
        let mut items = self.items.write();
        items.clear();
        self.hooks.on_clear();
    }

    /// Split `quantity` off the entry at `pos`, or take the whole entry
    fn take_locked(
        &self,
        items: &mut Vec<Arc<ItemInstance>>,
        pos: usize,
        quantity: Quantity,
    ) -> Option<Arc<ItemInstance>> {
        let current = items[pos].count();
        if quantity > current {
            return None;
        }

        if quantity < current {
            let item = &items[pos];
            // Allocate first so a failure leaves the entry untouched
            let id = match self.ids.next_id() {
                Ok(id) => id,
                Err(e) => {
                    log::error!("Cannot split item {}: {}", item.object_id(), e);
                    return None;
                }
            };
            item.set_count(current - quantity);
            self.hooks.on_modify(item);
            log::debug!(
                "Split {} of item {} into new item {}",
                quantity,
                item.object_id(),
                id
            );
            return Some(Arc::new(item.split_off(id, quantity)));
        }

        let removed = items.remove(pos);
        self.hooks.on_remove(&removed);
        Some(removed)
    }

    /// Burn `quantity` units of the entry at `pos`
    fn consume_locked(&self, items: &mut Vec<Arc<ItemInstance>>, pos: usize, quantity: Quantity) -> bool {
        let current = items[pos].count();
        if quantity > current {
            return false;
        }

        if quantity < current {
            let item = &items[pos];
            item.set_count(current - quantity);
            self.hooks.on_modify(item);
            return true;
        }

        let removed = items.remove(pos);
        self.hooks.on_remove(&removed);
        self.hooks.on_destroy(&removed);
        log::debug!("Destroyed item {}", removed.object_id());
        true
    }
}

fn position_by_object_id(items: &[Arc<ItemInstance>], id: ObjectId) -> Option<usize> {
    items.iter().position(|item| item.object_id() == id)
}

fn position_by_template_id(items: &[Arc<ItemInstance>], template: TemplateId) -> Option<usize> {
    items.iter().position(|item| item.template_id() == template)
}
