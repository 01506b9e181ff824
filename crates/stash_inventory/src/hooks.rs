//! Container notification hooks

use crate::item::ItemInstance;

/// Side effects a concrete container attaches to membership changes
///
/// Every hook runs synchronously while the container holds its write lock.
/// Implementations must not call back into the container that invoked them.
pub trait ContainerHooks: Send + Sync {
    /// A new entry was appended
    fn on_add(&self, item: &ItemInstance);

    /// An entry's quantity changed in place
    fn on_modify(&self, item: &ItemInstance);

    /// An entry left the container
    fn on_remove(&self, item: &ItemInstance);

    /// An instance was discarded for good
    fn on_destroy(&self, item: &ItemInstance);

    /// Every entry was dropped at once; no per-entry hooks ran
    fn on_clear(&self) {}
}

/// No side effects
impl ContainerHooks for () {
    fn on_add(&self, _item: &ItemInstance) {}
    fn on_modify(&self, _item: &ItemInstance) {}
    fn on_remove(&self, _item: &ItemInstance) {}
    fn on_destroy(&self, _item: &ItemInstance) {}
}
