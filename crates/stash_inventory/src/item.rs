//! Item templates, instances and the item factory

use serde::{Deserialize, Serialize};
use stash_core::{IdAllocator, ObjectId, Quantity, TemplateId};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::registry::TemplateRegistry;

/// Item type definition shared by every instance of that type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    /// Template identifier
    pub id: TemplateId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Whether instances coalesce into a single stack per container
    #[serde(default)]
    pub stackable: bool,
    /// Weight of a single unit
    #[serde(default)]
    pub weight: u32,
}

impl ItemTemplate {
    /// Create a non-stackable, weightless template
    pub fn new(id: TemplateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            stackable: false,
            weight: 0,
        }
    }

    /// Set stackable
    pub fn with_stackable(mut self, stackable: bool) -> Self {
        self.stackable = stackable;
        self
    }

    /// Set unit weight
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }
}

/// A single item instance: one stack of a template with its own identity
///
/// The count is atomic so a reader holding an `Arc` from a snapshot never
/// sees a torn value. It is only written while the owning container holds
/// its write lock.
pub struct ItemInstance {
    object_id: ObjectId,
    template_id: TemplateId,
    stackable: bool,
    count: AtomicU64,
}

impl ItemInstance {
    /// Create an instance holding a single unit
    pub fn new(object_id: ObjectId, template_id: TemplateId, stackable: bool) -> Self {
        Self {
            object_id,
            template_id,
            stackable,
            count: AtomicU64::new(1),
        }
    }

    /// Set the initial count
    pub fn with_count(self, count: Quantity) -> Self {
        self.count.store(count, Ordering::Release);
        self
    }

    #[inline]
    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    #[inline]
    pub fn template_id(&self) -> TemplateId {
        self.template_id
    }

    #[inline]
    pub fn is_stackable(&self) -> bool {
        self.stackable
    }

    /// Current quantity
    #[inline]
    pub fn count(&self) -> Quantity {
        self.count.load(Ordering::Acquire)
    }

    /// Only called with the owning container's write lock held
    #[inline]
    pub(crate) fn set_count(&self, count: Quantity) {
        self.count.store(count, Ordering::Release);
    }

    /// Fresh instance of the same template carrying `count`
    pub(crate) fn split_off(&self, object_id: ObjectId, count: Quantity) -> Self {
        Self::new(object_id, self.template_id, self.stackable).with_count(count)
    }
}

impl fmt::Debug for ItemInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemInstance")
            .field("object_id", &self.object_id)
            .field("template_id", &self.template_id)
            .field("stackable", &self.stackable)
            .field("count", &self.count())
            .finish()
    }
}

/// Creates new item instances with fresh identities
pub trait ItemFactory: Send + Sync {
    /// Create one unit of `template`, or `None` if the template is unknown
    fn create_item(&self, template: TemplateId) -> Option<ItemInstance>;
}

/// Factory backed by a template registry and an id allocator
pub struct TemplateItemFactory {
    registry: Arc<TemplateRegistry>,
    ids: Arc<dyn IdAllocator>,
}

impl TemplateItemFactory {
    pub fn new(registry: Arc<TemplateRegistry>, ids: Arc<dyn IdAllocator>) -> Self {
        Self { registry, ids }
    }
}

impl ItemFactory for TemplateItemFactory {
    fn create_item(&self, template: TemplateId) -> Option<ItemInstance> {
        let Some(definition) = self.registry.get(template) else {
            log::warn!("Cannot create item of unknown template {}", template);
            return None;
        };
        match self.ids.next_id() {
            Ok(id) => Some(ItemInstance::new(id, template, definition.stackable)),
            Err(e) => {
                log::error!("Cannot create item of template {}: {}", template, e);
                None
            }
        }
    }
}
