//! Template registry loaded from JSON item data

use serde::{Deserialize, Serialize};
use stash_core::TemplateId;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::item::ItemTemplate;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed item data
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two definitions for the same template
    #[error("Duplicate template: {0}")]
    Duplicate(TemplateId),
}

/// On-disk layout of an item data file
#[derive(Debug, Default, Serialize, Deserialize)]
struct TemplateFile {
    templates: Vec<ItemTemplate>,
}

/// All known item templates, keyed by id
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<TemplateId, ItemTemplate>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a registry from JSON of the form `{"templates": [...]}`
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let file: TemplateFile = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for template in file.templates {
            registry.register(template)?;
        }
        log::debug!("Loaded {} item templates", registry.len());
        Ok(registry)
    }

    /// Load a registry from a JSON file
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Serialize the registry, ordered by template id
    pub fn to_json_string(&self) -> Result<String, RegistryError> {
        let mut templates: Vec<_> = self.templates.values().cloned().collect();
        templates.sort_by_key(|t| t.id);
        Ok(serde_json::to_string_pretty(&TemplateFile { templates })?)
    }

    /// Register a template
    pub fn register(&mut self, template: ItemTemplate) -> Result<(), RegistryError> {
        if self.templates.contains_key(&template.id) {
            return Err(RegistryError::Duplicate(template.id));
        }
        self.templates.insert(template.id, template);
        Ok(())
    }

    pub fn get(&self, id: TemplateId) -> Option<&ItemTemplate> {
        self.templates.get(&id)
    }

    /// Unit weight, zero for unknown templates
    pub fn weight_of(&self, id: TemplateId) -> u64 {
        self.get(id).map(|t| u64::from(t.weight)).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
