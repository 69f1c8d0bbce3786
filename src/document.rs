//! Drawing document: the input snapshot of one detection pass

use crate::entities::EntityType;
use crate::notification::NotificationCollection;
use crate::tables::{BlockRecord, Layer, Table};
use indexmap::IndexMap;
use serde::Serialize;

/// One parsed drawing
///
/// Entities keep the decoder's order (duplicates allowed). Blocks and layers
/// are looked up case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    /// Layer table (used only for statistics)
    pub layers: Table<Layer>,

    /// Block definitions by name
    pub blocks: Table<BlockRecord>,

    /// Model-space entities, in decoder order
    entities: Vec<EntityType>,

    /// Issues noticed while reading the drawing
    pub notifications: NotificationCollection,
}

/// Summary counts of a drawing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawingStatistics {
    /// Layer names from the layer table, or entity layers when it is empty
    pub layer_names: Vec<String>,
    /// Number of layer names
    pub layer_count: usize,
    /// Number of model-space entities
    pub entity_count: usize,
    /// Entity count per type name, in first-seen order
    pub entity_types: IndexMap<String, usize>,
}

impl Drawing {
    /// Create a new empty drawing
    pub fn new() -> Self {
        Drawing {
            layers: Table::new(),
            blocks: Table::new(),
            entities: Vec::new(),
            notifications: NotificationCollection::new(),
        }
    }

    /// Create a drawing from a list of entities
    pub fn from_entities(entities: Vec<EntityType>) -> Self {
        Drawing {
            entities,
            ..Self::new()
        }
    }

    /// Add an entity to the drawing
    pub fn add_entity(&mut self, entity: impl Into<EntityType>) {
        self.entities.push(entity.into());
    }

    /// Get the number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// All entities, in decoder order
    pub fn entities(&self) -> &[EntityType] {
        &self.entities
    }

    /// Get a block definition by name (case-insensitive)
    pub fn block(&self, name: &str) -> Option<&BlockRecord> {
        self.blocks.get(name)
    }

    /// Layer names for reporting
    ///
    /// The layer table wins when present; otherwise the distinct layers
    /// referenced by entities, in first-seen order.
    pub fn layer_names(&self) -> Vec<String> {
        if !self.layers.is_empty() {
            return self.layers.names().map(str::to_string).collect();
        }
        let mut seen: IndexMap<&str, ()> = IndexMap::new();
        for entity in &self.entities {
            let layer = entity.layer();
            if !layer.is_empty() {
                seen.entry(layer).or_insert(());
            }
        }
        seen.into_keys().map(str::to_string).collect()
    }

    /// Compute summary statistics
    pub fn statistics(&self) -> DrawingStatistics {
        let layer_names = self.layer_names();
        let mut entity_types: IndexMap<String, usize> = IndexMap::new();
        for entity in &self.entities {
            *entity_types.entry(entity.entity_type().to_string()).or_insert(0) += 1;
        }
        DrawingStatistics {
            layer_count: layer_names.len(),
            layer_names,
            entity_count: self.entities.len(),
            entity_types,
        }
    }
}
