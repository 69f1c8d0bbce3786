//! Block definition table entry

use super::TableEntry;
use crate::entities::{EntityType, LwPolyline};
use crate::types::{BoundingBox2D, Handle, Vector2};

/// A named block definition and the entities it contains
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRecord {
    /// Handle, when the decoder reports one
    pub handle: Handle,
    /// Block name
    pub name: String,
    /// Base point of the block
    pub base_point: Vector2,
    /// Entities inside the block, in definition order
    pub entities: Vec<EntityType>,
}

impl BlockRecord {
    /// Create a new empty block definition
    pub fn new(name: impl Into<String>) -> Self {
        BlockRecord {
            handle: Handle::null(),
            name: name.into(),
            base_point: Vector2::ZERO,
            entities: Vec::new(),
        }
    }

    /// Builder: set the contained entities
    pub fn with_entities(mut self, entities: Vec<EntityType>) -> Self {
        self.entities = entities;
        self
    }

    /// Add an entity to the block
    pub fn add_entity(&mut self, entity: EntityType) {
        self.entities.push(entity);
    }

    /// Local bounding box spanned by the block's line and polyline vertices
    pub fn local_bounds(&self) -> Option<BoundingBox2D> {
        let points: Vec<Vector2> = self
            .entities
            .iter()
            .flat_map(|entity| match entity {
                EntityType::Line(line) => vec![line.start, line.end],
                EntityType::LwPolyline(LwPolyline { vertices, .. }) => vertices.clone(),
                _ => Vec::new(),
            })
            .collect();
        BoundingBox2D::from_points(&points)
    }
}

impl TableEntry for BlockRecord {
    fn handle(&self) -> &Handle {
        &self.handle
    }

    fn name(&self) -> &str {
        &self.name
    }
}
