//! Drawing entity types and traits
//!
//! Entities are the immutable inputs of a detection pass. Each kind the
//! engine understands is a dedicated struct holding only the fields that kind
//! uses; anything else is kept as an [`UnknownEntity`] so rule matching on
//! layer and type still works.

use crate::types::{BoundingBox2D, Handle};

pub mod arc;
pub mod circle;
pub mod insert;
pub mod line;
pub mod lwpolyline;
pub mod mtext;
pub mod text;
pub mod unknown_entity;

pub use arc::Arc;
pub use circle::Circle;
pub use insert::Insert;
pub use line::Line;
pub use lwpolyline::LwPolyline;
pub use mtext::MText;
pub use text::Text;
pub use unknown_entity::UnknownEntity;

/// Base trait for all drawing entities
pub trait Entity {
    /// Common entity data
    fn common(&self) -> &EntityCommon;

    /// Get the entity's handle
    fn handle(&self) -> &Handle {
        &self.common().handle
    }

    /// Get the entity's layer name
    fn layer(&self) -> &str {
        &self.common().layer
    }

    /// Get the entity type name as the decoder spells it (e.g. `"LINE"`)
    fn entity_type(&self) -> &str;

    /// Planar bounding box, if the entity has geometry
    fn bounding_box(&self) -> Option<BoundingBox2D>;
}

/// Common entity data shared by all entities
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityCommon {
    /// Opaque handle
    pub handle: Handle,
    /// Layer name as written in the drawing
    pub layer: String,
}

impl EntityCommon {
    /// Create common data on layer "0" with no handle
    pub fn new() -> Self {
        EntityCommon {
            handle: Handle::null(),
            layer: "0".to_string(),
        }
    }

    /// Create with a specific layer
    pub fn with_layer(layer: impl Into<String>) -> Self {
        EntityCommon {
            layer: layer.into(),
            ..Self::new()
        }
    }
}

/// Enumeration of all entity kinds for type-safe storage
#[derive(Debug, Clone, PartialEq)]
pub enum EntityType {
    /// Line entity
    Line(Line),
    /// Lightweight or legacy 2D polyline
    LwPolyline(LwPolyline),
    /// Circle entity
    Circle(Circle),
    /// Arc entity
    Arc(Arc),
    /// Single-line text
    Text(Text),
    /// Multi-line text
    MText(MText),
    /// Block reference
    Insert(Insert),
    /// Any kind the engine has no geometry model for
    Unknown(UnknownEntity),
}

impl EntityType {
    /// Get a reference to the entity trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Line(e) => e,
            EntityType::LwPolyline(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Arc(e) => e,
            EntityType::Text(e) => e,
            EntityType::MText(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Unknown(e) => e,
        }
    }

    /// Mutable access to the common data, used while building inputs
    pub fn common_mut(&mut self) -> &mut EntityCommon {
        match self {
            EntityType::Line(e) => &mut e.common,
            EntityType::LwPolyline(e) => &mut e.common,
            EntityType::Circle(e) => &mut e.common,
            EntityType::Arc(e) => &mut e.common,
            EntityType::Text(e) => &mut e.common,
            EntityType::MText(e) => &mut e.common,
            EntityType::Insert(e) => &mut e.common,
            EntityType::Unknown(e) => &mut e.common,
        }
    }

    /// Builder: place the entity on a layer
    pub fn on_layer(mut self, layer: impl Into<String>) -> Self {
        self.common_mut().layer = layer.into();
        self
    }

    /// Builder: set the entity handle
    pub fn with_handle(mut self, handle: impl Into<Handle>) -> Self {
        self.common_mut().handle = handle.into();
        self
    }

    /// Entity handle
    pub fn handle(&self) -> &Handle {
        self.as_entity().handle()
    }

    /// Layer name
    pub fn layer(&self) -> &str {
        self.as_entity().layer()
    }

    /// Entity type name
    pub fn entity_type(&self) -> &str {
        self.as_entity().entity_type()
    }

    /// Referenced block name (block references only)
    pub fn block_name(&self) -> Option<&str> {
        match self {
            EntityType::Insert(insert) => Some(&insert.block_name),
            _ => None,
        }
    }

    /// Readable text and insertion point (TEXT and MTEXT only)
    pub fn text_content(&self) -> Option<(String, crate::types::Vector2)> {
        match self {
            EntityType::Text(t) => Some((t.value.clone(), t.insertion_point)),
            EntityType::MText(t) => Some((t.plain_text(), t.insertion_point)),
            _ => None,
        }
    }

    /// Check if the entity is a line or a polyline
    pub fn is_linear(&self) -> bool {
        matches!(self, EntityType::Line(_) | EntityType::LwPolyline(_))
    }
}

macro_rules! impl_from_entity {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for EntityType {
                fn from(entity: $variant) -> Self {
                    EntityType::$variant(entity)
                }
            }
        )*
    };
}

impl_from_entity!(Line, LwPolyline, Circle, Arc, Text, MText, Insert);

impl From<UnknownEntity> for EntityType {
    fn from(entity: UnknownEntity) -> Self {
        EntityType::Unknown(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector2;

    #[test]
    fn test_entity_builders() {
        let entity = EntityType::from(Line::from_coords(0.0, 0.0, 10.0, 0.0))
            .on_layer("A-WALL")
            .with_handle("1F");
        assert_eq!(entity.layer(), "A-WALL");
        assert_eq!(entity.handle().as_str(), "1F");
        assert_eq!(entity.entity_type(), "LINE");
        assert!(entity.is_linear());
    }

    #[test]
    fn test_block_name_only_for_inserts() {
        let insert = EntityType::from(Insert::new("TITLE_A1", Vector2::ZERO));
        assert_eq!(insert.block_name(), Some("TITLE_A1"));
        let circle = EntityType::from(Circle::from_coords(0.0, 0.0, 1.0));
        assert_eq!(circle.block_name(), None);
    }

    #[test]
    fn test_text_content() {
        let text = EntityType::from(Text::with_value("KITCHEN", Vector2::new(1.0, 2.0)));
        let (value, at) = text.text_content().unwrap();
        assert_eq!(value, "KITCHEN");
        assert_eq!(at, Vector2::new(1.0, 2.0));
    }

    #[test]
    fn test_default_layer_is_zero() {
        assert_eq!(EntityCommon::new().layer, "0");
        assert_eq!(EntityCommon::with_layer("DIM").layer, "DIM");
    }
}
