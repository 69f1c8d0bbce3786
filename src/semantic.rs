//! Semantic objects: the output records of a build
//!
//! A [`SemanticObject`] is produced once by a detector or the rule pass and
//! never changed afterwards. Its properties are typed per kind and serialize
//! as a flat JSON object.

use crate::detectors::{
    AxisSummary, Border, Column, Door, Room, RoomConnectivity, Wall,
};
use crate::entities::EntityType;
use crate::rules::{RuleMatch, SemanticKind};
use crate::types::Handle;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// One classified object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticObject {
    /// Object kind
    pub kind: SemanticKind,
    /// Confidence score, when the producer has one
    pub confidence: Option<f64>,
    /// Provenance string (e.g. `layer:A-WALL`, `wall_enclosure`)
    pub source_rule: String,
    /// Geometry as WKT
    pub geom_wkt: Option<String>,
    /// Kind-specific attributes
    pub properties: Properties,
}

impl SemanticObject {
    /// Create an object without geometry or confidence
    pub fn new(kind: SemanticKind, source_rule: impl Into<String>, properties: Properties) -> Self {
        SemanticObject {
            kind,
            confidence: None,
            source_rule: source_rule.into(),
            geom_wkt: None,
            properties,
        }
    }

    /// Builder: attach WKT geometry
    pub fn with_geometry(mut self, wkt: Option<String>) -> Self {
        self.geom_wkt = wkt;
        self
    }
}

/// Kind-specific properties
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Properties {
    /// Rule-matched entity
    Basic(BasicProperties),
    Border(Border),
    AxisSummary(AxisSummary),
    Column(Column),
    Wall(Wall),
    Room(Room),
    Door(Door),
    RoomConnectivity(RoomConnectivity),
}

/// Properties of a rule-matched entity: identification plus the entity's
/// own geometry fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicProperties {
    /// Entity type name
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Entity handle
    pub handle: Handle,
    /// Layer name
    pub layer: String,
    /// Geometry fields of the entity
    #[serde(flatten)]
    pub fields: EntityFields,
}

impl BasicProperties {
    /// Capture an entity
    pub fn from_entity(entity: &EntityType) -> Self {
        BasicProperties {
            entity_type: entity.entity_type().to_string(),
            handle: entity.handle().clone(),
            layer: entity.layer().to_string(),
            fields: EntityFields(entity.clone()),
        }
    }
}

/// Serializes the kind-specific fields of an entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityFields(pub EntityType);

impl Serialize for EntityFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            EntityType::Line(e) => e.serialize(serializer),
            EntityType::LwPolyline(e) => e.serialize(serializer),
            EntityType::Circle(e) => e.serialize(serializer),
            EntityType::Arc(e) => e.serialize(serializer),
            EntityType::Text(e) => e.serialize(serializer),
            EntityType::MText(e) => e.serialize(serializer),
            EntityType::Insert(e) => e.serialize(serializer),
            EntityType::Unknown(_) => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

/// Rule-pass record for one entity
pub fn basic_object(entity: &EntityType, matched: RuleMatch) -> SemanticObject {
    SemanticObject::new(
        matched.kind,
        matched.provenance,
        Properties::Basic(BasicProperties::from_entity(entity)),
    )
    .with_geometry(crate::geometry::wkt::entity_wkt(entity))
}
