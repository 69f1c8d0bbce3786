//! Reader for drawings decoded to JSON by an external DXF parser
//!
//! The expected layout is
//!
//! ```json
//! {
//!   "entities": [ { "type": "LINE", "handle": "1F", "layer": "A-WALL", ... } ],
//!   "blocks": { "FRAME": { "entities": [ ... ] } },
//!   "tables": { "layer": { "layers": { "0": { "name": "0" } } } }
//! }
//! ```
//!
//! with every section optionally nested under `"sections"`. Field names vary
//! between decoders, so each value is looked up under its known aliases. An
//! entity whose required geometry is missing or not numeric is skipped with a
//! notification; it never aborts the read.

use crate::document::Drawing;
use crate::entities::{
    Arc, Circle, EntityType, Insert, Line, LwPolyline, MText, Text, UnknownEntity,
};
use crate::error::{Result, SemanticError};
use crate::notification::{NotificationCollection, NotificationType};
use crate::rules::Selections;
use crate::tables::{BlockRecord, Layer};
use crate::types::{Handle, Vector2};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

type Object = Map<String, Value>;

/// Why an entity could not be read
type EntityResult<T> = std::result::Result<T, String>;

/// JSON drawing reader
pub struct JsonReader {
    root: Value,
}

impl JsonReader {
    /// Create a reader from any byte stream
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let root = serde_json::from_reader(BufReader::new(reader))?;
        Ok(Self { root })
    }

    /// Create a reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Create a reader from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let root = serde_json::from_str(text)?;
        Ok(Self { root })
    }

    /// Read the drawing
    ///
    /// Fails only when the document is not a JSON object.
    pub fn read(self) -> Result<Drawing> {
        let root = self
            .root
            .as_object()
            .ok_or_else(|| SemanticError::InvalidInput("document root is not an object".into()))?;

        let mut drawing = Drawing::new();
        let mut notifications = NotificationCollection::new();

        if let Some(Value::Object(tables)) = section(root, "tables") {
            read_layers(tables, &mut drawing, &mut notifications);
        }
        if let Some(Value::Object(blocks)) = section(root, "blocks") {
            read_blocks(blocks, &mut drawing, &mut notifications);
        }
        if let Some(Value::Array(entities)) = section(root, "entities") {
            for entity in read_entities(entities, &mut notifications) {
                drawing.add_entity(entity);
            }
        }

        debug!(
            entities = drawing.entity_count(),
            blocks = drawing.blocks.len(),
            layers = drawing.layers.len(),
            skipped = notifications.of_type(NotificationType::Skipped).len(),
            "drawing read"
        );
        drawing.notifications = notifications;
        Ok(drawing)
    }
}

/// Read a selection map (`{"key": ["NAME", ...]}`) from a file
pub fn read_selections<P: AsRef<Path>>(path: P) -> Result<Selections> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn section<'a>(root: &'a Object, name: &str) -> Option<&'a Value> {
    root.get(name).or_else(|| {
        root.get("sections")
            .and_then(Value::as_object)
            .and_then(|sections| sections.get(name))
    })
}

fn read_layers(tables: &Object, drawing: &mut Drawing, notifications: &mut NotificationCollection) {
    let Some(layers) = tables
        .get("layer")
        .and_then(|t| t.get("layers"))
        .and_then(Value::as_object)
    else {
        return;
    };
    for (key, value) in layers {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(key.as_str());
        let mut layer = Layer::new(name);
        layer.handle = handle_of(value);
        layer.color_index = value
            .get("colorIndex")
            .or_else(|| value.get("color"))
            .and_then(Value::as_i64)
            .and_then(|c| i16::try_from(c).ok());
        layer.visible = value.get("visible").and_then(Value::as_bool).unwrap_or(true);
        layer.frozen = value.get("frozen").and_then(Value::as_bool).unwrap_or(false);
        if let Err(err) = drawing.layers.add(layer) {
            notifications.notify(NotificationType::Warning, err.to_string());
        }
    }
}

fn read_blocks(blocks: &Object, drawing: &mut Drawing, notifications: &mut NotificationCollection) {
    for (key, value) in blocks {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(key.as_str());
        let mut block = BlockRecord::new(name);
        block.handle = handle_of(value);
        if let Some(base) = value.get("position").and_then(point) {
            block.base_point = base;
        }
        if let Some(entities) = value.get("entities").and_then(Value::as_array) {
            block.entities = read_entities(entities, notifications);
        }
        if let Err(err) = drawing.blocks.add(block) {
            notifications.notify(NotificationType::Warning, err.to_string());
        }
    }
}

fn read_entities(values: &[Value], notifications: &mut NotificationCollection) -> Vec<EntityType> {
    let mut entities = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        let Some(object) = value.as_object() else {
            notifications.notify(
                NotificationType::Skipped,
                format!("entity #{} is not an object", index),
            );
            continue;
        };
        match read_entity(object) {
            Ok(entity) => entities.push(entity),
            Err(reason) => notifications.notify(
                NotificationType::Skipped,
                format!(
                    "entity #{} ({}, handle {:?}) skipped: {}",
                    index,
                    object.get("type").and_then(Value::as_str).unwrap_or("?"),
                    handle_of(value).as_str(),
                    reason
                ),
            ),
        }
    }
    entities
}

fn read_entity(object: &Object) -> EntityResult<EntityType> {
    let type_name = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or("missing type")?
        .to_uppercase();

    let entity: EntityType = match type_name.as_str() {
        "LINE" => read_line(object)?.into(),
        "LWPOLYLINE" | "POLYLINE" => read_polyline(object, type_name == "POLYLINE")?.into(),
        "CIRCLE" => Circle::from_center_radius(
            point_field(object, &["center", "position"])?,
            number_field(object, "radius")?,
        )
        .into(),
        "ARC" => Arc::from_center_radius_angles(
            point_field(object, &["center"])?,
            number_field(object, "radius")?,
            number(object, "startAngle").unwrap_or(0.0),
            number(object, "endAngle").unwrap_or(0.0),
        )
        .into(),
        "TEXT" => {
            let position = point_field(object, &["startPoint", "position", "insertionPoint"])?;
            let text = Text::with_value(text_value(object), position);
            match number(object, "textHeight") {
                Some(height) => text.with_height(height).into(),
                None => text.into(),
            }
        }
        "MTEXT" => {
            let position = point_field(object, &["position", "insertionPoint"])?;
            MText::with_value(text_value(object), position).into()
        }
        "INSERT" => {
            let name = object
                .get("name")
                .and_then(Value::as_str)
                .ok_or("missing block name")?;
            let position = point_field(object, &["position"])?;
            Insert::new(name, position)
                .with_scale(scale(object, "xScale"), scale(object, "yScale"))
                .with_rotation(number(object, "rotation").unwrap_or(0.0))
                .into()
        }
        _ => UnknownEntity::new(type_name.clone()).into(),
    };

    let layer = object
        .get("layer")
        .or_else(|| object.get("layerName"))
        .and_then(Value::as_str)
        .unwrap_or("0");
    let handle = object.get("handle").map(handle_value).unwrap_or_else(Handle::null);
    Ok(entity.on_layer(layer).with_handle(handle))
}

fn read_line(object: &Object) -> EntityResult<Line> {
    if let Some(vertices) = object.get("vertices").and_then(Value::as_array) {
        if vertices.len() >= 2 {
            let start = point(&vertices[0]).ok_or("non-numeric start vertex")?;
            let end = point(&vertices[1]).ok_or("non-numeric end vertex")?;
            return Ok(Line::from_points(start, end));
        }
    }
    Ok(Line::from_points(
        point_field(object, &["startPoint", "start"])?,
        point_field(object, &["endPoint", "end"])?,
    ))
}

fn read_polyline(object: &Object, heavy: bool) -> EntityResult<LwPolyline> {
    let vertices = object
        .get("vertices")
        .and_then(Value::as_array)
        .ok_or("missing vertices")?;
    let points = vertices
        .iter()
        .map(|v| point(v).ok_or_else(|| "non-numeric vertex".to_string()))
        .collect::<EntityResult<Vec<Vector2>>>()?;

    let mut polyline = LwPolyline::from_points(points);
    polyline.is_closed = object
        .get("shape")
        .or_else(|| object.get("closed"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    polyline.heavy = heavy;
    Ok(polyline)
}

fn point(value: &Value) -> Option<Vector2> {
    let x = value.get("x")?.as_f64()?;
    let y = value.get("y")?.as_f64()?;
    Some(Vector2::new(x, y))
}

/// First alias holding a point; the error names the first alias
fn point_field(object: &Object, aliases: &[&str]) -> EntityResult<Vector2> {
    aliases
        .iter()
        .find_map(|key| object.get(*key).and_then(point))
        .ok_or_else(|| format!("missing or non-numeric {}", aliases[0]))
}

fn number(object: &Object, key: &str) -> Option<f64> {
    object.get(key).and_then(Value::as_f64)
}

fn number_field(object: &Object, key: &str) -> EntityResult<f64> {
    number(object, key).ok_or_else(|| format!("missing or non-numeric {}", key))
}

/// Scale factor; missing or zero means 1
fn scale(object: &Object, key: &str) -> f64 {
    match number(object, key) {
        Some(s) if s != 0.0 => s,
        _ => 1.0,
    }
}

fn text_value(object: &Object) -> String {
    ["text", "textString", "contents"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

fn handle_of(value: &Value) -> Handle {
    value.get("handle").map(handle_value).unwrap_or_else(Handle::null)
}

/// Handles arrive as hex strings or, from some decoders, as numbers
fn handle_value(value: &Value) -> Handle {
    match value {
        Value::String(s) => Handle::new(s.as_str()),
        Value::Number(n) => Handle::new(n.to_string()),
        _ => Handle::null(),
    }
}
