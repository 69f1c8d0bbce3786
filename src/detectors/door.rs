//! Door detection and room connectivity
//!
//! Each entity on a door layer is a door. It is attached to the nearest wall
//! centerline, and the rooms on either side are found by probing one point
//! on each side of that wall. Rooms reached through the same door are
//! connected.

use super::{Room, Wall};
use crate::entities::EntityType;
use crate::geometry::{entity_points, wkt};
use crate::rules::tables::keys;
use crate::rules::{Selections, SemanticKind};
use crate::semantic::{Properties, SemanticObject};
use crate::types::{round2, BoundingBox2D, Handle, Vector2};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Door detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    /// Farthest a door may be from a wall centerline (drawing units, default 500)
    pub max_wall_distance: f64,
    /// Probe distance beyond the wall face (drawing units, default 300)
    pub search_margin: f64,
    /// Width used when the entity gives none (drawing units, default 900)
    pub default_width: f64,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            max_wall_distance: 500.0,
            search_margin: 300.0,
            default_width: 900.0,
        }
    }
}

/// The wall a door sits in
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DoorWall {
    pub wall_index: usize,
    /// Output kind of the wall
    pub wall_type: SemanticKind,
}

/// A detected door
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Door {
    /// 1-based, in entity order
    pub door_index: usize,
    pub center: Vector2,
    pub width: f64,
    /// Type name of the source entity
    pub entity_type: String,
    pub entity_handle: Handle,
    /// Nearest wall, when one is close enough
    pub wall: Option<DoorWall>,
    /// Indices of the rooms on either side
    pub connects_rooms: Vec<usize>,
    /// Names of those rooms, in the same order
    pub connects_room_names: Vec<Option<String>>,
}

impl Door {
    /// Output record
    pub fn to_object(&self) -> SemanticObject {
        SemanticObject::new(
            SemanticKind::Door,
            format!("layer:{}", keys::DOOR_LAYER),
            Properties::Door(self.clone()),
        )
        .with_geometry(Some(wkt::point(self.center)))
    }
}

/// Rooms joined by one door, smaller index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ConnectivityEdge {
    pub from: usize,
    pub to: usize,
}

/// Room adjacency through doors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomConnectivity {
    /// Distinct room pairs, in the order doors first revealed them
    pub edges: Vec<ConnectivityEdge>,
    /// Rooms appearing in any edge
    pub room_count: usize,
    /// Number of doors analysed
    pub door_count: usize,
}

impl RoomConnectivity {
    /// Output record
    pub fn to_object(&self) -> SemanticObject {
        SemanticObject::new(
            SemanticKind::RoomConnectivity,
            "door_analysis",
            Properties::RoomConnectivity(self.clone()),
        )
    }
}

/// Result of the door pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoorAnalysis {
    pub doors: Vec<Door>,
    /// Present only when some door links two rooms
    pub connectivity: Option<RoomConnectivity>,
}

/// Reference point of a door symbol
fn door_center(entity: &EntityType) -> Option<Vector2> {
    match entity {
        EntityType::Arc(arc) => Some(arc.center),
        EntityType::Circle(circle) => Some(circle.center),
        EntityType::Insert(insert) => Some(insert.insert_point),
        EntityType::Line(_) | EntityType::LwPolyline(_) => {
            let points = entity_points(entity);
            if points.is_empty() {
                return None;
            }
            let sum = points.iter().fold(Vector2::ZERO, |acc, p| acc + *p);
            Some(sum / points.len() as f64)
        }
        _ => None,
    }
}

/// Opening width of a door symbol
fn door_width(entity: &EntityType, default_width: f64) -> f64 {
    match entity {
        EntityType::Arc(arc) => arc.radius,
        EntityType::Line(line) => line.length(),
        EntityType::LwPolyline(poly) => BoundingBox2D::from_points(&poly.vertices)
            .map(|b| b.width().max(b.height()))
            .unwrap_or(default_width),
        _ => default_width,
    }
}

/// Closest wall within `max_distance`; ties keep the earlier wall
fn nearest_wall<'w>(center: Vector2, walls: &'w [Wall], max_distance: f64) -> Option<&'w Wall> {
    let mut best: Option<(&Wall, f64)> = None;
    for wall in walls {
        let distance = wall.centerline().distance_to_point(center);
        if distance > max_distance {
            continue;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((wall, distance));
        }
    }
    best.map(|(wall, _)| wall)
}

/// Rooms containing a probe on either side of the wall
fn adjacent_rooms<'r>(center: Vector2, wall: &Wall, rooms: &'r [Room], margin: f64) -> Vec<&'r Room> {
    let normal = wall.direction.perpendicular();
    let offset = wall.thickness / 2.0 + margin;
    let probe_a = center + normal * offset;
    let probe_b = center - normal * offset;
    rooms
        .iter()
        .filter(|room| room.contains(probe_a) || room.contains(probe_b))
        .collect()
}

/// Detect doors on the door layers and derive room connectivity
pub fn detect_doors(
    entities: &[EntityType],
    walls: &[Wall],
    rooms: &[Room],
    selections: &Selections,
    config: &DoorConfig,
) -> DoorAnalysis {
    let layers = selections.layer_set(keys::DOOR_LAYER);
    if layers.is_empty() {
        return DoorAnalysis::default();
    }

    let mut doors = Vec::new();
    let mut edges: IndexSet<ConnectivityEdge> = IndexSet::new();

    for entity in entities {
        if !layers.contains(entity.layer()) {
            continue;
        }
        let Some(center) = door_center(entity) else {
            continue;
        };

        let wall = nearest_wall(center, walls, config.max_wall_distance);
        let connected = wall
            .map(|w| adjacent_rooms(center, w, rooms, config.search_margin))
            .unwrap_or_default();

        for (i, a) in connected.iter().enumerate() {
            for b in &connected[i + 1..] {
                let (from, to) = if a.room_index <= b.room_index {
                    (a.room_index, b.room_index)
                } else {
                    (b.room_index, a.room_index)
                };
                if from != to {
                    edges.insert(ConnectivityEdge { from, to });
                }
            }
        }

        doors.push(Door {
            door_index: doors.len() + 1,
            center: center.rounded(),
            width: round2(door_width(entity, config.default_width)),
            entity_type: entity.entity_type().to_string(),
            entity_handle: entity.handle().clone(),
            wall: wall.map(|w| DoorWall {
                wall_index: w.wall_index,
                wall_type: w.wall_type.kind(),
            }),
            connects_rooms: connected.iter().map(|r| r.room_index).collect(),
            connects_room_names: connected.iter().map(|r| r.name.clone()).collect(),
        });
    }

    let connectivity = if edges.is_empty() {
        None
    } else {
        let rooms_linked: IndexSet<usize> = edges.iter().flat_map(|e| [e.from, e.to]).collect();
        Some(RoomConnectivity {
            room_count: rooms_linked.len(),
            door_count: doors.len(),
            edges: edges.into_iter().collect(),
        })
    };

    debug!(
        doors = doors.len(),
        links = connectivity.as_ref().map_or(0, |c| c.edges.len()),
        "doors detected"
    );
    DoorAnalysis { doors, connectivity }
}
