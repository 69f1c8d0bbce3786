//! Wall detection from pairs of parallel lines
//!
//! A wall is drawn as two parallel faces. Segments on the wall layers are
//! paired greedily: the first partner that is parallel, at a plausible
//! thickness, overlapping enough and long enough wins, and both segments are
//! consumed. Structural and non-structural layers are paired separately.

use super::Border;
use crate::entities::EntityType;
use crate::geometry::{are_parallel, entity_points, entity_segments, wkt, Segment};
use crate::rules::tables::keys;
use crate::rules::{Selections, SemanticKind};
use crate::semantic::{Properties, SemanticObject};
use crate::types::{round2, round_to, Handle, Vector2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Wall detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Largest face distance accepted as a wall (drawing units, default 1000)
    pub max_thickness: f64,
    /// Shortest overlap accepted as a wall (drawing units, default 500)
    pub min_length: f64,
    /// Parallelism tolerance on `1 - |dot|` (default 0.05, about 3 degrees)
    pub parallel_tolerance: f64,
    /// Minimum overlap over the shorter face (default 0.3)
    pub min_overlap: f64,
    /// Face distances at or below this are coincident lines (default 1.0)
    pub min_distance: f64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            max_thickness: 1000.0,
            min_length: 500.0,
            parallel_tolerance: 0.05,
            min_overlap: 0.3,
            min_distance: 1.0,
        }
    }
}

/// Wall category, decided by the layer group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WallType {
    Structural,
    NonStructural,
}

impl WallType {
    /// Output kind for walls of this type
    pub fn kind(&self) -> SemanticKind {
        match self {
            WallType::Structural => SemanticKind::StructuralWall,
            WallType::NonStructural => SemanticKind::PartitionWall,
        }
    }

    fn selection_key(&self) -> &'static str {
        match self {
            WallType::Structural => keys::STRUCTURAL_WALL_LAYER,
            WallType::NonStructural => keys::WALL_LAYER,
        }
    }
}

/// A detected wall run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wall {
    /// 1-based, structural walls first
    pub wall_index: usize,
    pub wall_type: WallType,
    /// Face distance
    pub thickness: f64,
    /// Length of the shared stretch
    pub length: f64,
    /// Centerline start
    pub start: Vector2,
    /// Centerline end
    pub end: Vector2,
    /// Unit direction of the first face
    pub direction: Vector2,
    /// Handles of the two faces
    pub handles: Vec<Handle>,
}

impl Wall {
    /// Centerline as a segment
    pub fn centerline(&self) -> Segment {
        Segment::new(self.start, self.end)
    }

    /// Output record
    pub fn to_object(&self) -> SemanticObject {
        SemanticObject::new(
            self.wall_type.kind(),
            format!("layer:{}", self.wall_type.selection_key()),
            Properties::Wall(self.clone()),
        )
        .with_geometry(wkt::linestring(&[self.start, self.end]).ok())
    }
}

/// Centerline geometry of a face pair, before indexing
struct WallGeometry {
    thickness: f64,
    length: f64,
    start: Vector2,
    end: Vector2,
    direction: Vector2,
}

/// Shared stretch of two faces, measured along the first face
fn wall_geometry(first: &Segment, second: &Segment) -> Option<WallGeometry> {
    let axis = first.direction()?;
    let (a0, a1) = first.project_onto(axis);
    let (b0, b1) = second.project_onto(axis);
    let t_start = a0.max(b0);
    let t_end = a1.min(b1);
    let length = t_end - t_start;
    if length <= 0.0 {
        return None;
    }

    let start = first
        .point_at_projection(axis, t_start)
        .midpoint(&second.point_at_projection(axis, t_start));
    let end = first
        .point_at_projection(axis, t_end)
        .midpoint(&second.point_at_projection(axis, t_end));

    Some(WallGeometry {
        thickness: round2(first.perpendicular_distance(second)),
        length: round2(length),
        start: start.rounded(),
        end: end.rounded(),
        direction: Vector2::new(round_to(axis.x, 4), round_to(axis.y, 4)),
    })
}

/// Pair the segments of one layer group
fn pair_segments(
    segments: &[(Segment, Handle)],
    wall_type: WallType,
    config: &WallConfig,
    walls: &mut Vec<Wall>,
) {
    let directions: Vec<Option<Vector2>> = segments.iter().map(|(s, _)| s.direction()).collect();
    let mut used = vec![false; segments.len()];

    for i in 0..segments.len() {
        if used[i] {
            continue;
        }
        let Some(dir1) = directions[i] else {
            continue;
        };
        let (first, handle1) = &segments[i];

        for j in (i + 1)..segments.len() {
            if used[j] {
                continue;
            }
            let Some(dir2) = directions[j] else {
                continue;
            };
            if !are_parallel(dir1, dir2, config.parallel_tolerance) {
                continue;
            }
            let (second, handle2) = &segments[j];

            let distance = first.perpendicular_distance(second);
            if distance > config.max_thickness || distance <= config.min_distance {
                continue;
            }
            match first.overlap_ratio(second) {
                Some(ratio) if ratio >= config.min_overlap => {}
                _ => continue,
            }
            let Some(geometry) = wall_geometry(first, second) else {
                continue;
            };
            if geometry.length < config.min_length {
                continue;
            }

            walls.push(Wall {
                wall_index: walls.len() + 1,
                wall_type,
                thickness: geometry.thickness,
                length: geometry.length,
                start: geometry.start,
                end: geometry.end,
                direction: geometry.direction,
                handles: vec![handle1.clone(), handle2.clone()],
            });
            used[i] = true;
            used[j] = true;
            break;
        }
    }
}

/// Detect walls on the structural and non-structural wall layers
///
/// When borders exist, only entities lying completely inside one of them
/// take part.
pub fn detect_walls(
    entities: &[EntityType],
    borders: &[Border],
    selections: &Selections,
    config: &WallConfig,
) -> Vec<Wall> {
    let structural = selections.layer_set(keys::STRUCTURAL_WALL_LAYER);
    let partition = selections.layer_set(keys::WALL_LAYER);
    if structural.is_empty() && partition.is_empty() {
        return Vec::new();
    }

    let mut structural_segments = Vec::new();
    let mut partition_segments = Vec::new();
    for entity in entities.iter().filter(|e| e.is_linear()) {
        let layer = entity.layer();
        let group = if structural.contains(layer) {
            &mut structural_segments
        } else if partition.contains(layer) {
            &mut partition_segments
        } else {
            continue;
        };

        if !borders.is_empty() {
            let points = entity_points(entity);
            if !borders.iter().any(|b| b.bbox_world.contains_all(&points)) {
                continue;
            }
        }
        group.extend(entity_segments(entity));
    }

    let mut walls = Vec::new();
    pair_segments(&structural_segments, WallType::Structural, config, &mut walls);
    let structural_count = walls.len();
    pair_segments(&partition_segments, WallType::NonStructural, config, &mut walls);

    debug!(
        structural = structural_count,
        partition = walls.len() - structural_count,
        "walls detected"
    );
    walls
}
