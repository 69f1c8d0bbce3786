//! Shared fixtures for dxf-semantics integration tests.
//!
//! Drawings are assembled in code: double-line walls, a title-block border
//! with a structural grid, and the selection maps that drive the detectors.

#![allow(dead_code)]

use dxf_semantics::entities::{EntityType, Insert, Line, LwPolyline, Text};
use dxf_semantics::rules::tables::keys;
use dxf_semantics::rules::SemanticKind;
use dxf_semantics::tables::BlockRecord;
use dxf_semantics::{BuildReport, Drawing, Selections, Vector2};

pub const WALL_LAYER: &str = "A-WALL";
pub const DOOR_LAYER: &str = "A-DOOR";
pub const TEXT_LAYER: &str = "A-TEXT";
pub const AXIS_LAYER: &str = "S-GRID";
pub const COLUMN_LAYER: &str = "S-COLS";
pub const BORDER_BLOCK: &str = "A1_FRAME";

/// Half of the wall thickness used by [`double_wall`]
pub const HALF_WALL: f64 = 100.0;

// ===========================================================================
// Entity helpers
// ===========================================================================

/// Line on a layer with a handle
pub fn line(layer: &str, handle: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> EntityType {
    EntityType::from(Line::from_coords(x1, y1, x2, y2))
        .on_layer(layer)
        .with_handle(handle)
}

/// Two face lines, 200 apart, centered on an axis-aligned centerline
///
/// The faces span exactly the centerline, so neighbouring centerlines meet
/// at shared endpoints.
pub fn double_wall(handle: &str, from: (f64, f64), to: (f64, f64)) -> [EntityType; 2] {
    let (x1, y1) = from;
    let (x2, y2) = to;
    if (y1 - y2).abs() < f64::EPSILON {
        [
            line(WALL_LAYER, &format!("{handle}a"), x1, y1 - HALF_WALL, x2, y2 - HALF_WALL),
            line(WALL_LAYER, &format!("{handle}b"), x1, y1 + HALF_WALL, x2, y2 + HALF_WALL),
        ]
    } else {
        [
            line(WALL_LAYER, &format!("{handle}a"), x1 - HALF_WALL, y1, x2 - HALF_WALL, y2),
            line(WALL_LAYER, &format!("{handle}b"), x1 + HALF_WALL, y1, x2 + HALF_WALL, y2),
        ]
    }
}

/// Room label text
pub fn label(text: &str, x: f64, y: f64) -> EntityType {
    EntityType::from(Text::with_value(text, Vector2::new(x, y))).on_layer(TEXT_LAYER)
}

// ===========================================================================
// Drawings
// ===========================================================================

/// Two 4000 × 3000 rooms side by side, split by a wall at x = 4000
///
/// "Kitchen" is on the left, "Hall" on the right, and a door arc sits in
/// the middle of the shared wall.
pub fn two_room_plan() -> Drawing {
    let walls = [
        double_wall("W1", (0.0, 0.0), (4000.0, 0.0)),
        double_wall("W2", (4000.0, 0.0), (8000.0, 0.0)),
        double_wall("W3", (8000.0, 0.0), (8000.0, 3000.0)),
        double_wall("W4", (8000.0, 3000.0), (4000.0, 3000.0)),
        double_wall("W5", (4000.0, 3000.0), (0.0, 3000.0)),
        double_wall("W6", (0.0, 3000.0), (0.0, 0.0)),
        double_wall("W7", (4000.0, 0.0), (4000.0, 3000.0)),
    ];

    let mut entities: Vec<EntityType> = walls.into_iter().flatten().collect();
    entities.push(label("Kitchen", 2000.0, 1500.0));
    entities.push(label("Hall", 6000.0, 1500.0));
    entities.push(
        EntityType::from(dxf_semantics::entities::Arc::from_center_radius_angles(
            Vector2::new(4000.0, 1500.0),
            850.0,
            0.0,
            std::f64::consts::FRAC_PI_2,
        ))
        .on_layer(DOOR_LAYER)
        .with_handle("D1"),
    );
    Drawing::from_entities(entities)
}

/// Selections enabling the wall, room and door detectors
pub fn plan_selections() -> Selections {
    let mut selections = Selections::new();
    selections.insert(keys::WALL_LAYER, [WALL_LAYER]);
    selections.insert(keys::DOOR_LAYER, [DOOR_LAYER]);
    selections
}

/// A 20000 × 15000 title block placed at the origin with a 3 × 2 grid
/// (x = 0, 6000, 12000; y = 0, 8000) and square columns on it
///
/// The x = 6000 grid line is drawn twice, 0.5 apart, and the column at
/// (12000, 8000) is a circle of a different size.
pub fn gridded_sheet() -> Drawing {
    let mut drawing = Drawing::new();
    drawing
        .blocks
        .add(BlockRecord::new(BORDER_BLOCK).with_entities(vec![LwPolyline::rectangle(
            Vector2::new(10000.0, 7500.0),
            20000.0,
            15000.0,
        )
        .into()]))
        .expect("fresh block table");

    let mut entities = vec![EntityType::from(Insert::new(BORDER_BLOCK, Vector2::new(-1000.0, -1000.0)))
        .with_handle("B1")];

    for (i, x) in [0.0, 6000.0, 6000.5, 12000.0].into_iter().enumerate() {
        entities.push(line(AXIS_LAYER, &format!("V{i}"), x, -500.0, x, 9000.0));
    }
    for (i, y) in [0.0, 8000.0].into_iter().enumerate() {
        entities.push(line(AXIS_LAYER, &format!("H{i}"), -500.0, y, 13000.0, y));
    }

    let mut n = 0;
    for x in [0.0, 6000.0, 12000.0] {
        for y in [0.0, 8000.0] {
            n += 1;
            let handle = format!("C{n}");
            let column: EntityType = if x == 12000.0 && y == 8000.0 {
                dxf_semantics::entities::Circle::from_coords(x, y, 300.0).into()
            } else {
                LwPolyline::rectangle(Vector2::new(x + 40.0, y - 40.0), 400.0, 400.0).into()
            };
            entities.push(column.on_layer(COLUMN_LAYER).with_handle(handle));
        }
    }
    // Off the grid
    entities.push(
        EntityType::from(LwPolyline::rectangle(Vector2::new(3000.0, 3000.0), 400.0, 400.0))
            .on_layer(COLUMN_LAYER)
            .with_handle("C99"),
    );

    for entity in entities {
        drawing.add_entity(entity);
    }
    drawing
}

/// Selections enabling the border, axis and column detectors
pub fn grid_selections() -> Selections {
    let mut selections = Selections::new();
    selections.insert(keys::BORDER_BLOCK, [BORDER_BLOCK]);
    selections.insert(keys::AXIS_LAYER, [AXIS_LAYER]);
    selections.insert(keys::CONCRETE_COLUMN_LAYER, [COLUMN_LAYER]);
    selections
}

// ===========================================================================
// Report helpers
// ===========================================================================

/// Number of objects of one kind
pub fn count_kind(report: &BuildReport, kind: SemanticKind) -> usize {
    report.objects.iter().filter(|o| o.kind == kind).count()
}

/// Kinds in output order, with consecutive repeats collapsed
pub fn kind_sequence(report: &BuildReport) -> Vec<SemanticKind> {
    let mut kinds: Vec<SemanticKind> = report.objects.iter().map(|o| o.kind).collect();
    kinds.dedup();
    kinds
}
