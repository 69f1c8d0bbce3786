//! End-to-end tests: walls, rooms and doors on a two-room plan.

mod common;

use common::*;
use dxf_semantics::rules::tables::keys;
use dxf_semantics::rules::SemanticKind;
use dxf_semantics::semantic::Properties;
use dxf_semantics::{EngineConfig, JsonWriter, NotificationType, SemanticBuilder, Selections};

#[test]
fn test_two_room_plan_object_counts() {
    let report = SemanticBuilder::default()
        .build(&two_room_plan(), &plan_selections())
        .unwrap();

    assert_eq!(count_kind(&report, SemanticKind::Wall), 14);
    assert_eq!(count_kind(&report, SemanticKind::PartitionWall), 7);
    assert_eq!(count_kind(&report, SemanticKind::Room), 2);
    assert_eq!(count_kind(&report, SemanticKind::Door), 2);
    assert_eq!(count_kind(&report, SemanticKind::RoomConnectivity), 1);
    assert!(report.notifications.is_empty());
}

#[test]
fn test_output_order_is_fixed() {
    let report = SemanticBuilder::default()
        .build(&two_room_plan(), &plan_selections())
        .unwrap();
    assert_eq!(
        kind_sequence(&report),
        vec![
            SemanticKind::Wall,
            SemanticKind::Door,
            SemanticKind::PartitionWall,
            SemanticKind::Room,
            SemanticKind::Door,
            SemanticKind::RoomConnectivity,
        ]
    );
}

#[test]
fn test_wall_centerlines() {
    let report = SemanticBuilder::default()
        .build(&two_room_plan(), &plan_selections())
        .unwrap();
    let walls: Vec<_> = report
        .objects
        .iter()
        .filter_map(|o| match &o.properties {
            Properties::Wall(w) => Some(w),
            _ => None,
        })
        .collect();

    assert_eq!(walls[0].wall_index, 1);
    assert_eq!(walls[0].thickness, 200.0);
    assert_eq!(walls[0].length, 4000.0);
    assert_eq!(walls[0].handles[0].as_str(), "W1a");
    assert_eq!(
        report.objects.iter().find(|o| o.kind == SemanticKind::PartitionWall).unwrap().geom_wkt.as_deref(),
        Some("LINESTRING(0 0, 4000 0)")
    );
    assert!(walls.iter().all(|w| w.thickness == 200.0));
    assert_eq!(walls.last().unwrap().wall_index, 7);
}

#[test]
fn test_rooms_are_named_from_texts() {
    let report = SemanticBuilder::default()
        .build(&two_room_plan(), &plan_selections())
        .unwrap();
    let mut rooms: Vec<_> = report
        .objects
        .iter()
        .filter_map(|o| match &o.properties {
            Properties::Room(r) => Some(r),
            _ => None,
        })
        .collect();
    rooms.sort_by(|a, b| a.centroid.x.total_cmp(&b.centroid.x));

    assert_eq!(rooms[0].name.as_deref(), Some("Kitchen"));
    assert_eq!(rooms[1].name.as_deref(), Some("Hall"));
    for room in rooms {
        assert_eq!(room.area, 12_000_000.0);
        assert_eq!(room.area_sqm, 12.0);
        assert_eq!(room.vertex_count, 4);
    }
}

#[test]
fn test_door_connects_both_rooms() {
    let report = SemanticBuilder::default()
        .build(&two_room_plan(), &plan_selections())
        .unwrap();

    let door = report
        .objects
        .iter()
        .find_map(|o| match &o.properties {
            Properties::Door(d) => Some(d),
            _ => None,
        })
        .unwrap();
    assert_eq!(door.width, 850.0);
    assert_eq!(door.entity_handle.as_str(), "D1");
    assert_eq!(door.wall.map(|w| w.wall_index), Some(7));

    let mut names: Vec<_> = door.connects_room_names.iter().flatten().cloned().collect();
    names.sort();
    assert_eq!(names, vec!["Hall".to_string(), "Kitchen".to_string()]);

    let connectivity = report
        .objects
        .iter()
        .find_map(|o| match &o.properties {
            Properties::RoomConnectivity(c) => Some(c),
            _ => None,
        })
        .unwrap();
    assert_eq!(connectivity.edges.len(), 1);
    assert_eq!((connectivity.edges[0].from, connectivity.edges[0].to), (1, 2));
    assert_eq!(connectivity.room_count, 2);
    assert_eq!(connectivity.door_count, 1);
}

#[test]
fn test_without_door_selection_no_doors() {
    let mut selections = Selections::new();
    selections.insert(keys::WALL_LAYER, [WALL_LAYER]);
    let report = SemanticBuilder::default()
        .build(&two_room_plan(), &selections)
        .unwrap();
    assert_eq!(count_kind(&report, SemanticKind::Room), 2);
    assert_eq!(count_kind(&report, SemanticKind::Door), 0);
    assert_eq!(count_kind(&report, SemanticKind::RoomConnectivity), 0);
}

#[test]
fn test_thin_walls_config_rejects_pairs() {
    let mut config = EngineConfig::default();
    config.wall.max_thickness = 150.0;
    let report = SemanticBuilder::new(config)
        .build(&two_room_plan(), &plan_selections())
        .unwrap();
    assert_eq!(count_kind(&report, SemanticKind::PartitionWall), 0);
    assert_eq!(count_kind(&report, SemanticKind::Room), 0);
    // the door is still reported, just unattached
    assert_eq!(count_kind(&report, SemanticKind::Door), 2);
}

#[test]
fn test_cycle_cap_is_reported() {
    let mut config = EngineConfig::default();
    config.room.max_cycles = 1;
    let report = SemanticBuilder::new(config)
        .build(&two_room_plan(), &plan_selections())
        .unwrap();
    assert!(report.notifications.has_type(NotificationType::Limit));
}

#[test]
fn test_build_is_byte_identical_across_runs() {
    let builder = SemanticBuilder::default();
    let drawing = two_room_plan();
    let selections = plan_selections();

    let first = builder.build(&drawing, &selections).unwrap();
    let second = builder.build(&drawing, &selections).unwrap();
    assert_eq!(first, second);

    let a = JsonWriter::new(&first.objects).to_json_string().unwrap();
    let b = JsonWriter::new(&second.objects).to_json_string().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_batch_matches_single_builds() {
    let builder = SemanticBuilder::default();
    let jobs: Vec<_> = (0..4).map(|_| (two_room_plan(), plan_selections())).collect();
    let single = builder.build(&jobs[0].0, &jobs[0].1).unwrap();
    for report in builder.build_batch(&jobs) {
        assert_eq!(report.unwrap(), single);
    }
}
