//! File-to-file tests: decoded JSON drawing in, semantic JSON out.

use dxf_semantics::io::read_selections;
use dxf_semantics::{JsonReader, JsonWriter, NotificationType, SemanticBuilder};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

fn wall_line(handle: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Value {
    json!({
        "type": "LINE",
        "handle": handle,
        "layer": "A-WALL",
        "vertices": [{"x": x1, "y": y1}, {"x": x2, "y": y2}]
    })
}

/// One 5000 × 4000 office drawn with 200 thick double-line walls
fn office_drawing() -> Value {
    json!({
        "sections": {
            "tables": {"layer": {"layers": {
                "0": {"name": "0"},
                "A-WALL": {"name": "A-WALL", "colorIndex": 1},
                "A-TEXT": {"name": "A-TEXT"}
            }}},
            "entities": [
                wall_line("10", 0.0, -100.0, 5000.0, -100.0),
                wall_line("11", 0.0, 100.0, 5000.0, 100.0),
                wall_line("12", 4900.0, 0.0, 4900.0, 4000.0),
                wall_line("13", 5100.0, 0.0, 5100.0, 4000.0),
                wall_line("14", 5000.0, 3900.0, 0.0, 3900.0),
                wall_line("15", 5000.0, 4100.0, 0.0, 4100.0),
                wall_line("16", -100.0, 4000.0, -100.0, 0.0),
                wall_line("17", 100.0, 4000.0, 100.0, 0.0),
                {"type": "TEXT", "handle": "20", "layer": "A-TEXT",
                 "startPoint": {"x": 2500, "y": 2000}, "text": "Office", "textHeight": 250},
                {"type": "CIRCLE", "handle": "21", "layer": "A-WALL", "center": {"x": 0, "y": 0}}
            ]
        }
    })
}

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

#[test]
fn test_file_round_trip_produces_room() {
    let dir = tempfile::tempdir().unwrap();
    let drawing_path = dir.path().join("office.json");
    let selections_path = dir.path().join("selections.json");
    let output_path = dir.path().join("office.semantic.json");
    write_json(&drawing_path, &office_drawing());
    write_json(&selections_path, &json!({"non-wall-layer": ["a-wall"]}));

    let drawing = JsonReader::from_file(&drawing_path).unwrap().read().unwrap();
    let selections = read_selections(&selections_path).unwrap();
    let report = SemanticBuilder::default().build(&drawing, &selections).unwrap();

    // the circle without a radius was skipped while reading
    assert_eq!(report.notifications.of_type(NotificationType::Skipped).len(), 1);
    assert_eq!(report.statistics.entity_count, 9);
    assert_eq!(report.statistics.layer_names, vec!["0", "A-WALL", "A-TEXT"]);

    JsonWriter::new(&report.objects).write_to_file(&output_path).unwrap();
    let output: Value = serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    let objects = output.as_array().unwrap();

    let kinds: Vec<&str> = objects.iter().map(|o| o["kind"].as_str().unwrap()).collect();
    assert_eq!(kinds.iter().filter(|k| **k == "wall").count(), 8);
    assert_eq!(kinds.iter().filter(|k| **k == "partition_wall").count(), 4);
    assert_eq!(kinds.last(), Some(&"room"));

    let room = objects.last().unwrap();
    assert_eq!(room["source_rule"], "wall_enclosure");
    assert_eq!(room["properties"]["name"], "Office");
    assert_eq!(room["properties"]["area_sqm"].as_f64(), Some(20.0));
    assert_eq!(room["properties"]["vertex_count"], 4);
    assert!(room["geom_wkt"].as_str().unwrap().starts_with("POLYGON(("));

    let first_wall = objects.iter().find(|o| o["kind"] == "partition_wall").unwrap();
    assert_eq!(first_wall["source_rule"], "layer:non-wall-layer");
    assert_eq!(first_wall["geom_wkt"], "LINESTRING(0 0, 5000 0)");
    assert_eq!(first_wall["properties"]["thickness"].as_f64(), Some(200.0));
}

#[test]
fn test_basic_record_carries_entity_fields() {
    let drawing = JsonReader::from_json_str(&office_drawing().to_string())
        .unwrap()
        .read()
        .unwrap();
    let mut selections = dxf_semantics::Selections::new();
    selections.insert("basic-text-layer", ["A-TEXT"]);
    let report = SemanticBuilder::default().build(&drawing, &selections).unwrap();

    let text = JsonWriter::new(&report.objects).to_json_string().unwrap();
    let output: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(output.as_array().map(Vec::len), Some(1));
    let record = &output[0];
    assert_eq!(record["kind"], "text");
    assert_eq!(record["properties"]["type"], "TEXT");
    assert_eq!(record["properties"]["handle"], "20");
    assert_eq!(record["properties"]["layer"], "A-TEXT");
    assert_eq!(record["geom_wkt"], "POINT(2500 2000)");
}

#[test]
fn test_output_bytes_are_stable() {
    let render = || {
        let drawing = JsonReader::from_json_str(&office_drawing().to_string())
            .unwrap()
            .read()
            .unwrap();
        let mut selections = dxf_semantics::Selections::new();
        selections.insert("non-wall-layer", ["A-WALL"]);
        let report = SemanticBuilder::default().build(&drawing, &selections).unwrap();
        let mut out = Vec::new();
        JsonWriter::new_pretty(&report.objects)
            .write_to_writer(&mut out)
            .unwrap();
        out
    };
    assert_eq!(render(), render());
}
