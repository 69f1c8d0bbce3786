//! Concrete column detection at grid intersections

use super::AxisSummary;
use crate::entities::EntityType;
use crate::geometry::{center_and_size, match_intersection, wkt, ShapeSize};
use crate::rules::tables::keys;
use crate::rules::{Selections, SemanticKind};
use crate::semantic::{Properties, SemanticObject};
use crate::types::{Handle, Vector2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Column detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Maximum per-axis offset between a column center and a grid
    /// intersection (drawing units, default 150)
    pub tolerance: f64,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self { tolerance: 150.0 }
    }
}

/// A column sitting on a grid intersection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Border the grid belongs to
    pub border_index: usize,
    /// Handle of the outline entity
    pub handle: Handle,
    /// Section center
    pub center: Vector2,
    /// Section size
    pub size: ShapeSize,
    /// Type label shared by columns of equal size (`C1`, `C2`, ...)
    pub column_type: String,
}

impl Column {
    /// Output record
    pub fn to_object(&self) -> SemanticObject {
        SemanticObject::new(
            SemanticKind::ConcreteColumn,
            format!("layer:{}", keys::CONCRETE_COLUMN_LAYER),
            Properties::Column(self.clone()),
        )
        .with_geometry(Some(wkt::point(self.center)))
    }
}

/// Grouping key for type labels, in hundredths of a unit
///
/// Circles order before rectangles; rectangles are keyed (major, minor)
/// so a rotated section shares its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SizeKey {
    Circle(i64),
    Rect(i64, i64),
}

impl SizeKey {
    fn of(size: &ShapeSize) -> Self {
        let cents = |v: f64| (v * 100.0).round() as i64;
        match *size {
            ShapeSize::Circle { radius, .. } => SizeKey::Circle(cents(radius)),
            ShapeSize::Rect { width, height } => {
                SizeKey::Rect(cents(width.max(height)), cents(width.min(height)))
            }
        }
    }
}

/// Find column outlines that sit on a grid intersection of some border
///
/// Labels are assigned over all borders at once, in ascending size order.
pub fn detect_columns(
    entities: &[EntityType],
    summaries: &[AxisSummary],
    selections: &Selections,
    config: &ColumnConfig,
) -> Vec<Column> {
    let layers = selections.layer_set(keys::CONCRETE_COLUMN_LAYER);
    if layers.is_empty() {
        return Vec::new();
    }

    let mut found: Vec<(usize, &Handle, Vector2, ShapeSize)> = Vec::new();
    for summary in summaries.iter().filter(|s| !s.intersections.is_empty()) {
        for entity in entities {
            if !layers.contains(entity.layer()) {
                continue;
            }
            let Some((center, size)) = center_and_size(entity) else {
                continue;
            };
            if !summary.bbox.contains(center) {
                continue;
            }
            if !match_intersection(center, &summary.intersections, config.tolerance) {
                continue;
            }
            found.push((summary.border_index, entity.handle(), center, size));
        }
    }

    let mut labels: BTreeMap<SizeKey, String> = found
        .iter()
        .map(|(_, _, _, size)| (SizeKey::of(size), String::new()))
        .collect();
    for (i, label) in labels.values_mut().enumerate() {
        *label = format!("C{}", i + 1);
    }

    debug!(columns = found.len(), types = labels.len(), "columns detected");

    found
        .into_iter()
        .map(|(border_index, handle, center, size)| Column {
            border_index,
            handle: handle.clone(),
            center,
            column_type: labels[&SizeKey::of(&size)].clone(),
            size,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Circle, LwPolyline};
    use crate::types::BoundingBox2D;

    fn summary() -> AxisSummary {
        AxisSummary {
            border_index: 1,
            border_handle: Handle::new("B1"),
            x_axes: Vec::new(),
            y_axes: Vec::new(),
            x_spacing: Vec::new(),
            y_spacing: Vec::new(),
            bbox: BoundingBox2D::from_extents(-1000.0, -1000.0, 20000.0, 20000.0),
            intersections: vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(7000.0, 0.0),
                Vector2::new(14000.0, 0.0),
            ],
        }
    }

    fn selections() -> Selections {
        let mut s = Selections::new();
        s.insert(keys::CONCRETE_COLUMN_LAYER, ["S-COL"]);
        s
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> EntityType {
        EntityType::from(LwPolyline::rectangle(Vector2::new(x, y), w, h)).on_layer("S-COL")
    }

    #[test]
    fn test_equal_sizes_share_a_label() {
        let entities = vec![
            rect(0.0, 0.0, 600.0, 600.0),
            rect(7000.0, 0.0, 600.0, 600.0),
            rect(14000.0, 0.0, 400.0, 400.0),
        ];
        let columns = detect_columns(&entities, &[summary()], &selections(), &ColumnConfig::default());
        let labels: Vec<&str> = columns.iter().map(|c| c.column_type.as_str()).collect();
        assert_eq!(labels, vec!["C2", "C2", "C1"]);
    }

    #[test]
    fn test_circles_order_before_rectangles() {
        let entities = vec![
            rect(0.0, 0.0, 300.0, 300.0),
            EntityType::from(Circle::from_coords(7000.0, 0.0, 400.0)).on_layer("S-COL"),
        ];
        let columns = detect_columns(&entities, &[summary()], &selections(), &ColumnConfig::default());
        assert_eq!(columns[0].column_type, "C2");
        assert_eq!(columns[1].column_type, "C1");
        assert_eq!(columns[1].to_object().geom_wkt.as_deref(), Some("POINT(7000 0)"));
    }

    #[test]
    fn test_rotated_rectangles_share_a_label() {
        let entities = vec![rect(0.0, 0.0, 600.0, 400.0), rect(7000.0, 0.0, 400.0, 600.0)];
        let columns = detect_columns(&entities, &[summary()], &selections(), &ColumnConfig::default());
        assert_eq!(columns[0].column_type, columns[1].column_type);
    }

    #[test]
    fn test_off_grid_and_off_layer_are_ignored() {
        let entities = vec![
            rect(3500.0, 0.0, 600.0, 600.0),
            rect(7150.0, -150.0, 600.0, 600.0),
            EntityType::from(LwPolyline::rectangle(Vector2::ZERO, 600.0, 600.0)).on_layer("A-WALL"),
        ];
        let columns = detect_columns(&entities, &[summary()], &selections(), &ColumnConfig::default());
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].center, Vector2::new(7150.0, -150.0));
    }

    #[test]
    fn test_empty_intersections_or_selection() {
        let mut bare = summary();
        bare.intersections.clear();
        let entities = vec![rect(0.0, 0.0, 600.0, 600.0)];
        let cfg = ColumnConfig::default();
        assert!(detect_columns(&entities, &[bare], &selections(), &cfg).is_empty());
        assert!(detect_columns(&entities, &[summary()], &Selections::new(), &cfg).is_empty());
    }
}
