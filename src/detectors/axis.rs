//! Structural grid axis detection
//!
//! Axis lines are straight, axis-aligned lines on the selected axis layers.
//! Per border, vertical lines form the `Y` axes (keyed by x) and horizontal
//! lines the `X` axes (keyed by y), following grid notation rather than the
//! line's own direction. Lines within the merge tolerance of each other are
//! the same axis drawn twice and collapse into one.

use super::Border;
use crate::entities::EntityType;
use crate::geometry::{axis_orientation, entity_points, wkt, AxisOrientation, AXIS_EPSILON};
use crate::rules::tables::keys;
use crate::rules::{Selections, SemanticKind};
use crate::semantic::{Properties, SemanticObject};
use crate::types::{BoundingBox2D, Handle, Vector2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Axis detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Maximum coordinate difference for two lines to count as one axis
    /// (drawing units, default 1.0)
    pub merge_tolerance: f64,
    /// Coordinate spread under which a line is axis-aligned (default 1e-6)
    pub orientation_epsilon: f64,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            merge_tolerance: 1.0,
            orientation_epsilon: AXIS_EPSILON,
        }
    }
}

/// One labeled grid line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLine {
    /// Grid label (`X1`, `Y3`, ...)
    pub label: String,
    /// Layer of the first contributing line
    pub layer: String,
    /// Handle of the first contributing line
    pub handle: Handle,
    /// Coordinate across the axis (x for vertical, y for horizontal)
    pub coord: f64,
    /// Handles of further lines merged into this axis
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub merged_handles: Vec<Handle>,
}

/// Grid of one border
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSummary {
    /// 1-based index of the border
    pub border_index: usize,
    /// Handle of the border's block reference
    pub border_handle: Handle,
    /// Horizontal axes, ascending y
    pub x_axes: Vec<AxisLine>,
    /// Vertical axes, ascending x
    pub y_axes: Vec<AxisLine>,
    /// Distances between consecutive horizontal axes
    pub x_spacing: Vec<f64>,
    /// Distances between consecutive vertical axes
    pub y_spacing: Vec<f64>,
    /// Border extent
    pub bbox: BoundingBox2D,
    /// Every vertical × horizontal crossing, vertical axes outermost
    pub intersections: Vec<Vector2>,
}

impl AxisSummary {
    /// Output record
    pub fn to_object(&self) -> SemanticObject {
        let geometry = if self.intersections.is_empty() {
            wkt::bbox_polygon(&self.bbox)
        } else {
            wkt::multipoint(&self.intersections).unwrap_or_else(|_| wkt::bbox_polygon(&self.bbox))
        };
        SemanticObject::new(
            SemanticKind::AxisSummary,
            format!("layer:{}", keys::AXIS_LAYER),
            Properties::AxisSummary(self.clone()),
        )
        .with_geometry(Some(geometry))
    }
}

struct AxisCandidate<'a> {
    coord: f64,
    handle: &'a Handle,
    layer: &'a str,
}

/// Detect the grid inside every border
pub fn detect_axes(
    entities: &[EntityType],
    borders: &[Border],
    selections: &Selections,
    config: &AxisConfig,
) -> Vec<AxisSummary> {
    let layers = selections.layer_set(keys::AXIS_LAYER);
    if layers.is_empty() {
        return Vec::new();
    }

    let mut summaries = Vec::with_capacity(borders.len());
    for (index, border) in borders.iter().enumerate() {
        let bbox = border.bbox_world;
        let mut horizontal = Vec::new();
        let mut vertical = Vec::new();

        for entity in entities.iter().filter(|e| e.is_linear()) {
            if !layers.contains(entity.layer()) {
                continue;
            }
            let points = entity_points(entity);
            if points.is_empty() || !bbox.contains_all(&points) {
                continue;
            }
            let candidate = |coord| AxisCandidate {
                coord,
                handle: entity.handle(),
                layer: entity.layer(),
            };
            match axis_orientation(&points, config.orientation_epsilon) {
                Some(AxisOrientation::Vertical(x)) => vertical.push(candidate(x)),
                Some(AxisOrientation::Horizontal(y)) => horizontal.push(candidate(y)),
                None => {}
            }
        }

        let x_axes = cluster_axes(horizontal, "X", config.merge_tolerance);
        let y_axes = cluster_axes(vertical, "Y", config.merge_tolerance);

        let mut intersections = Vec::with_capacity(x_axes.len() * y_axes.len());
        for v in &y_axes {
            for h in &x_axes {
                intersections.push(Vector2::new(v.coord, h.coord));
            }
        }

        debug!(
            border = index + 1,
            horizontal = x_axes.len(),
            vertical = y_axes.len(),
            "axes detected"
        );

        summaries.push(AxisSummary {
            border_index: index + 1,
            border_handle: border.insert_handle.clone(),
            x_spacing: spacing(&x_axes),
            y_spacing: spacing(&y_axes),
            x_axes,
            y_axes,
            bbox,
            intersections,
        });
    }
    summaries
}

/// Sort, merge near-equal coordinates and label
fn cluster_axes(mut candidates: Vec<AxisCandidate<'_>>, prefix: &str, tolerance: f64) -> Vec<AxisLine> {
    candidates.sort_by(|a, b| a.coord.total_cmp(&b.coord));

    let mut axes: Vec<AxisLine> = Vec::new();
    let mut i = 0;
    while i < candidates.len() {
        let first = &candidates[i];
        let mut j = i + 1;
        while j < candidates.len() && candidates[j].coord - first.coord <= tolerance {
            j += 1;
        }
        let cluster = &candidates[i..j];
        let coord = cluster.iter().map(|c| c.coord).sum::<f64>() / cluster.len() as f64;
        axes.push(AxisLine {
            label: format!("{}{}", prefix, axes.len() + 1),
            layer: first.layer.to_string(),
            handle: first.handle.clone(),
            coord,
            merged_handles: cluster[1..].iter().map(|c| c.handle.clone()).collect(),
        });
        i = j;
    }
    axes
}

fn spacing(axes: &[AxisLine]) -> Vec<f64> {
    axes.windows(2).map(|w| w[1].coord - w[0].coord).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Line;

    fn border() -> Border {
        let bbox = BoundingBox2D::from_extents(-1000.0, -1000.0, 20000.0, 20000.0);
        Border {
            block_name: "FRAME".to_string(),
            insert_handle: Handle::new("B1"),
            bbox_local: bbox,
            bbox_world: bbox,
        }
    }

    fn selections() -> Selections {
        let mut s = Selections::new();
        s.insert(keys::AXIS_LAYER, ["S-GRID"]);
        s
    }

    fn grid_line(x1: f64, y1: f64, x2: f64, y2: f64, handle: &str) -> EntityType {
        EntityType::from(Line::from_coords(x1, y1, x2, y2))
            .on_layer("S-GRID")
            .with_handle(handle)
    }

    fn sample_entities() -> Vec<EntityType> {
        vec![
            grid_line(14000.0, 0.0, 14000.0, 12000.0, "V4"),
            grid_line(0.0005, 0.0, 0.0005, 12000.0, "V2"),
            grid_line(0.0, 0.0, 0.0, 12000.0, "V1"),
            grid_line(7000.0, 0.0, 7000.0, 12000.0, "V3"),
            grid_line(0.0, 6000.0, 14000.0, 6000.0, "H2"),
            grid_line(0.0, 0.0, 14000.0, 0.0, "H1"),
            // diagonal and outside lines are ignored
            grid_line(0.0, 0.0, 100.0, 100.0, "D"),
            grid_line(50000.0, 0.0, 50000.0, 100.0, "OUT"),
        ]
    }

    #[test]
    fn test_near_duplicate_axes_merge() {
        let summaries = detect_axes(&sample_entities(), &[border()], &selections(), &AxisConfig::default());
        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];

        let labels: Vec<&str> = s.y_axes.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["Y1", "Y2", "Y3"]);
        assert_eq!(s.y_axes[0].handle.as_str(), "V1");
        assert_eq!(s.y_axes[0].merged_handles, vec![Handle::new("V2")]);
        assert!((s.y_axes[0].coord - 0.00025).abs() < 1e-12);
        assert_eq!(s.y_spacing.len(), 2);
        assert!((s.y_spacing[1] - 7000.0).abs() < 1e-9);

        let labels: Vec<&str> = s.x_axes.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["X1", "X2"]);
        assert_eq!(s.x_spacing, vec![6000.0]);
        assert_eq!(s.intersections.len(), 6);
        assert_eq!(s.intersections[1].y, 6000.0);
        assert_eq!(s.intersections[2].x, 7000.0);
    }

    #[test]
    fn test_rerun_is_identical() {
        let a = detect_axes(&sample_entities(), &[border()], &selections(), &AxisConfig::default());
        let b = detect_axes(&sample_entities(), &[border()], &selections(), &AxisConfig::default());
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a[0].to_object()).unwrap(),
            serde_json::to_string(&b[0].to_object()).unwrap()
        );
    }

    #[test]
    fn test_no_axis_layers_or_borders() {
        let cfg = AxisConfig::default();
        assert!(detect_axes(&sample_entities(), &[border()], &Selections::new(), &cfg).is_empty());
        assert!(detect_axes(&sample_entities(), &[], &selections(), &cfg).is_empty());
    }

    #[test]
    fn test_geometry_falls_back_to_bbox() {
        let only_vertical = vec![grid_line(0.0, 0.0, 0.0, 100.0, "V")];
        let s = &detect_axes(&only_vertical, &[border()], &selections(), &AxisConfig::default())[0];
        assert!(s.intersections.is_empty());
        let geom = s.to_object().geom_wkt.unwrap();
        assert!(geom.starts_with("POLYGON(("));
    }
}
