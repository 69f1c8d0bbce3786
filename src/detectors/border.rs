//! Title-block border detection
//!
//! The caller names the border block. Its definition gives a local bounding
//! box; every reference to it is placed in world space through the insert
//! transform (scale, rotation in degrees, translation) and the envelope of
//! the four transformed corners becomes the border extent.

use crate::document::Drawing;
use crate::entities::EntityType;
use crate::geometry::wkt;
use crate::rules::tables::keys;
use crate::rules::{Selections, SemanticKind};
use crate::semantic::{Properties, SemanticObject};
use crate::types::{BoundingBox2D, Handle};
use serde::Serialize;
use tracing::debug;

/// One placed title block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Border {
    /// Block name as defined in the block library
    pub block_name: String,
    /// Handle of the block reference
    pub insert_handle: Handle,
    /// Extent of the block definition
    pub bbox_local: BoundingBox2D,
    /// Extent in world coordinates
    pub bbox_world: BoundingBox2D,
}

impl Border {
    /// Output record
    pub fn to_object(&self) -> SemanticObject {
        SemanticObject::new(
            SemanticKind::Border,
            format!("block:{}", self.block_name),
            Properties::Border(self.clone()),
        )
        .with_geometry(Some(wkt::bbox_polygon(&self.bbox_world)))
    }
}

/// Find every reference to the selected border block
///
/// Returns nothing when no block is selected, the block is not defined, it
/// has no line/polyline vertices, or its local extent has zero area.
pub fn detect_borders(drawing: &Drawing, selections: &Selections) -> Vec<Border> {
    let Some(selected) = selections.first(keys::BORDER_BLOCK) else {
        return Vec::new();
    };
    let Some(block) = drawing.block(selected) else {
        debug!(block = selected, "border block not defined");
        return Vec::new();
    };
    let Some(local) = block.local_bounds() else {
        debug!(block = selected, "border block has no outline");
        return Vec::new();
    };
    if local.area() <= 0.0 {
        debug!(block = selected, "border block outline is degenerate");
        return Vec::new();
    }

    let wanted = selected.to_uppercase();
    let borders: Vec<Border> = drawing
        .entities()
        .iter()
        .filter_map(|entity| match entity {
            EntityType::Insert(insert) if insert.block_name.to_uppercase() == wanted => {
                Some(Border {
                    block_name: block.name.clone(),
                    insert_handle: insert.common.handle.clone(),
                    bbox_local: local,
                    bbox_world: insert.transform().apply_bbox(&local),
                })
            }
            _ => None,
        })
        .collect();

    debug!(block = %block.name, count = borders.len(), "borders detected");
    borders
}
