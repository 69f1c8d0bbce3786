//! Static rule tables

use super::{MatchMode, MatchSource, Rule, SemanticKind};
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Selection key → (kind, field) mapping
pub type SelectionTable = IndexMap<&'static str, (SemanticKind, MatchSource)>;

/// Selection keys understood by the detectors
pub mod keys {
    pub const BORDER_BLOCK: &str = "basic-border-block";
    pub const DIM_LAYER: &str = "basic-dim-layer";
    pub const SYMBOL_LAYER: &str = "basic-symbol-layer";
    pub const TEXT_LAYER: &str = "basic-text-layer";
    pub const AXIS_LAYER: &str = "struct-axis-layer";
    pub const CONCRETE_COLUMN_LAYER: &str = "struct-ccol-layer";
    pub const STEEL_COLUMN_LAYER: &str = "struct-scol-layer";
    pub const STRUCTURAL_WALL_LAYER: &str = "struct-cwall-layer";
    pub const WALL_LAYER: &str = "non-wall-layer";
    pub const DOOR_LAYER: &str = "non-door-layer";
    pub const WINDOW_LAYER: &str = "non-window-layer";
    pub const STAIR_LAYER: &str = "non-stair-layer";
    pub const ELEVATOR_LAYER: &str = "non-elevator-layer";
    pub const FURNITURE_LAYER: &str = "non-furniture-layer";
    pub const FINISH_LAYER: &str = "non-finish-layer";
}

/// Default contains-mode rules, evaluated in this order
pub static DEFAULT_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    use SemanticKind::*;
    let layer = |kind, keys: &[&str]| Rule::new(kind, keys, MatchSource::Layer, MatchMode::Contains);
    vec![
        layer(Border, &["BORD", "TITLE", "FORM"]),
        layer(Dimension, &["DIM"]),
        layer(Symbol, &["SYM"]),
        layer(Text, &["TXT", "TEXT"]),
        layer(Axis, &["AXIS", "GRID"]),
        layer(Column, &["COL"]),
        layer(SteelColumn, &["STL"]),
        layer(Concrete, &["CON"]),
        layer(Wall, &["WAL"]),
        layer(Door, &["DOOR"]),
        layer(Window, &["WIN"]),
        layer(Stair, &["STR"]),
        layer(Elevator, &["ELV"]),
        layer(Furniture, &["FURN"]),
        layer(Finish, &["FIN"]),
        Rule::new(Block, ["BLOCK"], MatchSource::Type, MatchMode::Contains),
    ]
});

/// Fixed selection table
pub static SELECTION_TABLE: Lazy<SelectionTable> = Lazy::new(|| {
    use MatchSource::{Block, Layer};
    use SemanticKind::*;
    IndexMap::from([
        (keys::BORDER_BLOCK, (Border, Block)),
        (keys::DIM_LAYER, (Dimension, Layer)),
        (keys::SYMBOL_LAYER, (Symbol, Layer)),
        (keys::TEXT_LAYER, (Text, Layer)),
        (keys::AXIS_LAYER, (Axis, Layer)),
        (keys::CONCRETE_COLUMN_LAYER, (Column, Layer)),
        (keys::STEEL_COLUMN_LAYER, (SteelColumn, Layer)),
        (keys::STRUCTURAL_WALL_LAYER, (Concrete, Layer)),
        (keys::WALL_LAYER, (Wall, Layer)),
        (keys::DOOR_LAYER, (Door, Layer)),
        (keys::WINDOW_LAYER, (Window, Layer)),
        (keys::STAIR_LAYER, (Stair, Layer)),
        (keys::ELEVATOR_LAYER, (Elevator, Layer)),
        (keys::FURNITURE_LAYER, (Furniture, Layer)),
        (keys::FINISH_LAYER, (Finish, Layer)),
    ])
});
