//! Specialized detectors
//!
//! Each detector turns entities (and the records of the detectors before it)
//! into typed records. Detectors never fail: missing selections or inputs
//! give an empty result. Records become [`SemanticObject`]s through their
//! `to_object` method.
//!
//! Data flows border → axis → column, and wall → room → door.
//!
//! [`SemanticObject`]: crate::semantic::SemanticObject

pub mod axis;
pub mod border;
pub mod column;
pub mod door;
pub mod room;
pub mod wall;

pub use axis::{detect_axes, AxisConfig, AxisLine, AxisSummary};
pub use border::{detect_borders, Border};
pub use column::{detect_columns, Column, ColumnConfig};
pub use door::{
    detect_doors, ConnectivityEdge, Door, DoorAnalysis, DoorConfig, DoorWall, RoomConnectivity,
};
pub use room::{detect_rooms, Room, RoomConfig};
pub use wall::{detect_walls, Wall, WallConfig, WallType};
