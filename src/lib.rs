//! # dxf-semantics
//!
//! Derive architectural semantics from parsed CAD drawings.
//!
//! A decoded drawing (entities, layers and blocks, read from the JSON a DXF
//! parser produces) goes through a layer/block rule pass and a chain of
//! detectors. The result is a flat, ordered list of [`SemanticObject`]s: drawing
//! borders, structural grid axes, columns, wall centerlines, enclosed rooms,
//! doors and room connectivity, each carrying WKT geometry and provenance.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dxf_semantics::{io::{JsonReader, JsonWriter}, SemanticBuilder, Selections};
//!
//! let drawing = JsonReader::from_file("plan.json")?.read()?;
//!
//! let mut selections = Selections::new();
//! selections.insert("struct-cwall-layer", ["S-WALL"]);
//! selections.insert("non-door-layer", ["A-DOOR"]);
//!
//! let report = SemanticBuilder::default().build(&drawing, &selections)?;
//! JsonWriter::new(&report.objects).write_to_file("plan.semantic.json")?;
//! # Ok::<(), dxf_semantics::SemanticError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`rules`] - selection maps, rule tables and the rule engine
//! - [`geometry`] - segments, polygons, shape extraction and WKT
//! - [`detectors`] - border, axis, column, wall, room and door detection
//! - [`builder`] - orchestration, output ordering and parallel batches
//! - [`io`] - JSON drawing reader and semantic object writer
//!
//! Builds are deterministic: the same drawing and selections always give
//! byte-identical output.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod builder;
pub mod config;
pub mod detectors;
pub mod document;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod io;
pub mod notification;
pub mod rules;
pub mod semantic;
pub mod tables;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SemanticError};
pub use types::{BoundingBox2D, Handle, InsertTransform, Vector2};

// Re-export entity types
pub use entities::{
    Arc, Circle, Entity, EntityType, Insert, Line, LwPolyline, MText, Text, UnknownEntity,
};

// Re-export table types
pub use tables::{BlockRecord, Layer, Table, TableEntry};

// Re-export document and build surface
pub use builder::{BuildReport, SemanticBuilder};
pub use config::EngineConfig;
pub use document::Drawing;
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use rules::{RuleEngine, Selections, SemanticKind};
pub use semantic::SemanticObject;

// Re-export I/O types
pub use io::{JsonReader, JsonWriter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
