//! Build orchestration
//!
//! One build runs the rule pass over every entity and then the detectors in
//! dependency order:
//!
//! ```text
//! rules ─┐
//! border ─┬─ axis ── column
//!         └─ wall ── room ── door
//! ```
//!
//! Output order is fixed: rule records, borders, axis summaries, columns,
//! walls, rooms, doors, connectivity.

use crate::config::EngineConfig;
use crate::detectors::{
    detect_axes, detect_borders, detect_columns, detect_doors, detect_rooms, detect_walls,
};
use crate::document::{Drawing, DrawingStatistics};
use crate::error::Result;
use crate::notification::NotificationCollection;
use crate::rules::{DetectorSet, RuleEngine, Selections};
use crate::semantic::{basic_object, SemanticObject};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, info_span};

/// Everything one build produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    /// Semantic objects in output order
    pub objects: Vec<SemanticObject>,
    /// Degradations noticed while reading and building
    pub notifications: NotificationCollection,
    /// Input summary
    pub statistics: DrawingStatistics,
}

/// Runs the rule pass and the detectors over drawings
///
/// The builder holds only configuration and static rule tables, so one
/// instance can serve many threads.
#[derive(Debug, Clone)]
pub struct SemanticBuilder {
    config: EngineConfig,
    engine: RuleEngine<'static>,
}

impl Default for SemanticBuilder {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl SemanticBuilder {
    /// Create a builder over the built-in rule tables
    pub fn new(config: EngineConfig) -> Self {
        SemanticBuilder {
            config,
            engine: RuleEngine::default(),
        }
    }

    /// Create a builder over caller-supplied rule tables
    pub fn with_engine(config: EngineConfig, engine: RuleEngine<'static>) -> Self {
        SemanticBuilder { config, engine }
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the semantic objects of one drawing
    ///
    /// Fails only on an unknown selection key in strict mode.
    pub fn build(&self, drawing: &Drawing, selections: &Selections) -> Result<BuildReport> {
        let span = info_span!("build", entities = drawing.entity_count());
        let _guard = span.enter();

        let mut notifications = drawing.notifications.clone();
        let rules = self
            .engine
            .rule_set(selections, self.config.selections.strict, &mut notifications)?;

        let entities = drawing.entities();
        let basic: Vec<SemanticObject> = entities
            .iter()
            .filter_map(|entity| rules.match_entity(entity).map(|m| basic_object(entity, m)))
            .collect();
        debug!(rules = rules.len(), matched = basic.len(), "rule pass done");

        let enabled = selections.detectors();
        debug!(detectors = ?enabled, "running detectors");

        let borders = if enabled.contains(DetectorSet::BORDER) {
            detect_borders(drawing, selections)
        } else {
            Vec::new()
        };
        let axes = if enabled.contains(DetectorSet::AXIS) {
            detect_axes(entities, &borders, selections, &self.config.axis)
        } else {
            Vec::new()
        };
        let walls = if enabled.contains(DetectorSet::WALL) {
            detect_walls(entities, &borders, selections, &self.config.wall)
        } else {
            Vec::new()
        };
        let columns = if enabled.contains(DetectorSet::COLUMN) {
            detect_columns(entities, &axes, selections, &self.config.column)
        } else {
            Vec::new()
        };
        let rooms = if enabled.contains(DetectorSet::ROOM) {
            detect_rooms(&walls, entities, &self.config.room, &mut notifications)
        } else {
            Vec::new()
        };
        let doors = if enabled.contains(DetectorSet::DOOR) {
            detect_doors(entities, &walls, &rooms, selections, &self.config.door)
        } else {
            Default::default()
        };

        let mut objects = basic;
        objects.extend(borders.iter().map(|b| b.to_object()));
        objects.extend(axes.iter().map(|a| a.to_object()));
        objects.extend(columns.iter().map(|c| c.to_object()));
        objects.extend(walls.iter().map(|w| w.to_object()));
        objects.extend(rooms.iter().map(|r| r.to_object()));
        objects.extend(doors.doors.iter().map(|d| d.to_object()));
        objects.extend(doors.connectivity.iter().map(|c| c.to_object()));

        info!(
            objects = objects.len(),
            borders = borders.len(),
            walls = walls.len(),
            rooms = rooms.len(),
            doors = doors.doors.len(),
            "build complete"
        );

        Ok(BuildReport {
            objects,
            notifications,
            statistics: drawing.statistics(),
        })
    }

    /// Build many drawings in parallel; results keep the input order
    pub fn build_batch(&self, jobs: &[(Drawing, Selections)]) -> Vec<Result<BuildReport>> {
        jobs.par_iter()
            .map(|(drawing, selections)| self.build(drawing, selections))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityType, Line};
    use crate::error::SemanticError;
    use crate::notification::NotificationType;
    use crate::rules::SemanticKind;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_builder_is_send_sync() {
        assert_send_sync::<SemanticBuilder>();
    }

    fn drawing() -> Drawing {
        Drawing::from_entities(vec![
            EntityType::from(Line::from_coords(0.0, 0.0, 1000.0, 0.0)).on_layer("A-WALL"),
            EntityType::from(Line::from_coords(0.0, 200.0, 1000.0, 200.0)).on_layer("A-WALL"),
            EntityType::from(Line::from_coords(0.0, 0.0, 1.0, 1.0)).on_layer("MISC"),
        ])
    }

    #[test]
    fn test_default_rules_when_no_selections() {
        let report = SemanticBuilder::default().build(&drawing(), &Selections::new()).unwrap();
        let kinds: Vec<SemanticKind> = report.objects.iter().map(|o| o.kind).collect();
        assert_eq!(kinds, vec![SemanticKind::Wall, SemanticKind::Wall]);
        assert_eq!(report.statistics.entity_count, 3);
    }

    #[test]
    fn test_selections_drive_rules_and_detectors() {
        let mut selections = Selections::new();
        selections.insert("non-wall-layer", ["A-WALL"]);
        let report = SemanticBuilder::default().build(&drawing(), &selections).unwrap();
        let kinds: Vec<SemanticKind> = report.objects.iter().map(|o| o.kind).collect();
        assert_eq!(
            kinds,
            vec![SemanticKind::Wall, SemanticKind::Wall, SemanticKind::PartitionWall]
        );
    }

    #[test]
    fn test_unknown_key_strict_and_lenient() {
        let mut selections = Selections::new();
        selections.insert("struct-beam-layer", ["B"]);
        let strict = SemanticBuilder::default().build(&drawing(), &selections);
        assert!(matches!(strict, Err(SemanticError::UnknownSelectionKey(_))));

        let mut config = EngineConfig::default();
        config.selections.strict = false;
        let report = SemanticBuilder::new(config).build(&drawing(), &selections).unwrap();
        assert!(report.notifications.has_type(NotificationType::Warning));
        // falls back to the default rules
        assert_eq!(report.objects.len(), 2);
    }

    #[test]
    fn test_batch_keeps_order() {
        let mut selections = Selections::new();
        selections.insert("non-wall-layer", ["A-WALL"]);
        let jobs = vec![
            (drawing(), selections.clone()),
            (Drawing::new(), selections.clone()),
            (drawing(), Selections::new()),
        ];
        let reports = SemanticBuilder::default().build_batch(&jobs);
        let counts: Vec<usize> = reports.iter().map(|r| r.as_ref().unwrap().objects.len()).collect();
        assert_eq!(counts, vec![3, 0, 2]);
    }
}
