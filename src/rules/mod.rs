//! Rule-based classification of single entities
//!
//! A [`Rule`] maps entities to a [`SemanticKind`] by looking at one field
//! (layer, type or block name), compared uppercase. Rules are evaluated in
//! order and the first match wins.
//!
//! Rule sets come from two static tables handed to a [`RuleEngine`]: the
//! default contains-mode rules, and the selection table that turns caller
//! selections into exact-mode rules.

pub mod selections;
pub mod tables;

pub use selections::{DetectorSet, LayerSet, Selections};
pub use tables::{SelectionTable, DEFAULT_RULES, SELECTION_TABLE};

use crate::entities::EntityType;
use crate::error::{Result, SemanticError};
use crate::notification::{NotificationCollection, NotificationType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every kind of semantic object the engine can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticKind {
    Border,
    Dimension,
    Symbol,
    Text,
    Axis,
    Column,
    SteelColumn,
    Concrete,
    Wall,
    Door,
    Window,
    Stair,
    Elevator,
    Furniture,
    Finish,
    Block,
    AxisSummary,
    ConcreteColumn,
    StructuralWall,
    PartitionWall,
    Room,
    RoomConnectivity,
}

impl SemanticKind {
    /// Stable snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticKind::Border => "border",
            SemanticKind::Dimension => "dimension",
            SemanticKind::Symbol => "symbol",
            SemanticKind::Text => "text",
            SemanticKind::Axis => "axis",
            SemanticKind::Column => "column",
            SemanticKind::SteelColumn => "steel_column",
            SemanticKind::Concrete => "concrete",
            SemanticKind::Wall => "wall",
            SemanticKind::Door => "door",
            SemanticKind::Window => "window",
            SemanticKind::Stair => "stair",
            SemanticKind::Elevator => "elevator",
            SemanticKind::Furniture => "furniture",
            SemanticKind::Finish => "finish",
            SemanticKind::Block => "block",
            SemanticKind::AxisSummary => "axis_summary",
            SemanticKind::ConcreteColumn => "concrete_column",
            SemanticKind::StructuralWall => "structural_wall",
            SemanticKind::PartitionWall => "partition_wall",
            SemanticKind::Room => "room",
            SemanticKind::RoomConnectivity => "room_connectivity",
        }
    }
}

impl fmt::Display for SemanticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity field a rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// Layer name
    Layer,
    /// Entity type name (e.g. `LINE`)
    Type,
    /// Referenced block name (block references only)
    Block,
}

impl MatchSource {
    fn prefix(&self) -> &'static str {
        match self {
            MatchSource::Layer => "layer",
            MatchSource::Type => "type",
            MatchSource::Block => "block",
        }
    }
}

/// How rule keys are compared with the inspected field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Field contains any key as a substring
    Contains,
    /// Field equals one of the keys
    Exact,
}

/// A single classification rule
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Kind assigned on match
    pub kind: SemanticKind,
    /// Uppercase match keys
    pub keys: Vec<String>,
    /// Inspected field
    pub source: MatchSource,
    /// Comparison mode
    pub mode: MatchMode,
}

/// Result of a successful match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Matched kind
    pub kind: SemanticKind,
    /// Provenance such as `layer:A-WALL`
    pub provenance: String,
}

impl Rule {
    /// Create a rule; keys are uppercased
    pub fn new<I, S>(kind: SemanticKind, keys: I, source: MatchSource, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Rule {
            kind,
            keys: keys.into_iter().map(|k| k.as_ref().to_uppercase()).collect(),
            source,
            mode,
        }
    }

    /// Match one entity against this rule
    pub fn matches(&self, entity: &EntityType) -> Option<RuleMatch> {
        let value = match self.source {
            MatchSource::Layer => entity.layer().to_uppercase(),
            MatchSource::Type => entity.entity_type().to_uppercase(),
            MatchSource::Block => entity.block_name().unwrap_or_default().to_uppercase(),
        };
        let hit = match self.mode {
            MatchMode::Exact => self.keys.iter().any(|k| *k == value),
            MatchMode::Contains => self.keys.iter().any(|k| value.contains(k.as_str())),
        };
        hit.then(|| RuleMatch {
            kind: self.kind,
            provenance: format!("{}:{}", self.source.prefix(), value),
        })
    }
}

/// An ordered, immutable list of rules
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create a rule set
    pub fn new(rules: Vec<Rule>) -> Self {
        RuleSet { rules }
    }

    /// First matching rule wins
    pub fn match_entity(&self, entity: &EntityType) -> Option<RuleMatch> {
        self.rules.iter().find_map(|rule| rule.matches(entity))
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builds rule sets from static rule tables
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'a> {
    default_rules: &'a [Rule],
    selection_table: &'a SelectionTable,
}

impl<'a> RuleEngine<'a> {
    /// Create an engine over explicit tables
    pub fn new(default_rules: &'a [Rule], selection_table: &'a SelectionTable) -> Self {
        RuleEngine {
            default_rules,
            selection_table,
        }
    }

    /// Default rules, in order
    pub fn default_rules(&self) -> RuleSet {
        RuleSet::new(self.default_rules.to_vec())
    }

    /// One exact-mode rule per usable selection entry, in selection order
    ///
    /// Entries without non-empty values are skipped. Unknown keys fail in
    /// strict mode; otherwise they are dropped with a warning.
    pub fn rules_from_selections(
        &self,
        selections: &Selections,
        strict: bool,
        notifications: &mut NotificationCollection,
    ) -> Result<Vec<Rule>> {
        let mut rules = Vec::new();
        for (key, values) in selections.iter() {
            let Some(&(kind, source)) = self.selection_table.get(key.as_str()) else {
                if strict {
                    return Err(SemanticError::UnknownSelectionKey(key.clone()));
                }
                notifications.notify(
                    NotificationType::Warning,
                    format!("ignoring unknown selection key {:?}", key),
                );
                continue;
            };
            let keys: Vec<&String> = values.iter().filter(|v| !v.is_empty()).collect();
            if keys.is_empty() {
                continue;
            }
            rules.push(Rule::new(kind, keys, source, MatchMode::Exact));
        }
        Ok(rules)
    }

    /// Selection rules, or the defaults when the selections yield none
    pub fn rule_set(
        &self,
        selections: &Selections,
        strict: bool,
        notifications: &mut NotificationCollection,
    ) -> Result<RuleSet> {
        let rules = self.rules_from_selections(selections, strict, notifications)?;
        if rules.is_empty() {
            Ok(self.default_rules())
        } else {
            Ok(RuleSet::new(rules))
        }
    }
}

impl Default for RuleEngine<'static> {
    fn default() -> Self {
        RuleEngine::new(&DEFAULT_RULES, &SELECTION_TABLE)
    }
}
