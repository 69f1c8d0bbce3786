//! Caller layer/block selections and the detectors they enable

use super::tables::keys;
use ahash::AHashSet;
use bitflags::bitflags;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered map of selection key to the names the caller picked
///
/// Keys keep the caller's order, which is also the order of the derived
/// rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selections {
    entries: IndexMap<String, Vec<String>>,
}

impl Selections {
    /// Create an empty selection map
    pub fn new() -> Self {
        Selections {
            entries: IndexMap::new(),
        }
    }

    /// Set the names for a key, replacing any previous value
    pub fn insert<I, S>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(key.into(), values.into_iter().map(Into::into).collect());
    }

    /// Names selected for a key (empty when absent)
    pub fn get(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First non-empty name selected for a key
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .iter()
            .map(String::as_str)
            .find(|v| !v.is_empty())
    }

    /// Uppercased name set for a key
    pub fn layer_set(&self, key: &str) -> LayerSet {
        LayerSet::new(self.get(key))
    }

    /// Iterate over entries in caller order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was selected
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Detectors that have the selections they need
    pub fn detectors(&self) -> DetectorSet {
        let has = |key: &str| self.first(key).is_some();
        let mut set = DetectorSet::empty();
        set.set(DetectorSet::BORDER, has(keys::BORDER_BLOCK));
        set.set(DetectorSet::AXIS, has(keys::AXIS_LAYER));
        set.set(DetectorSet::COLUMN, has(keys::CONCRETE_COLUMN_LAYER));
        let walls = has(keys::STRUCTURAL_WALL_LAYER) || has(keys::WALL_LAYER);
        set.set(DetectorSet::WALL, walls);
        set.set(DetectorSet::ROOM, walls);
        set.set(DetectorSet::DOOR, has(keys::DOOR_LAYER));
        set
    }
}

/// Case-insensitive set of layer (or block) names
#[derive(Debug, Clone, Default)]
pub struct LayerSet {
    names: AHashSet<String>,
}

impl LayerSet {
    /// Build from names; empty names are dropped
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        LayerSet {
            names: names
                .iter()
                .map(|n| n.as_ref().to_uppercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// Check membership, ignoring case
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_uppercase())
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

bitflags! {
    /// Specialized detectors enabled by a selection map
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DetectorSet: u8 {
        const BORDER = 1 << 0;
        const AXIS = 1 << 1;
        const COLUMN = 1 << 2;
        const WALL = 1 << 3;
        const ROOM = 1 << 4;
        const DOOR = 1 << 5;
    }
}
