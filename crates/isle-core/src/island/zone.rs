//! Zone definitions
//!
//! [`ZoneDef`]/[`IslandDef`] are the raw, name-addressed form an island is
//! written in (static tables or JSON). [`Zone`] is the resolved form held by
//! a validated [`ZoneGraph`](super::ZoneGraph).

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ZoneError;

/// Index of a zone inside its [`ZoneGraph`](super::ZoneGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(pub u16);

impl ZoneId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A zone as authored, before names are resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDef {
    pub name: String,
    pub description: String,
    /// Zones reachable in one move, in menu order
    #[serde(default)]
    pub connections: Vec<String>,
    /// Coins found by looting; one entry is drawn uniformly
    pub loot_table: Vec<u32>,
    /// Probability of hidden treasure per loot action
    #[serde(default)]
    pub hidden_treasure: f64,
    /// Bonus drawn when hidden treasure turns up
    #[serde(default)]
    pub treasure_loot: Vec<u32>,
}

/// A whole island: its zones plus the start and exit designations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IslandDef {
    pub start: String,
    pub exit: String,
    pub zones: Vec<ZoneDef>,
}

impl IslandDef {
    /// Parse an island from JSON.
    pub fn from_json(json: &str) -> Result<Self, ZoneError> {
        serde_json::from_str(json).map_err(|e| ZoneError::Parse(e.to_string()))
    }

    /// Read and parse an island file.
    pub fn load(path: &Path) -> Result<Self, ZoneError> {
        let json = std::fs::read_to_string(path).map_err(|e| ZoneError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ZoneError> {
        serde_json::to_string_pretty(self).map_err(|e| ZoneError::Parse(e.to_string()))
    }
}

/// A resolved zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub description: String,
    pub connections: Vec<ZoneId>,
    pub loot_table: Vec<u32>,
    pub hidden_treasure: f64,
    pub treasure_loot: Vec<u32>,
}

impl Zone {
    /// Whether a single move leads from this zone to `other`
    pub fn connects_to(&self, other: ZoneId) -> bool {
        self.connections.contains(&other)
    }

    /// Whether looting here can ever turn up hidden treasure
    pub fn has_hidden_treasure(&self) -> bool {
        self.hidden_treasure > 0.0 && !self.treasure_loot.is_empty()
    }
}
