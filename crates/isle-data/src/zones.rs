//! The built-in island
//!
//! Twelve zones. Several coves and ruins are not linked from anywhere the
//! player can walk; the pirate still hides in them.

use isle_core::{IslandDef, ZoneDef, ZoneError, ZoneGraph};

pub const START_ZONE: &str = "beach";
pub const EXIT_ZONE: &str = "exit";

/// A zone as written in the static table
#[derive(Debug, Clone, Copy)]
pub struct ZoneTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub connections: &'static [&'static str],
    pub loot_table: &'static [u32],
    pub hidden_treasure: f64,
    pub treasure_loot: &'static [u32],
}

impl ZoneTemplate {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        connections: &'static [&'static str],
        loot_table: &'static [u32],
        hidden_treasure: f64,
        treasure_loot: &'static [u32],
    ) -> Self {
        Self {
            name,
            description,
            connections,
            loot_table,
            hidden_treasure,
            treasure_loot,
        }
    }

    pub fn to_def(&self) -> ZoneDef {
        ZoneDef {
            name: self.name.to_string(),
            description: self.description.to_string(),
            connections: self.connections.iter().map(|c| c.to_string()).collect(),
            loot_table: self.loot_table.to_vec(),
            hidden_treasure: self.hidden_treasure,
            treasure_loot: self.treasure_loot.to_vec(),
        }
    }
}

pub static ZONES: &[ZoneTemplate] = &[
    ZoneTemplate::new(
        "beach",
        "You are at the beach. You can see a volcano, the jungle, and a mysterious cave.",
        &["volcano", "jungle", "mysterious cave"],
        &[0, 5, 10],
        0.1,
        &[15, 25],
    ),
    ZoneTemplate::new(
        "volcano",
        "You are near an active volcano. The ground is hot, and there's a path leading to the beach and the jungle.",
        &["beach", "jungle", "exit"],
        &[0, 5, 15],
        0.05,
        &[20, 30],
    ),
    ZoneTemplate::new(
        "jungle",
        "You are deep in the jungle. The trees are thick, and there are paths to the volcano, beach, and mysterious cave.",
        &["beach", "volcano", "mysterious cave"],
        &[1, 3, 7],
        0.15,
        &[8, 16],
    ),
    ZoneTemplate::new(
        "mysterious cave",
        "You are inside a mysterious cave. The walls echo with strange sounds. There's a path leading to the jungle and the beach.",
        &["beach", "jungle"],
        &[0, 10, 20],
        0.2,
        &[7, 14],
    ),
    ZoneTemplate::new(
        "treasure cove",
        "You are at a hidden treasure cove, where the sand is golden and the waves crash gently. There's a way to the jungle and the beach.",
        &["beach", "jungle", "exit"],
        &[10, 15, 20],
        0.1,
        &[15, 25],
    ),
    ZoneTemplate::new(
        "hidden temple",
        "You stand before an ancient temple, its entrance surrounded by overgrown vines. The jungle path leads here.",
        &["jungle"],
        &[0, 2, 5],
        0.25,
        &[5, 10],
    ),
    ZoneTemplate::new(
        "pirate ship",
        "You've discovered an old pirate ship stranded on the shore. It's said to have great loot hidden aboard.",
        &["beach"],
        &[1, 3, 7],
        0.1,
        &[15, 25],
    ),
    ZoneTemplate::new(
        "coral reef",
        "You are at a vibrant coral reef. Colorful fish swim around, and there are paths leading to the beach and the pirate ship.",
        &["beach", "pirate ship"],
        &[0, 2, 6],
        0.06,
        &[20, 30],
    ),
    ZoneTemplate::new(
        "exit",
        "You have found the exit of the island! You've successfully made it off the island, with your loot in hand. You are free!",
        &[],
        &[0],
        0.0,
        &[],
    ),
    ZoneTemplate::new(
        "abandoned lighthouse",
        "You stand before an old, abandoned lighthouse. The light no longer shines, but there's a path leading to the beach and the jungle.",
        &["beach", "jungle"],
        &[0, 4, 7],
        0.03,
        &[20, 30],
    ),
    ZoneTemplate::new(
        "cliffside",
        "You are at the edge of a high cliff overlooking the ocean. There's a dangerous path down to the treasure cove, and another path leads to the volcano.",
        &["treasure cove", "volcano", "exit"],
        &[0, 5, 10],
        0.12,
        &[10, 15],
    ),
    ZoneTemplate::new(
        "hidden lagoon",
        "You find yourself in a serene, hidden lagoon surrounded by tall cliffs. The water is crystal clear. The jungle and coral reef are nearby.",
        &["jungle", "coral reef"],
        &[0, 5, 12],
        0.25,
        &[5, 10],
    ),
];

/// Find a zone template by name (case-insensitive)
pub fn find_zone(name: &str) -> Option<&'static ZoneTemplate> {
    ZONES.iter().find(|z| z.name.eq_ignore_ascii_case(name))
}

/// The built-in island in its authored form
pub fn island_def() -> IslandDef {
    IslandDef {
        start: START_ZONE.to_string(),
        exit: EXIT_ZONE.to_string(),
        zones: ZONES.iter().map(ZoneTemplate::to_def).collect(),
    }
}

/// The built-in island, validated
pub fn island() -> Result<ZoneGraph, ZoneError> {
    ZoneGraph::new(island_def())
}
