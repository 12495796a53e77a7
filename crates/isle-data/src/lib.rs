//! isle-data: Static game data for the Pirate Isle treasure hunt
//!
//! Contains the built-in island layout.

pub mod zones;

pub use zones::{EXIT_ZONE, START_ZONE, ZONES, ZoneTemplate, find_zone, island, island_def};
