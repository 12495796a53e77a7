//! Island layout
//!
//! Zones, their connections, and the loot each one hides.

mod graph;
mod zone;

pub use graph::{ZoneError, ZoneGraph};
pub use zone::{IslandDef, Zone, ZoneDef, ZoneId};
