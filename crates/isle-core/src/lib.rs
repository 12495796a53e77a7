//! isle-core: Core game logic for the Pirate Isle treasure hunt
//!
//! The player wanders a graph of island zones, loots them for coins and
//! tries to leave by the exit before the pirate, who re-rolls his position
//! after every action, lands on them. This crate holds the zone graph, the
//! turn engine and the high score table. It does no console I/O.

pub mod island;
pub mod world;

mod gameloop;
mod rng;

pub use gameloop::{
    GameLoop, GameState, Intent, LootDraw, LootReport, Phase, TurnEngine, TurnError, TurnResult,
    relocate_pirate,
};
pub use island::{IslandDef, Zone, ZoneDef, ZoneError, ZoneGraph, ZoneId};
pub use rng::{GameRng, RandomSource, ScriptedRng};
