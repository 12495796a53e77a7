//! Turn resolution
//!
//! [`TurnEngine`] resolves one player intent against an explicit
//! [`GameState`]; [`GameLoop`] bundles an engine with the state and RNG a
//! single session owns.

use thiserror::Error;
use tracing::debug;

use crate::island::{Zone, ZoneGraph, ZoneId};
use crate::rng::{GameRng, RandomSource};

/// Lifecycle of a session. Every phase but `Active` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    #[default]
    Active,
    /// Left the island from the exit zone
    Won,
    /// Shared a zone with the pirate
    Caught,
    /// Walked away from the game anywhere but the exit
    Quit,
}

/// Mutable state of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub player_zone: ZoneId,
    pub pirate_zone: ZoneId,
    /// Coins collected so far; never decreases
    pub score: i64,
    /// Move and loot turns resolved
    pub turns: u64,
    pub phase: Phase,
}

impl GameState {
    /// Fresh session: player on the start zone, pirate somewhere it may lurk.
    pub fn new(graph: &ZoneGraph, rng: &mut impl RandomSource) -> Self {
        Self {
            player_zone: graph.start(),
            pirate_zone: relocate_pirate(graph, rng),
            score: 0,
            turns: 0,
            phase: Phase::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }
}

/// A structured player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Move(String),
    Loot,
    Exit,
}

/// Outcome of the base loot draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootDraw {
    /// Standing on the exit: nothing is drawn
    NothingHere,
    /// Drawn from the zone's loot table; 0 means nothing was found
    Found(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LootReport {
    pub draw: LootDraw,
    /// Bonus from hidden treasure, if it turned up
    pub treasure: Option<u32>,
}

impl LootReport {
    /// Coins this loot action added to the score
    pub fn total(&self) -> u32 {
        let base = match self.draw {
            LootDraw::NothingHere => 0,
            LootDraw::Found(coins) => coins,
        };
        base.saturating_add(self.treasure.unwrap_or(0))
    }
}

/// What a resolved intent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnResult {
    Moved {
        to: ZoneId,
        pirate_nearby: bool,
    },
    Looted {
        report: LootReport,
        pirate_nearby: bool,
    },
    /// The pirate landed on the player. `looted` carries the loot taken
    /// earlier in the same turn.
    Caught {
        zone: ZoneId,
        looted: Option<LootReport>,
        final_score: i64,
    },
    /// The player left. `escaped` is true when they left from the exit zone.
    SessionEnded {
        final_score: i64,
        escaped: bool,
    },
}

impl TurnResult {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Caught { .. } | Self::SessionEnded { .. })
    }

    pub fn pirate_nearby(&self) -> bool {
        match self {
            Self::Moved { pirate_nearby, .. } | Self::Looted { pirate_nearby, .. } => {
                *pirate_nearby
            }
            _ => false,
        }
    }
}

/// Intents the engine refuses. Neither touches the state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("there is no path from '{from}' to '{to}'")]
    InvalidMove { from: String, to: String },

    #[error("the game is already over")]
    GameOver,
}

/// Result of the pirate's move after a player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encounter {
    Clear,
    Nearby,
    Caught,
}

/// Uniform draw among the zones the pirate may occupy.
pub fn relocate_pirate(graph: &ZoneGraph, rng: &mut impl RandomSource) -> ZoneId {
    let lurk = graph.lurk_zones();
    lurk[rng.pick(lurk.len())]
}

/// Stateless turn resolver over one island.
#[derive(Debug, Clone, Copy)]
pub struct TurnEngine<'g> {
    graph: &'g ZoneGraph,
}

impl<'g> TurnEngine<'g> {
    pub fn new(graph: &'g ZoneGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g ZoneGraph {
        self.graph
    }

    /// Dispatch an intent to its resolver.
    pub fn resolve(
        &self,
        state: &mut GameState,
        rng: &mut impl RandomSource,
        intent: &Intent,
    ) -> Result<TurnResult, TurnError> {
        match intent {
            Intent::Move(destination) => self.resolve_move(state, rng, destination),
            Intent::Loot => self.resolve_loot(state, rng),
            Intent::Exit => self.resolve_exit(state),
        }
    }

    /// Walk to a neighbouring zone, then let the pirate move.
    pub fn resolve_move(
        &self,
        state: &mut GameState,
        rng: &mut impl RandomSource,
        destination: &str,
    ) -> Result<TurnResult, TurnError> {
        ensure_active(state)?;

        let to = self
            .graph
            .neighbours(state.player_zone)
            .find(|zone| zone.name == destination)
            .map(|zone| zone.id)
            .ok_or_else(|| TurnError::InvalidMove {
                from: self.graph.name_of(state.player_zone).to_string(),
                to: destination.to_string(),
            })?;

        debug!(
            from = self.graph.name_of(state.player_zone),
            to = destination,
            "player moves"
        );
        state.player_zone = to;
        state.turns += 1;

        Ok(match self.pirate_turn(state, rng) {
            Encounter::Caught => TurnResult::Caught {
                zone: to,
                looted: None,
                final_score: state.score,
            },
            encounter => TurnResult::Moved {
                to,
                pirate_nearby: encounter == Encounter::Nearby,
            },
        })
    }

    /// Search the current zone, then let the pirate move.
    ///
    /// The base draw is skipped on the exit zone; the hidden treasure trial
    /// runs regardless.
    pub fn resolve_loot(
        &self,
        state: &mut GameState,
        rng: &mut impl RandomSource,
    ) -> Result<TurnResult, TurnError> {
        ensure_active(state)?;

        let zone = self.graph.zone(state.player_zone);
        let draw = if zone.id == self.graph.exit() {
            LootDraw::NothingHere
        } else {
            LootDraw::Found(zone.loot_table[rng.pick(zone.loot_table.len())])
        };
        let treasure = roll_hidden_treasure(zone, rng);

        let report = LootReport { draw, treasure };
        state.score = state.score.saturating_add(i64::from(report.total()));
        state.turns += 1;
        debug!(zone = %zone.name, ?draw, ?treasure, score = state.score, "player loots");

        Ok(match self.pirate_turn(state, rng) {
            Encounter::Caught => TurnResult::Caught {
                zone: state.player_zone,
                looted: Some(report),
                final_score: state.score,
            },
            encounter => TurnResult::Looted {
                report,
                pirate_nearby: encounter == Encounter::Nearby,
            },
        })
    }

    /// Leave the island. Winning means doing so from the exit zone.
    pub fn resolve_exit(&self, state: &mut GameState) -> Result<TurnResult, TurnError> {
        ensure_active(state)?;

        let escaped = state.player_zone == self.graph.exit();
        state.phase = if escaped { Phase::Won } else { Phase::Quit };
        debug!(phase = %state.phase, score = state.score, "session ends");

        Ok(TurnResult::SessionEnded {
            final_score: state.score,
            escaped,
        })
    }

    /// The pirate re-rolls its zone from scratch after every move or loot.
    fn pirate_turn(&self, state: &mut GameState, rng: &mut impl RandomSource) -> Encounter {
        state.pirate_zone = relocate_pirate(self.graph, rng);
        debug!(pirate = self.graph.name_of(state.pirate_zone), "pirate relocates");

        if state.pirate_zone == state.player_zone {
            state.phase = Phase::Caught;
            Encounter::Caught
        } else if self.graph.zone(state.player_zone).connects_to(state.pirate_zone) {
            Encounter::Nearby
        } else {
            Encounter::Clear
        }
    }
}

fn ensure_active(state: &GameState) -> Result<(), TurnError> {
    if state.is_active() {
        Ok(())
    } else {
        Err(TurnError::GameOver)
    }
}

fn roll_hidden_treasure(zone: &Zone, rng: &mut impl RandomSource) -> Option<u32> {
    if zone.has_hidden_treasure() && rng.chance(zone.hidden_treasure) {
        Some(zone.treasure_loot[rng.pick(zone.treasure_loot.len())])
    } else {
        None
    }
}

/// Game loop controller: one session's engine, state and RNG.
#[derive(Debug)]
pub struct GameLoop<'g, R = GameRng> {
    engine: TurnEngine<'g>,
    state: GameState,
    rng: R,
}

impl<'g, R: RandomSource> GameLoop<'g, R> {
    /// Start a new session on `graph`
    pub fn new(graph: &'g ZoneGraph, mut rng: R) -> Self {
        let state = GameState::new(graph, &mut rng);
        Self::with_state(graph, state, rng)
    }

    /// Resume from an existing state (used to set up specific positions)
    pub fn with_state(graph: &'g ZoneGraph, state: GameState, rng: R) -> Self {
        Self {
            engine: TurnEngine::new(graph),
            state,
            rng,
        }
    }

    pub fn graph(&self) -> &'g ZoneGraph {
        self.engine.graph()
    }

    /// Get reference to game state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Consume the game loop and return the owned game state
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Zone the player is standing in
    pub fn current_zone(&self) -> &'g Zone {
        self.engine.graph().zone(self.state.player_zone)
    }

    pub fn at_exit(&self) -> bool {
        self.state.player_zone == self.engine.graph().exit()
    }

    /// Resolve one intent
    pub fn execute(&mut self, intent: &Intent) -> Result<TurnResult, TurnError> {
        self.engine.resolve(&mut self.state, &mut self.rng, intent)
    }
}
