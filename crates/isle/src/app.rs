//! Console session: prompts, turn rendering and the final score board

use std::io::{self, BufRead, Write};

use isle_core::world::topten::validate_name;
use isle_core::world::{HighScores, ScoreFile};
use isle_core::{
    GameLoop, GameRng, Intent, LootDraw, LootReport, Phase, RandomSource, TurnError, TurnResult,
    ZoneGraph,
};
use tracing::{debug, info, warn};

use crate::input::{available_verbs, parse_intent};

pub const WELCOME: &str = "Welcome to The Island. The Island was abandoned many years ago. \
Legend says that there are many treasures burried waiting to be taken. However, other legends \
say that a fearsome pirate lurks through the island zones. Will you escape with valuable loot \
or be killed by the terrifying Pirate?";

const INVALID_ACTION: &str = "Error: Invalid Action";

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub phase: Phase,
    pub final_score: i64,
    /// Place on the score board, if the score made the cut
    pub rank: Option<usize>,
}

/// One player's run on the island
pub struct App<'g, R = GameRng> {
    game: GameLoop<'g, R>,
    scores: ScoreFile,
    name: String,
}

impl<'g, R: RandomSource> App<'g, R> {
    pub fn new(graph: &'g ZoneGraph, rng: R, scores: ScoreFile, name: impl Into<String>) -> Self {
        Self::with_game(GameLoop::new(graph, rng), scores, name)
    }

    /// Wrap an existing game loop, e.g. one with a prepared state
    pub fn with_game(game: GameLoop<'g, R>, scores: ScoreFile, name: impl Into<String>) -> Self {
        Self {
            game,
            scores,
            name: name.into(),
        }
    }

    pub fn game(&self) -> &GameLoop<'g, R> {
        &self.game
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Play until the player leaves or is caught, then record the score.
    ///
    /// End of input counts as leaving.
    pub fn run<I: BufRead, O: Write>(
        &mut self,
        input: &mut I,
        out: &mut O,
    ) -> io::Result<SessionSummary> {
        info!(player = %self.name, "session started");
        let final_score = loop {
            self.render_zone(out)?;
            let result = self.next_turn(input, out)?;
            self.render_result(&result, out)?;
            match result {
                TurnResult::Caught { final_score, .. }
                | TurnResult::SessionEnded { final_score, .. } => break final_score,
                TurnResult::Moved { .. } | TurnResult::Looted { .. } => {}
            }
        };

        let rank = self.finish(final_score, out)?;
        let phase = self.game.state().phase;
        info!(%phase, final_score, ?rank, "session finished");
        Ok(SessionSummary {
            phase,
            final_score,
            rank,
        })
    }

    /// Prompt until the engine accepts an intent
    fn next_turn<I: BufRead, O: Write>(
        &mut self,
        input: &mut I,
        out: &mut O,
    ) -> io::Result<TurnResult> {
        loop {
            write!(out, ">> ")?;
            out.flush()?;

            let intent = match read_line(input)? {
                None => {
                    writeln!(out)?;
                    Intent::Exit
                }
                Some(line) => match parse_intent(&line) {
                    Some(intent) => intent,
                    None => {
                        writeln!(out, "{INVALID_ACTION}")?;
                        continue;
                    }
                },
            };

            match self.game.execute(&intent) {
                Ok(result) => return Ok(result),
                Err(err @ TurnError::InvalidMove { .. }) => {
                    debug!(%err, "intent refused");
                    writeln!(out, "{INVALID_ACTION}")?;
                }
                Err(err @ TurnError::GameOver) => return Err(io::Error::other(err)),
            }
        }
    }

    fn render_zone<O: Write>(&self, out: &mut O) -> io::Result<()> {
        let zone = self.game.current_zone();
        writeln!(out, "\n{}", zone.description)?;
        writeln!(out, "You currently have {} coins.", self.game.state().score)?;

        writeln!(out, "\nZones:")?;
        for neighbour in self.game.graph().neighbours(zone.id) {
            writeln!(out, "\t{}", neighbour.name)?;
        }
        writeln!(out, "Actions:")?;
        for verb in available_verbs(self.game.at_exit()) {
            writeln!(out, "\t{verb}")?;
        }
        Ok(())
    }

    fn render_result<O: Write>(&self, result: &TurnResult, out: &mut O) -> io::Result<()> {
        match result {
            TurnResult::Moved { pirate_nearby, .. } => render_lurking(*pirate_nearby, out),
            TurnResult::Looted {
                report,
                pirate_nearby,
            } => {
                render_loot(report, out)?;
                render_lurking(*pirate_nearby, out)
            }
            TurnResult::Caught {
                looted,
                final_score,
                ..
            } => {
                if let Some(report) = looted {
                    render_loot(report, out)?;
                }
                writeln!(
                    out,
                    "The Pirate has found you! You drop everything and flee the Island."
                )?;
                writeln!(out, "\nYour final score: {final_score}")
            }
            TurnResult::SessionEnded {
                final_score,
                escaped,
            } => {
                if *escaped {
                    writeln!(out, "You sail away from the Island, your loot safe aboard.")?;
                } else {
                    writeln!(out, "You wisely decided to leave the Pirate to its Island.")?;
                }
                writeln!(out, "\nYour final score: {final_score}")
            }
        }
    }

    /// Record the final score and show the board
    fn finish<O: Write>(&self, final_score: i64, out: &mut O) -> io::Result<Option<usize>> {
        match self.scores.record(final_score, &self.name) {
            Ok(recorded) => {
                for problem in &recorded.problems {
                    writeln!(out, "Warning: {problem}")?;
                }
                if let Some(rank) = recorded.rank {
                    writeln!(out, "You placed #{rank} on the score board!")?;
                }
                writeln!(out, "\n{}", recorded.scores)?;
                Ok(recorded.rank)
            }
            Err(e) => {
                warn!("score not recorded: {e}");
                writeln!(out, "Warning: {e}")?;
                show_scores(&self.scores, out)?;
                Ok(None)
            }
        }
    }
}

fn render_loot<O: Write>(report: &LootReport, out: &mut O) -> io::Result<()> {
    match report.draw {
        LootDraw::NothingHere => {
            writeln!(out, "You are at the exit zone. There is nothing to loot here!")?
        }
        LootDraw::Found(0) => writeln!(out, "You didn't find anything.")?,
        LootDraw::Found(coins) => writeln!(out, "You found {coins} coins!")?,
    }
    if let Some(bonus) = report.treasure {
        writeln!(out, "You discovered a Hidden Treasure!")?;
        writeln!(out, "The Hidden Treasure has {bonus} bonus loot!")?;
    }
    Ok(())
}

fn render_lurking<O: Write>(pirate_nearby: bool, out: &mut O) -> io::Result<()> {
    if pirate_nearby {
        writeln!(out, "You hear the Pirate lurking.")?;
    }
    Ok(())
}

/// Read one line; `None` at end of input
fn read_line<I: BufRead>(input: &mut I) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

pub fn print_welcome<O: Write>(out: &mut O) -> io::Result<()> {
    writeln!(out, "\n{WELCOME}\n")
}

/// Ask for a name the score board can store. `None` if input runs out.
pub fn prompt_name<I: BufRead, O: Write>(input: &mut I, out: &mut O) -> io::Result<Option<String>> {
    loop {
        write!(out, "Enter your name: ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            writeln!(out)?;
            return Ok(None);
        };
        let name = line.trim();
        match validate_name(name) {
            Ok(()) => return Ok(Some(name.to_string())),
            Err(e) => writeln!(out, "{e}")?,
        }
    }
}

/// Print the stored board, falling back to an empty one if it is unreadable
pub fn show_scores<O: Write>(scores: &ScoreFile, out: &mut O) -> io::Result<()> {
    let table = match scores.load() {
        Ok(table) => table,
        Err(e) => {
            writeln!(out, "Warning: {e}")?;
            HighScores::with_capacity(scores.capacity())
        }
    };
    writeln!(out, "\n{table}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loot_messages() {
        let mut out = Vec::new();
        render_loot(
            &LootReport {
                draw: LootDraw::Found(5),
                treasure: Some(25),
            },
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "You found 5 coins!\nYou discovered a Hidden Treasure!\nThe Hidden Treasure has 25 bonus loot!\n"
        );
    }

    #[test]
    fn test_empty_draw_messages() {
        let mut out = Vec::new();
        render_loot(
            &LootReport {
                draw: LootDraw::Found(0),
                treasure: None,
            },
            &mut out,
        )
        .unwrap();
        render_loot(
            &LootReport {
                draw: LootDraw::NothingHere,
                treasure: None,
            },
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("You didn't find anything.\n"));
        assert!(text.ends_with("There is nothing to loot here!\n"));
    }

    #[test]
    fn test_prompt_name_retries() {
        let mut input = io::Cursor::new("\n  \nRead, Bonny\nAnne Bonny\n");
        let mut out = Vec::new();
        let name = prompt_name(&mut input, &mut out).unwrap();
        assert_eq!(name.as_deref(), Some("Anne Bonny"));
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Enter your name: ").count(), 4);
    }

    #[test]
    fn test_prompt_name_eof() {
        let mut input = io::Cursor::new("");
        let mut out = Vec::new();
        assert_eq!(prompt_name(&mut input, &mut out).unwrap(), None);
    }
}
