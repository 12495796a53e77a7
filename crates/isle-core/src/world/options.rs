//! Run configuration
//!
//! Everything a session needs to know before the first turn. The defaults
//! reproduce a plain launch: ask for a name, random seed, built-in island,
//! scores in `high_scores.txt` next to the player.

use std::path::PathBuf;

use crate::rng::GameRng;
use crate::world::topten::{MAX_SCORES, ScoreFile, default_scores_path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Player name; asked for at start-up when absent
    pub name: Option<String>,
    pub scores_file: PathBuf,
    /// Number of entries kept on the score board
    pub max_scores: usize,
    /// Fixed RNG seed for reproducible sessions
    pub seed: Option<u64>,
    /// Custom island definition (JSON) replacing the built-in one
    pub island: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            name: None,
            scores_file: default_scores_path(),
            max_scores: MAX_SCORES,
            seed: None,
            island: None,
            verbose: false,
        }
    }
}

impl Options {
    pub fn score_file(&self) -> ScoreFile {
        ScoreFile::with_capacity(&self.scores_file, self.max_scores)
    }

    /// Seeded when a seed was given, from entropy otherwise
    pub fn rng(&self) -> GameRng {
        self.seed.map(GameRng::new).unwrap_or_else(GameRng::from_entropy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RandomSource;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.scores_file, PathBuf::from("high_scores.txt"));
        assert_eq!(options.max_scores, 10);
        assert_eq!(options.score_file().path(), options.scores_file.as_path());
    }

    #[test]
    fn test_seeded_rng() {
        let options = Options {
            seed: Some(5),
            ..Options::default()
        };
        let mut a = options.rng();
        let mut b = options.rng();
        assert_eq!(a.seed(), 5);
        assert_eq!(a.pick(1000), b.pick(1000));
    }
}
