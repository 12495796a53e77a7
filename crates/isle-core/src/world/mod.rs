//! World state outside a single turn
//!
//! Run options and the persisted high score table.

pub mod options;
pub mod topten;

pub use options::Options;
pub use topten::{HighScores, Recorded, ScoreEntry, ScoreFile, TopTenError};
