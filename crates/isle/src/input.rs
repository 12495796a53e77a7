//! Input handling - convert typed lines to intents
//!
//! The vocabulary is `move <zone>`, `loot` and `exit`, case-insensitive.

use isle_core::Intent;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Actions listed in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Verb {
    #[strum(to_string = "move [zone]")]
    Move,
    #[strum(to_string = "loot")]
    Loot,
    #[strum(to_string = "exit")]
    Exit,
}

impl Verb {
    /// `exit` is only advertised while standing on the exit zone
    pub fn offered(self, at_exit: bool) -> bool {
        self != Verb::Exit || at_exit
    }
}

pub fn available_verbs(at_exit: bool) -> Vec<Verb> {
    Verb::iter().filter(|verb| verb.offered(at_exit)).collect()
}

/// Convert a line of player input to an intent.
///
/// Returns `None` for anything outside the vocabulary. Zone names are
/// lower-cased and their inner whitespace collapsed; whether the zone is
/// actually reachable is for the engine to decide.
pub fn parse_intent(line: &str) -> Option<Intent> {
    let action = line.trim().to_lowercase();
    match action.as_str() {
        "loot" => Some(Intent::Loot),
        "exit" => Some(Intent::Exit),
        _ => {
            let rest = action.strip_prefix("move")?;
            if !rest.starts_with(char::is_whitespace) {
                return None;
            }
            let destination = rest.split_whitespace().collect::<Vec<_>>().join(" ");
            (!destination.is_empty()).then_some(Intent::Move(destination))
        }
    }
}
