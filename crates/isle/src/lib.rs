//! isle: console front end for the Pirate Isle treasure hunt
//!
//! Reads player commands line by line and prints the island as text.

pub mod app;
pub mod input;

pub use app::{App, SessionSummary, print_welcome, prompt_name, show_scores};
pub use input::{Verb, available_verbs, parse_intent};
