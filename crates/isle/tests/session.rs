//! Scripted console sessions on the built-in island.

use std::io::Cursor;

use isle::{App, SessionSummary, show_scores};
use isle_core::world::ScoreFile;
use isle_core::{Phase, ScriptedRng, ZoneGraph};
use tempfile::TempDir;

fn lurk_index(graph: &ZoneGraph, name: &str) -> usize {
    let id = graph.id_of(name).unwrap();
    graph.lurk_zones().iter().position(|&z| z == id).unwrap()
}

/// Run a whole session and return what it printed
fn play(
    graph: &ZoneGraph,
    rng: ScriptedRng,
    scores: &ScoreFile,
    name: &str,
    script: &str,
) -> (SessionSummary, String) {
    let mut app = App::new(graph, rng, scores.clone(), name);
    let mut input = Cursor::new(script.to_string());
    let mut out = Vec::new();
    let summary = app.run(&mut input, &mut out).unwrap();
    (summary, String::from_utf8(out).unwrap())
}

// ============================================================================
// Ending a session
// ============================================================================

#[test]
fn leaving_from_the_beach_banks_nothing() {
    let graph = isle_data::island().unwrap();
    let dir = TempDir::new().unwrap();
    let scores = ScoreFile::new(dir.path().join("high_scores.txt"));
    let rng = ScriptedRng::new().with_picks([lurk_index(&graph, "cliffside")]);

    let (summary, text) = play(&graph, rng, &scores, "Ada", "exit\n");

    assert_eq!(summary.phase, Phase::Quit);
    assert_eq!(summary.final_score, 0);
    assert_eq!(summary.rank, Some(1));
    assert!(text.contains("You are at the beach."));
    assert!(text.contains("You currently have 0 coins."));
    assert!(text.contains("You wisely decided to leave the Pirate to its Island."));
    assert!(text.contains("\nYour final score: 0\n"));
    assert!(text.contains("Top 10 High Scores:\n1. Ada: 0"));
}

#[test]
fn end_of_input_leaves_the_island() {
    let graph = isle_data::island().unwrap();
    let dir = TempDir::new().unwrap();
    let scores = ScoreFile::new(dir.path().join("high_scores.txt"));
    let rng = ScriptedRng::new().with_picks([lurk_index(&graph, "cliffside")]);

    let (summary, _) = play(&graph, rng, &scores, "Ada", "");

    assert_eq!(summary.phase, Phase::Quit);
    assert_eq!(scores.load().unwrap().len(), 1);
}

#[test]
fn loot_and_sail_away() {
    let graph = isle_data::island().unwrap();
    let dir = TempDir::new().unwrap();
    let scores = ScoreFile::new(dir.path().join("high_scores.txt"));
    let rng = ScriptedRng::new()
        .with_picks([
            lurk_index(&graph, "cliffside"),
            // beach loot: 10 coins, then the pirate stays out of earshot
            2,
            lurk_index(&graph, "cliffside"),
            lurk_index(&graph, "hidden temple"),
            lurk_index(&graph, "hidden temple"),
        ])
        .with_chances([false]);

    let script = "LOOT\nmove volcano\nmove exit\nexit\n";
    let (summary, text) = play(&graph, rng, &scores, "Mary Read", script);

    assert_eq!(summary.phase, Phase::Won);
    assert_eq!(summary.final_score, 10);
    assert!(text.contains("You found 10 coins!"));
    assert!(text.contains("You currently have 10 coins."));
    assert!(text.contains("You have found the exit of the island!"));
    assert!(text.contains("You sail away from the Island"));
    assert!(!text.contains("You hear the Pirate lurking."));
    assert_eq!(scores.load().unwrap().entries()[0].name, "Mary Read");
}

#[test]
fn exit_is_only_offered_on_the_exit_zone() {
    let graph = isle_data::island().unwrap();
    let dir = TempDir::new().unwrap();
    let scores = ScoreFile::new(dir.path().join("high_scores.txt"));
    let rng = ScriptedRng::new().with_picks([
        lurk_index(&graph, "cliffside"),
        lurk_index(&graph, "hidden temple"),
        lurk_index(&graph, "hidden temple"),
    ]);

    let (_, text) = play(&graph, rng, &scores, "Ada", "move volcano\nmove exit\nexit\n");

    let menus: Vec<&str> = text.split("Actions:\n").skip(1).collect();
    assert_eq!(menus.len(), 3);
    assert!(menus[0].starts_with("\tmove [zone]\n\tloot\n>> "));
    assert!(menus[1].starts_with("\tmove [zone]\n\tloot\n>> "));
    assert!(menus[2].starts_with("\tmove [zone]\n\tloot\n\texit\n>> "));
}

// ============================================================================
// The pirate
// ============================================================================

#[test]
fn caught_in_the_jungle() {
    let graph = isle_data::island().unwrap();
    let dir = TempDir::new().unwrap();
    let scores = ScoreFile::new(dir.path().join("high_scores.txt"));
    let rng = ScriptedRng::new().with_picks([
        lurk_index(&graph, "cliffside"),
        lurk_index(&graph, "jungle"),
    ]);

    let (summary, text) = play(&graph, rng, &scores, "Ada", "move jungle\nloot\n");

    assert_eq!(summary.phase, Phase::Caught);
    assert!(text.contains("The Pirate has found you! You drop everything and flee the Island."));
    // the session is over before the second line is read
    assert_eq!(text.matches(">> ").count(), 1);
    assert!(text.contains("1. Ada: 0"));
}

#[test]
fn pirate_next_door_is_heard() {
    let graph = isle_data::island().unwrap();
    let dir = TempDir::new().unwrap();
    let scores = ScoreFile::new(dir.path().join("high_scores.txt"));
    let rng = ScriptedRng::new().with_picks([
        lurk_index(&graph, "cliffside"),
        lurk_index(&graph, "volcano"),
    ]);

    let (_, text) = play(&graph, rng, &scores, "Ada", "move jungle\nexit\n");

    assert!(text.contains("You hear the Pirate lurking."));
}

// ============================================================================
// Bad input
// ============================================================================

#[test]
fn invalid_actions_reprompt_without_a_turn() {
    let graph = isle_data::island().unwrap();
    let dir = TempDir::new().unwrap();
    let scores = ScoreFile::new(dir.path().join("high_scores.txt"));
    // nothing is queued after the opening placement
    let rng = ScriptedRng::new().with_picks([lurk_index(&graph, "cliffside")]);

    let (summary, text) = play(&graph, rng, &scores, "Ada", "dance\nmove exit\nmove\nexit\n");

    assert_eq!(summary.phase, Phase::Quit);
    assert_eq!(text.matches("Error: Invalid Action").count(), 3);
    // the zone is described once; refused input does not redraw it
    assert_eq!(text.matches("You are at the beach.").count(), 1);
    assert_eq!(text.matches(">> ").count(), 4);
}

// ============================================================================
// Score board
// ============================================================================

#[test]
fn unreadable_board_is_a_warning() {
    let graph = isle_data::island().unwrap();
    let dir = TempDir::new().unwrap();
    // a directory where the file should be
    let scores = ScoreFile::new(dir.path());
    let rng = ScriptedRng::new().with_picks([lurk_index(&graph, "cliffside")]);

    let (summary, text) = play(&graph, rng, &scores, "Ada", "exit\n");

    assert_eq!(summary.final_score, 0);
    assert!(text.contains("Warning: score file"));
    assert!(text.contains("1. Ada: 0"));
}

#[test]
fn low_score_misses_a_full_board() {
    let graph = isle_data::island().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("high_scores.txt");
    let board: String = (1..=10).rev().map(|i| format!("{}, P{i}\n", i * 10)).collect();
    std::fs::write(&path, &board).unwrap();
    let scores = ScoreFile::new(&path);
    let rng = ScriptedRng::new().with_picks([lurk_index(&graph, "cliffside")]);

    let (summary, text) = play(&graph, rng, &scores, "Ada", "exit\n");

    assert_eq!(summary.rank, None);
    assert!(!text.contains("You placed"));
    assert!(text.contains("10. P1: 10"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), board);
}

#[test]
fn show_scores_on_an_empty_board() {
    let dir = TempDir::new().unwrap();
    let scores = ScoreFile::new(dir.path().join("high_scores.txt"));
    let mut out = Vec::new();
    show_scores(&scores, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "\nNo high scores yet!\n");
}
