//! Pirate Isle
//!
//! Main entry point for the game.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use isle::{App, print_welcome, prompt_name, show_scores};
use isle_core::world::Options;
use isle_core::world::topten::validate_name;
use isle_core::{IslandDef, ZoneGraph};

/// Pirate Isle treasure hunt
#[derive(Parser, Debug)]
#[command(name = "isle")]
#[command(author, version, about = "Pirate Isle - loot the island, dodge the pirate!", long_about = None)]
struct Args {
    /// Player name
    #[arg(short = 'u', long = "name")]
    name: Option<String>,

    /// Where the high scores are kept
    #[arg(long = "scores-file", default_value = "high_scores.txt")]
    scores_file: PathBuf,

    /// Seed for a reproducible session
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Island definition (JSON) to play instead of the built-in one
    #[arg(long = "island")]
    island: Option<PathBuf>,

    /// View high scores
    #[arg(short = 's', long = "scores")]
    scores: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn options(&self) -> Options {
        Options {
            name: self.name.clone(),
            scores_file: self.scores_file.clone(),
            seed: self.seed,
            island: self.island.clone(),
            verbose: self.verbose,
            ..Options::default()
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load_island(options: &Options) -> Result<ZoneGraph> {
    match &options.island {
        Some(path) => {
            let def = IslandDef::load(path)
                .with_context(|| format!("failed to read island {}", path.display()))?;
            ZoneGraph::new(def).with_context(|| format!("invalid island {}", path.display()))
        }
        None => isle_data::island().context("built-in island is invalid"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let options = args.options();
    init_tracing(options.verbose);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    if args.scores {
        show_scores(&options.score_file(), &mut out)?;
        return Ok(());
    }

    let graph = load_island(&options)?;

    print_welcome(&mut out)?;
    let name = match &options.name {
        Some(name) => {
            validate_name(name)?;
            name.clone()
        }
        None => match prompt_name(&mut input, &mut out)? {
            Some(name) => name,
            None => return Ok(()),
        },
    };

    let rng = options.rng();
    info!(seed = rng.seed(), zones = graph.len(), "island ready");

    let mut app = App::new(&graph, rng, options.score_file(), name);
    app.run(&mut input, &mut out)?;
    out.flush()?;

    Ok(())
}
