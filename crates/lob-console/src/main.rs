// crates/lob-console/src/main.rs

mod config;
mod render;
mod replay;
mod seed;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lob_core::MatchingEngine;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::DemoConfig;

#[derive(Parser)]
#[command(name = "lob-console")]
#[command(about = "Console tools for the limit order book engine")]
struct Cli {
    /// Price levels shown per side
    #[arg(long, default_value_t = 10)]
    depth: usize,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Seed a random book and print it
    Demo {
        /// RNG seed for a reproducible book
        #[arg(short, long)]
        seed: Option<u64>,

        /// TOML file overriding the demo book parameters
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run a CSV request file through a fresh book and print every output
    Replay {
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let mut engine = MatchingEngine::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Demo { seed, config } => {
            let config = match config {
                Some(path) => DemoConfig::load(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => DemoConfig::default(),
            };
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let added = seed::seed_book(&mut engine, &config, &mut rng)?;
            info!(added, "demo book ready");
        }
        Command::Replay { file } => {
            let input = File::open(&file)
                .with_context(|| format!("opening {}", file.display()))?;
            let stats = replay::replay(BufReader::new(input), &mut engine, &mut out)?;
            info!(
                requests = stats.requests,
                outputs = stats.outputs,
                parse_errors = stats.parse_errors,
                "replay finished"
            );
        }
    }

    let touch = engine.top_of_book();
    info!(mid = ?touch.mid_price(), spread = ?touch.spread(), "final touch");

    render::render_book(&mut out, &engine, cli.depth)?;
    Ok(())
}
