//! Headless Five Lines runner (default binary).
//!
//! Plays one seeded game with random legal moves and reports the outcome.
//! Logs go to stderr; set `RUST_LOG=debug` to follow every move.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use five_lines::autoplay::Autoplay;
use five_lines::engine::Session;

use cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.game_config();
    info!(?config, seed = cli.seed, "starting session");

    let mut session =
        Session::with_seed(config, cli.seed).context("failed to start the session")?;
    let move_seed = cli.move_seed.unwrap_or(cli.seed as u64);
    let summary = Autoplay::new(move_seed)
        .with_max_turns(cli.max_turns)
        .run(&mut session)
        .context("autoplay aborted")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&session.snapshot())?;
        println!("{json}");
    } else {
        println!(
            "turns={} score={} lines={} cells={} stop={}",
            summary.turns,
            summary.score,
            summary.lines_cleared,
            summary.cells_cleared,
            summary.stop.as_str()
        );
    }
    Ok(())
}
