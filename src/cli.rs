//! Command-line interface for the headless runner.

use clap::Parser;

use five_lines::core::GameConfig;
use five_lines::types::{
    Color, BOARD_SIZE, DEFAULT_INITIAL_PIECES, DEFAULT_LINE_LENGTH, DEFAULT_SPAWN_COUNT,
};

/// Five Lines - plays a seeded game with random legal moves
#[derive(Parser, Debug)]
#[command(name = "five-lines")]
#[command(about = "Headless five-in-a-row engine runner", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Seed for the session's piece generator
    #[arg(long, default_value_t = 1)]
    pub seed: u32,

    /// Seed for move selection (defaults to the session seed)
    #[arg(long)]
    pub move_seed: Option<u64>,

    #[arg(long, default_value_t = BOARD_SIZE)]
    pub width: u8,

    #[arg(long, default_value_t = BOARD_SIZE)]
    pub height: u8,

    /// Minimum run length that clears
    #[arg(long, default_value_t = DEFAULT_LINE_LENGTH)]
    pub line_length: usize,

    /// Pieces spawned after a move that clears nothing
    #[arg(long, default_value_t = DEFAULT_SPAWN_COUNT)]
    pub spawn_count: usize,

    #[arg(long, default_value_t = DEFAULT_INITIAL_PIECES)]
    pub initial_pieces: usize,

    /// Comma-separated colors, e.g. `red,green,blue` (default: all seven)
    #[arg(long, value_delimiter = ',', value_parser = parse_color)]
    pub palette: Vec<Color>,

    /// Stop after this many moves
    #[arg(long)]
    pub max_turns: Option<u32>,

    /// Print the final snapshot as JSON instead of a summary line
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn game_config(&self) -> GameConfig {
        let config = GameConfig::default()
            .with_size(self.width, self.height)
            .with_line_length(self.line_length)
            .with_spawn_count(self.spawn_count)
            .with_initial_pieces(self.initial_pieces);
        if self.palette.is_empty() {
            config
        } else {
            config.with_palette(self.palette.clone())
        }
    }
}

fn parse_color(s: &str) -> Result<Color, String> {
    let name = s.trim().to_ascii_lowercase();
    Color::from_str(&name).ok_or_else(|| {
        let known: Vec<&str> = Color::ALL.iter().map(Color::as_str).collect();
        format!("unknown color `{s}` (expected one of {})", known.join(", "))
    })
}
