//! Numlinktui: timed number-chain puzzle game in the terminal.

mod app;
mod grid;
mod input;
mod round;
mod score;
mod selector;
mod theme;
mod timer;
mod ui;

use anyhow::Result;
use app::App;
use clap::{Parser, ValueEnum};

/// Options that shape a round, supplied once per round.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    /// Grid side length in cells.
    pub size: u16,
    /// Round duration in seconds.
    pub duration_secs: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette).unwrap_or_default();
    let config = GameConfig {
        size: args.size,
        duration_secs: args.duration,
    };
    let mut app = App::new(&args, config, theme);
    app.run()
}

/// Timed number-chain puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "numlinktui",
    version,
    about = "Timed number-chain puzzle in the terminal. Drag through neighbouring numbers that differ by at most one; longer chains score more.",
    long_about = "Numlinktui is a terminal puzzle game played against the clock.\n\n\
        The board is a grid of digits 1-9. Hold the left mouse button and drag \
        through neighbouring cells (no diagonals) whose values differ by at most \
        one; release to score the chain. Each cell is worth its value times its \
        position in the chain, so longer chains pay off. Cleared columns refill \
        from the top until the countdown runs out.\n\n\
        CONTROLS:\n  Mouse drag  Select a chain   Release    Commit it\n  \
        p           Pause/resume     r          Replay (after game over)\n  \
        Esc         Exit round       q          Quit\n\n\
        Use --theme to load a btop-style theme file."
)]
pub struct Args {
    /// Grid side length (cells per side).
    #[arg(short, long, default_value = "6", value_parser = clap::value_parser!(u16).range(2..=16))]
    pub size: u16,

    /// Round duration in seconds.
    #[arg(short, long, default_value = "60", value_parser = clap::value_parser!(u64).range(1..))]
    pub duration: u64,

    /// Path to theme file (btop-style theme[key]="value"). Uses the built-in
    /// theme if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<std::path::PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Skip main menu and start a round immediately.
    #[arg(long)]
    pub no_menu: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}
