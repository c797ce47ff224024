use std::io::stdout;
use std::path::PathBuf;

use cinefx_config::Config;
use cinefx_core::Viewport;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};

mod app;
mod color;
mod logging;
mod page;
mod stylesheet;

use app::{App, build_effects};

/// Viewport used for headless runs, in terminal cells.
const SIMULATED_VIEWPORT: Viewport = Viewport::new(120.0, 40.0);

#[derive(Parser, Debug)]
#[command(author, version, about = "Ambient cinema effects in your terminal", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed the effects for a reproducible run.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Run headless for this many virtual milliseconds and print a summary.
    #[arg(long, value_name = "MS")]
    simulate: Option<u64>,
    /// Turn off the pointer spotlight.
    #[arg(long)]
    no_spotlight: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let log_path = logging::init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.no_spotlight {
        config.effects.spotlight.enabled = false;
    }
    config.validate()?;
    tracing::info!(?log_path, seed = ?config.seed, "starting cinefx");

    if let Some(duration_ms) = cli.simulate {
        simulate(&config, duration_ms);
        return Ok(());
    }

    let terminal = ratatui::init();
    let result = (|| -> color_eyre::Result<()> {
        crossterm::execute!(stdout(), EnableMouseCapture)?;
        let size = terminal.size()?;
        App::new(&config, size.width, size.height).run(terminal)
    })();
    if let Err(err) = crossterm::execute!(stdout(), DisableMouseCapture) {
        tracing::warn!(%err, "failed to disable mouse capture");
    }
    ratatui::restore();
    result
}

/// Drive the effects on an in-memory page, one frame at a time.
fn simulate(config: &Config, duration_ms: u64) {
    let (mut effects, page) = build_effects(config, SIMULATED_VIEWPORT);
    let step = config.frame_ms.max(1);
    while effects.now_ms() < duration_ms {
        effects.advance(step.min(duration_ms - effects.now_ms()));
    }

    let stats = effects.stats();
    println!("simulated {} ms", effects.now_ms());
    println!("cards:             {}", page.cards().len());
    println!("live particles:    {}", effects.particle_count());
    println!(
        "particles:         {} spawned, {} retired",
        stats.particles_spawned, stats.particles_retired
    );
    println!("live stars:        {}", effects.star_count());
    println!(
        "shooting stars:    {} spawned, {} removed",
        stats.stars_spawned, stats.stars_removed
    );
    tracing::info!(?stats, "simulation finished");
}
