//! Game Hub entry point
//!
//! Wires the core to its collaborators (terminal adapter, file sink,
//! seeded RNG) and runs the fixed-rate tick loop until the menu's exit
//! selection.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use rand::Rng;

use gamehub::consts::TICK_MS;
use gamehub::results::FileResultSink;
use gamehub::term::{TerminalRenderer, poll_events};
use gamehub::{Arcade, ArcadeConfig, RenderAdapter, TickOutcome};

fn main() -> ExitCode {
    env_logger::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ArcadeConfig::load(config_path.as_deref());
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let sink = FileResultSink::new(config.results_dir.clone());
    let results_dir = config.results_dir.clone();

    let mut arcade = match Arcade::new(config, Box::new(sink), seed) {
        Ok(arcade) => arcade,
        Err(err) => {
            eprintln!("gamehub: invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&mut arcade, results_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gamehub: terminal error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Tick loop: poll a batch of events, advance the arcade, draw.
fn run(arcade: &mut Arcade, results_dir: PathBuf) -> io::Result<()> {
    let mut renderer = TerminalRenderer::new(results_dir)?;
    let tick = Duration::from_millis(TICK_MS);

    renderer.draw(&arcade.snapshot());
    loop {
        let deadline = Instant::now() + tick;
        let events = poll_events(deadline)?;
        if arcade.tick(&events) == TickOutcome::Exit {
            log::info!("Exit selected, shutting down");
            return Ok(());
        }
        renderer.draw(&arcade.snapshot());
    }
}
