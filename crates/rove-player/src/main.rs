//! Rove Player - third-person locomotion binary
//!
//! Usage:
//!   rove-player play [--config <file>] [--map <file>] [--fullscreen] [--frames <file>]
//!   rove-player simulate <script.toml> [--config <file>] [--map <file>]
//!                        [--ticks-per-second <n>] [--output <file>]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rove_player::{simulate, GameMap, InputScript, JsonLinesSink, PlayerApp, PlayerConfig};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "rove-player")]
#[command(about = "Rove player - third-person movement, camera and procedural animation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a window and play
    Play {
        /// Tuning and key bindings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Map file (defaults to the built-in village)
        #[arg(long)]
        map: Option<PathBuf>,

        /// Launch in fullscreen mode
        #[arg(long)]
        fullscreen: bool,

        /// Also write every frame as JSON lines to this file
        #[arg(long)]
        frames: Option<PathBuf>,
    },

    /// Run an input script headless and print one JSON frame per tick
    Simulate {
        /// Input script
        script: PathBuf,

        /// Tuning and key bindings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Map file (defaults to the built-in village)
        #[arg(long)]
        map: Option<PathBuf>,

        /// Fixed tick rate
        #[arg(long, default_value_t = 60)]
        ticks_per_second: u32,

        /// Write frames here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config,
            map,
            fullscreen,
            frames,
        } => play(config.as_deref(), map.as_deref(), fullscreen, frames.as_deref()),
        Commands::Simulate {
            script,
            config,
            map,
            ticks_per_second,
            output,
        } => run_script(
            &script,
            config.as_deref(),
            map.as_deref(),
            ticks_per_second,
            output.as_deref(),
        ),
    }
}

fn load_inputs(config: Option<&Path>, map: Option<&Path>) -> Result<(PlayerConfig, GameMap)> {
    let config = PlayerConfig::load_or_default(config).context("Failed to load config")?;
    let map = match map {
        Some(path) => GameMap::load(path)
            .with_context(|| format!("Failed to load map {}", path.display()))?,
        None => GameMap::default_map(),
    };
    Ok((config, map))
}

fn play(
    config: Option<&Path>,
    map: Option<&Path>,
    fullscreen: bool,
    frames: Option<&Path>,
) -> Result<()> {
    let (config, map) = load_inputs(config, map)?;

    println!("Controls:");
    println!("  WASD     - Move");
    println!("  Mouse    - Look (click to capture)");
    println!("  Space    - Jump");
    println!("  Escape   - Release cursor / Exit");
    println!("  F11      - Toggle fullscreen");

    let mut app = PlayerApp::new(config, map, fullscreen);
    if let Some(path) = frames {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        app = app.with_sink(Box::new(JsonLinesSink::new(BufWriter::new(file))));
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.take_error() {
        return Err(e).context("Player stopped");
    }
    Ok(())
}

fn run_script(
    script: &Path,
    config: Option<&Path>,
    map: Option<&Path>,
    ticks_per_second: u32,
    output: Option<&Path>,
) -> Result<()> {
    if ticks_per_second == 0 {
        bail!("--ticks-per-second must be at least 1");
    }

    let (config, map) = load_inputs(config, map)?;
    let script = InputScript::load(script)
        .with_context(|| format!("Failed to load script {}", script.display()))?;
    let dt = 1.0 / ticks_per_second as f64;

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    let mut sink = JsonLinesSink::new(writer);

    let summary =
        simulate(&config.tuning, &map, &script, dt, &mut sink).context("Simulation failed")?;
    sink.flush().context("Failed to flush frames")?;

    let p = summary.final_position;
    eprintln!(
        "Simulated {} ticks ({:.2}s), final position ({:.2}, {:.2}, {:.2})",
        summary.ticks, summary.elapsed, p.x, p.y, p.z
    );
    Ok(())
}
