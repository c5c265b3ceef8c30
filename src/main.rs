mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::Print,
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use wave_shooter::boot::{load_assets, Assets, AudioCue};
use wave_shooter::compute::{init_state, update};
use wave_shooter::config::GameConfig;
use wave_shooter::entities::{GameEvent, GameState};
use wave_shooter::input::{command_for, Command, HeldKeys};

use display::Screen;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Longest step fed to the simulation; a stalled terminal must not teleport
/// bodies through each other.
const MAX_STEP_MS: u64 = 100;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal wave shooter", long_about = None)]
struct Args {
    /// TOML config file; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for spawn positions and timings.
    #[arg(long)]
    seed: Option<u64>,
    /// Starting level (overrides `waves.starting_level`).
    #[arg(long)]
    level: Option<u32>,
    /// Log file; stdout belongs to the game screen.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wave_shooter=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(level) = args.level {
        config.waves.starting_level = level;
    }
    config.validate()?;
    for warning in config.warnings() {
        tracing::warn!("{warning}");
    }
    Ok(config)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Queue the cue for every sound the last update raised.
fn play_sounds<W: Write>(out: &mut W, state: &GameState, assets: &Assets) -> std::io::Result<()> {
    for &sound in &state.sounds {
        tracing::trace!(?sound, "play");
        match assets.cue(sound) {
            AudioCue::Bell => {
                out.queue(Print('\u{7}'))?;
            }
            AudioCue::Silent => {}
        }
    }
    Ok(())
}

/// Runs until a quit key. Movement keys are polled every frame through
/// `HeldKeys` so they combine with fire; fire and confirm are key-down edges.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    assets: &Assets,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let mut keys = HeldKeys::new();
    let mut frame: u64 = 0;
    let mut last_step = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    keys.refresh(code, frame);
                    match command_for(code, modifiers, state.status) {
                        Some(Command::Quit) => return Ok(()),
                        Some(Command::Game(event)) => {
                            *state = update(state, &event, rng);
                            play_sounds(out, state, assets)?;
                        }
                        None => {}
                    }
                }
                KeyEventKind::Repeat => keys.refresh(code, frame),
                KeyEventKind::Release => keys.release(code),
            }
        }

        // ── Simulation step ───────────────────────────────────────────────────
        let dt_ms = (last_step.elapsed().as_millis() as u64).min(MAX_STEP_MS);
        last_step = Instant::now();
        let tick = GameEvent::Tick {
            dt_ms,
            held: keys.directions(frame),
        };
        *state = update(state, &tick, rng);
        play_sounds(out, state, assets)?;

        let (width, height) = terminal::size()?;
        display::render(out, state, assets, Screen { width, height })?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("wave_shooter.log"));
    init_logging(&log_path)?;

    // Boot stage: everything that can fail happens before the terminal is
    // taken over.
    let config = load_config(&args)?;
    let assets = load_assets(&config).context("boot stage failed")?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(seed = ?args.seed, log = %log_path.display(), "handing off to gameplay");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut state = init_state(config.rules(), &mut rng);
    let result = game_loop(&mut out, &mut state, &assets, &rx, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match &result {
        Ok(()) => tracing::info!(score = state.run.score, "quit"),
        Err(e) => tracing::error!(error = %e, "game loop failed"),
    }
    result.context("terminal I/O failed")
}
