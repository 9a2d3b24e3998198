mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use zombie_land::audio::AudioManager;
use zombie_land::compute::{apply_command, init_state, tick};
use zombie_land::config::GameConfig;
use zombie_land::entities::Mode;
use zombie_land::error::GameError;
use zombie_land::input::{key_action, KeyAction, KeyTracker};

/// Environment variable overriding the log file location.
const LOG_ENV: &str = "ZOMBIE_LAND_LOG";
const DEFAULT_LOG_FILE: &str = "zombie_land.log";

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode on the alternate screen, so log lines go to
/// a file instead of stderr.  If the file cannot be created logging stays off.
fn init_logging() {
    let path = std::env::var_os(LOG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let file = match File::create(&path) {
        Ok(f) => f,
        Err(_) => return,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

// ── FPS ───────────────────────────────────────────────────────────────────────

/// Frames counted over roughly one second.
struct FpsCounter {
    frames: u32,
    since: Instant,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        FpsCounter {
            frames: 0,
            since: Instant::now(),
            fps: 0.0,
        }
    }

    fn frame(&mut self) {
        self.frames += 1;
        let elapsed = self.since.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            self.fps = self.frames as f32 / elapsed;
            self.frames = 0;
            self.since = Instant::now();
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit key is pressed.
///
/// One frame: drain pending terminal events (held-key updates and one-shot
/// commands), simulate when playing, play the frame's sound cues, render,
/// then sleep off the rest of the frame budget.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
) -> std::io::Result<()> {
    let frame_budget = Duration::from_secs_f64(1.0 / config.frame_rate.max(1) as f64);
    let audio = AudioManager::new(config.audio.clone());
    let mut state = init_state(config);
    let mut keys = KeyTracker::new();
    let mut fps = FpsCounter::new();
    let mut rng = thread_rng();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key) = ev else { continue };
            let ready = keys.accepts_command(&key, frame);
            keys.record(&key, frame);
            match key_action(&key, state.mode) {
                KeyAction::Quit => return Ok(()),
                KeyAction::Command(command) if ready => {
                    let before = state.mode;
                    state = apply_command(&state, command);
                    if state.mode != before {
                        keys.settle(frame);
                    }
                }
                KeyAction::Command(_) | KeyAction::None => {}
            }
        }

        // ── Simulate ──────────────────────────────────────────────────────────
        if state.mode == Mode::Playing {
            state = tick(&state, &keys.sample(frame), &mut rng);
            audio.play_events(out, &state.events)?;
            if state.mode != Mode::Playing {
                keys.settle(frame);
            }
        }

        display::render(out, &state, fps.fps)?;
        fps.frame();

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    init_logging();
    log::info!("Zombie Land starting...");

    let (config, source) = GameConfig::load().map_err(|e| {
        log::error!("{}", e);
        e
    })?;
    match &source {
        Some(path) => log::info!("config loaded from {}", path.display()),
        None => log::info!("using built-in config"),
    }

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    log::info!("keyboard enhancement: {}", keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &rx, config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result {
        Ok(()) => {
            log::info!("Zombie Land exiting");
            Ok(())
        }
        Err(e) => {
            log::error!("terminal error: {}", e);
            Err(GameError::from(e))
        }
    }
}
