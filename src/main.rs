mod display;

use std::io::{stdout, BufWriter, Stdout, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};
use rand::thread_rng;

use apple_catch::audio::Mixer;
use apple_catch::compute::{init_state, step};
use apple_catch::config::{self, Rules, TICK};
use apple_catch::entities::GameState;
use apple_catch::input::KeyTracker;
use apple_catch::settings::Settings;

use display::Viewport;

// ── Logging ───────────────────────────────────────────────────────────────────

/// Logs go to a file: anything written to stderr would land on top of the
/// alternate screen.  `RUST_LOG` overrides the default `info` level.
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match config::open_log_file(&config::log_path()) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    let _ = builder.try_init();
}

fn persist(settings: &Settings, path: &Path) {
    if let Err(e) = settings.save(path) {
        log::warn!("could not save settings: {e}");
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit command; returns the final state so the caller can
/// flush settings.
///
/// Input model: key events are drained into a `KeyTracker` every tick, which
/// turns them into one `InputSnapshot` (held directions plus the one-shot
/// commands pressed since the last tick).  The update step never touches the
/// keyboard directly.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    rx: &mpsc::Receiver<Event>,
    settings_path: &Path,
) -> std::io::Result<GameState> {
    let mut rng = thread_rng();
    let mut keys = KeyTracker::new();
    let mut mixer = Mixer::default();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key) = ev {
                keys.record(key, frame);
            }
        }
        let input = keys.snapshot(frame);

        let (next, events) = step(&state, &input, &mut rng);
        state = next;

        mixer.set_muted(state.settings.mute);
        for &sound in &events.sounds {
            mixer.play(out, sound)?;
        }
        if events.settings_changed {
            persist(&state.settings, settings_path);
        }
        if events.quit {
            return Ok(state);
        }

        let (cols, rows) = terminal::size()?;
        display::render(out, &state, Viewport { cols, rows })?;

        // Late frames just start the next tick late.
        let elapsed = frame_start.elapsed();
        if elapsed < TICK {
            thread::sleep(TICK - elapsed);
        }
    }
}

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Raw mode plus the alternate screen for as long as the value lives.  The
/// terminal is handed back on `end`, or on drop if the game bails out early.
struct Terminal {
    out: BufWriter<Stdout>,
    release_events: bool,
    active: bool,
}

impl Terminal {
    fn begin() -> Result<Self> {
        terminal::enable_raw_mode().context("could not put the terminal in raw mode")?;
        let mut term = Terminal {
            out: BufWriter::new(stdout()),
            release_events: false,
            active: true,
        };
        execute!(term.out, terminal::EnterAlternateScreen, cursor::Hide)
            .context("could not enter the alternate screen")?;

        // Without release events held keys fall back to the repeat window.
        term.release_events = execute!(
            term.out,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .is_ok();
        log::debug!("key release events: {}", term.release_events);
        Ok(term)
    }

    fn end(&mut self) -> std::io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        if self.release_events {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.end();
    }
}

/// Blocking reads happen on their own thread so a tick never waits on the
/// keyboard.
fn spawn_input_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::error!("input thread stopped: {e}");
                break;
            }
        }
    });
    rx
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging();
    log::info!("apple catch starting");

    let mut term = Terminal::begin()?;
    let rx = spawn_input_reader();
    let result = run(&mut term.out, &rx);
    let restored = term.end().context("could not restore the terminal");

    if let Err(e) = &result {
        log::error!("exiting on error: {e:#}");
    }
    result.and(restored)
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<()> {
    let settings_path = config::settings_path();
    let settings = Settings::load(&settings_path);
    let state = init_state(settings, Rules::default(), &mut thread_rng());

    let last = game_loop(out, state, rx, &settings_path).context("game loop failed")?;

    persist(&last.settings, &settings_path);
    log::info!(
        "quit with score {} (best {})",
        last.score,
        last.high_score
    );
    Ok(())
}
