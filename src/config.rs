/// World geometry, tuning constants and the handful of runtime knobs.
///
/// The simulation runs in a fixed 350 x 600 world; the display layer scales
/// it onto whatever terminal it is given.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ── World ────────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f32 = 350.0;
pub const WORLD_HEIGHT: f32 = 600.0;
pub const TILE: f32 = 32.0;

/// Five tiles of ground along the bottom of the world.
pub const FLOOR_HEIGHT: f32 = TILE * 5.0;
pub const FLOOR_TOP: f32 = WORLD_HEIGHT - FLOOR_HEIGHT;
/// The floor sprite is fifteen tiles wide and overhangs the right edge.
pub const FLOOR_WIDTH: f32 = TILE * 15.0;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = TILE;
pub const PLAYER_HEIGHT: f32 = TILE * 2.0;
/// Horizontal displacement per tick while a direction key is held.
pub const PLAYER_SPEED: f32 = 8.0;

// ── Apples ───────────────────────────────────────────────────────────────────

pub const APPLE_SIZE: f32 = TILE;
pub const APPLE_SPAWN_Y: f32 = -50.0;
pub const APPLE_SPAWN_MIN_X: i32 = 50;
pub const POOL_SIZE: usize = 3;

// ── Session ──────────────────────────────────────────────────────────────────

pub const MAX_LIVES: u32 = 3;
pub const MIN_SPEED: f32 = 1.0;
pub const MAX_SPEED: f32 = 6.0;
/// Step applied by the `+` / `-` keys.
pub const SPEED_STEP: f32 = 0.5;
/// Speed gained per catch under [`SpeedPolicy::AutoRamp`].
pub const CATCH_SPEED_BONUS: f32 = 0.1;
/// Under [`SpeedPolicy::AutoRamp`] each spawn adds a random `0..=SPAWN_SPREAD`
/// on top of the global speed.
pub const SPAWN_SPREAD: i32 = 2;

// ── Loop ─────────────────────────────────────────────────────────────────────

/// 60 Hz.
pub const TICK: Duration = Duration::from_micros(16_667);

/// How the global fall speed evolves during a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpeedPolicy {
    /// Speed only changes through difficulty selection and `+` / `-`.
    #[default]
    Manual,
    /// Every catch adds `CATCH_SPEED_BONUS`, capped at `MAX_SPEED`.  Apples
    /// spawn with some spread and the manual speed keys are ignored.
    AutoRamp,
}

/// Per-session rules that are fixed once the session starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rules {
    pub speed_policy: SpeedPolicy,
}

impl Rules {
    pub fn auto_ramp() -> Self {
        Rules {
            speed_policy: SpeedPolicy::AutoRamp,
        }
    }
}

pub const SETTINGS_ENV_VAR: &str = "APPLE_CATCH_SETTINGS";

/// Where the settings record lives: `$APPLE_CATCH_SETTINGS`, else a dotfile in
/// `$HOME`, else the working directory.
pub fn settings_path() -> PathBuf {
    if let Ok(explicit) = std::env::var(SETTINGS_ENV_VAR) {
        if !explicit.is_empty() {
            return PathBuf::from(explicit);
        }
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".apple_catch_settings.json")
}

/// Log file used by the binary; stderr is hidden behind the alternate screen.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("apple_catch.log")
}

/// Opens the log for a new session.  Whatever the previous run wrote is
/// discarded.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    File::create(path)
}
