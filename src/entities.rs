/// All game entity types, plus the small geometric helpers they need.

use serde::{Deserialize, Serialize};

use crate::config::{
    APPLE_SIZE, FLOOR_HEIGHT, FLOOR_TOP, FLOOR_WIDTH, PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH,
    POOL_SIZE, Rules, WORLD_WIDTH,
};
use crate::settings::Settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Fall speed the preset selects.
    pub fn base_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 2.0,
            Difficulty::Medium => 3.0,
            Difficulty::Hard => 5.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Catch,
    GameOver,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in world units; `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Touching edges count as overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

pub fn floor_rect() -> Rect {
    Rect::new(0.0, FLOOR_TOP, FLOOR_WIDTH, FLOOR_HEIGHT)
}

// ── Player & apples ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    /// Left edge. The vertical position never changes.
    pub x: f32,
}

impl Player {
    pub const Y: f32 = FLOOR_TOP - PLAYER_HEIGHT;

    pub fn centred() -> Self {
        Player {
            x: WORLD_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, Self::Y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// One tick of movement. Holding both directions cancels out; the box
    /// never leaves the world horizontally.
    pub fn moved(&self, left: bool, right: bool) -> Player {
        let dir = match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Player {
            x: (self.x + dir * PLAYER_SPEED).clamp(0.0, WORLD_WIDTH - PLAYER_WIDTH),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Apple {
    pub x: f32,
    pub y: f32,
    /// Fixed for the apple's lifetime; picked up from the global speed at spawn.
    pub speed: f32,
}

impl Apple {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, APPLE_SIZE, APPLE_SIZE)
    }

    pub fn advanced(&self) -> Apple {
        Apple {
            y: self.y + self.speed,
            ..*self
        }
    }
}

/// Fixed set of apple slots. Apples are replaced in place, never added or
/// removed.
pub type ApplePool = [Apple; POOL_SIZE];

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session.  `Clone` so the pure update functions can return a
/// new copy without touching the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub phase: Phase,
    pub player: Player,
    pub apples: ApplePool,
    pub score: u32,
    /// Best score seen this process; survives resets.
    pub high_score: u32,
    pub lives: u32,
    pub settings: Settings,
    pub rules: Rules,
    pub frame: u64,
}
