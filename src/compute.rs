/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG; sounds, quit
/// requests and settings changes are reported back through `StepEvents` for
/// the game loop to act on.

use rand::Rng;

use crate::config::{
    APPLE_SIZE, APPLE_SPAWN_MIN_X, APPLE_SPAWN_Y, CATCH_SPEED_BONUS, MAX_LIVES, MAX_SPEED, Rules,
    SPAWN_SPREAD, SpeedPolicy, WORLD_WIDTH,
};
use crate::entities::{floor_rect, Apple, ApplePool, GameState, Phase, Player, Sound};
use crate::input::{Command, InputSnapshot};
use crate::settings::Settings;

/// What happened during a step that the outside world has to deal with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepEvents {
    pub sounds: Vec<Sound>,
    /// The settings record changed and should be written out.
    pub settings_changed: bool,
    pub quit: bool,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh apple at the spawn height, x drawn from `[50, width - size]`.
pub fn spawn_apple(speed: f32, rng: &mut impl Rng) -> Apple {
    let max_x = (WORLD_WIDTH - APPLE_SIZE) as i32;
    Apple {
        x: rng.gen_range(APPLE_SPAWN_MIN_X..=max_x) as f32,
        y: APPLE_SPAWN_Y,
        speed,
    }
}

/// Fall speed for a new apple.  Manual sessions use the global speed as is;
/// auto-ramp sessions vary each apple upwards from it.
pub fn spawn_speed(rules: Rules, speed: f32, rng: &mut impl Rng) -> f32 {
    match rules.speed_policy {
        SpeedPolicy::Manual => speed,
        SpeedPolicy::AutoRamp => (speed + rng.gen_range(0..=SPAWN_SPREAD) as f32).min(MAX_SPEED),
    }
}

pub fn respawn(rules: Rules, speed: f32, rng: &mut impl Rng) -> Apple {
    let speed = spawn_speed(rules, speed, rng);
    spawn_apple(speed, rng)
}

pub fn spawn_pool(rules: Rules, speed: f32, rng: &mut impl Rng) -> ApplePool {
    std::array::from_fn(|_| respawn(rules, speed, rng))
}

/// Session as it looks on the title screen.
pub fn init_state(settings: Settings, rules: Rules, rng: &mut impl Rng) -> GameState {
    let settings = settings.sanitized();
    GameState {
        phase: Phase::NotStarted,
        player: Player::centred(),
        apples: spawn_pool(rules, settings.speed, rng),
        score: 0,
        high_score: 0,
        lives: MAX_LIVES,
        settings,
        rules,
        frame: 0,
    }
}

/// Start a new round.  High score, settings and rules carry over.
pub fn reset(state: &GameState, rng: &mut impl Rng) -> GameState {
    GameState {
        phase: Phase::Playing,
        player: Player::centred(),
        apples: spawn_pool(state.rules, state.settings.speed, rng),
        score: 0,
        lives: MAX_LIVES,
        ..state.clone()
    }
}

// ── Commands ─────────────────────────────────────────────────────────────────

/// Apply one keyboard command.  Commands that are not live in the current
/// phase leave the state untouched, and so do the speed keys in an
/// auto-ramp session.
pub fn apply_command(
    state: &GameState,
    cmd: Command,
    rng: &mut impl Rng,
    events: &mut StepEvents,
) -> GameState {
    let settings = match (state.phase, cmd) {
        (_, Command::Quit) => {
            events.quit = true;
            return state.clone();
        }
        (Phase::NotStarted | Phase::GameOver, Command::Start) => {
            log::info!("round started (speed {:.1})", state.settings.speed);
            return reset(state, rng);
        }
        (Phase::Playing, Command::TogglePause) => {
            return GameState {
                phase: Phase::Paused,
                ..state.clone()
            };
        }
        (Phase::Paused, Command::TogglePause) => {
            return GameState {
                phase: Phase::Playing,
                ..state.clone()
            };
        }
        (Phase::Playing, Command::SpeedUp | Command::SpeedDown | Command::SelectDifficulty(_))
            if state.rules.speed_policy == SpeedPolicy::AutoRamp =>
        {
            log::trace!("ignoring {cmd:?} under auto-ramp");
            return state.clone();
        }
        (Phase::Playing, Command::ToggleMute) => state.settings.toggled_mute(),
        (Phase::Playing, Command::SpeedUp) => state.settings.speed_up(),
        (Phase::Playing, Command::SpeedDown) => state.settings.speed_down(),
        (Phase::Playing, Command::SelectDifficulty(d)) => state.settings.with_difficulty(d),
        (phase, cmd) => {
            log::trace!("ignoring {cmd:?} while {phase:?}");
            return state.clone();
        }
    };

    if settings != state.settings {
        events.settings_changed = true;
    }
    GameState {
        settings,
        ..state.clone()
    }
}

// ── Per-tick update ──────────────────────────────────────────────────────────

/// Move the player from the held keys and let every apple fall one tick.
pub fn advance(state: &GameState, input: &InputSnapshot) -> GameState {
    GameState {
        player: state.player.moved(input.left, input.right),
        apples: state.apples.map(|a| a.advanced()),
        ..state.clone()
    }
}

/// Floor and catch checks for every slot, in pool order.  The floor is
/// tested first, so an apple touching both floor and player is a miss.
pub fn resolve_collisions(
    state: &GameState,
    rng: &mut impl Rng,
    events: &mut StepEvents,
) -> GameState {
    let mut next = state.clone();
    let floor = floor_rect();
    let catcher = next.player.rect();

    for slot in 0..next.apples.len() {
        let bounds = next.apples[slot].rect();

        if bounds.intersects(&floor) {
            next.apples[slot] = respawn(next.rules, next.settings.speed, rng);
            next.lives = next.lives.saturating_sub(1);
            if next.lives == 0 {
                log::info!("game over, score {}", next.score);
                next.phase = Phase::GameOver;
                events.sounds.push(Sound::GameOver);
                break;
            }
        } else if bounds.intersects(&catcher) {
            next.apples[slot] = respawn(next.rules, next.settings.speed, rng);
            next.score += 1;
            next.high_score = next.high_score.max(next.score);
            if next.rules.speed_policy == SpeedPolicy::AutoRamp {
                next.settings.speed = (next.settings.speed + CATCH_SPEED_BONUS).min(MAX_SPEED);
            }
            events.sounds.push(Sound::Catch);
        }
    }

    next
}

/// Advance the whole session by one tick.  All randomness comes through
/// `rng` so callers control determinism (tests use a seeded RNG).
pub fn step(
    state: &GameState,
    input: &InputSnapshot,
    rng: &mut impl Rng,
) -> (GameState, StepEvents) {
    let mut events = StepEvents::default();
    let mut next = state.clone();

    for &cmd in &input.commands {
        next = apply_command(&next, cmd, rng, &mut events);
        if events.quit {
            return (next, events);
        }
    }

    if next.phase == Phase::Playing {
        next = advance(&next, input);
        next = resolve_collisions(&next, rng, &mut events);
        next.frame += 1;
    }

    (next, events)
}
