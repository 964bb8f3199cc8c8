/// Keyboard handling: key → command mapping and held-key tracking.
///
/// The game loop feeds every crossterm key event into a [`KeyTracker`] and
/// asks it once per tick for an [`InputSnapshot`], which is all the update
/// code ever sees of the keyboard.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Difficulty;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many ticks.  Terminals without release reporting only send repeated
/// presses, at ≥ 15 Hz, so 8 ticks (≈133 ms at 60 Hz) is always refreshed
/// before it lapses.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Space: start from the title screen or restart after game over.
    Start,
    TogglePause,
    ToggleMute,
    SpeedUp,
    SpeedDown,
    SelectDifficulty(Difficulty),
    Quit,
}

/// Everything the update step needs to know about the keyboard for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    /// One-shot commands pressed since the previous tick, in arrival order.
    pub commands: Vec<Command>,
}

impl InputSnapshot {
    pub fn with_commands(commands: &[Command]) -> Self {
        InputSnapshot {
            commands: commands.to_vec(),
            ..Default::default()
        }
    }

    pub fn holding(left: bool, right: bool) -> Self {
        InputSnapshot {
            left,
            right,
            commands: Vec::new(),
        }
    }
}

pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char(' ') => Some(Command::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::ToggleMute),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::SpeedUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Command::SpeedDown),
        KeyCode::Char('1') => Some(Command::SelectDifficulty(Difficulty::Easy)),
        KeyCode::Char('2') => Some(Command::SelectDifficulty(Difficulty::Medium)),
        KeyCode::Char('3') => Some(Command::SelectDifficulty(Difficulty::Hard)),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

fn is_left(code: &KeyCode) -> bool {
    matches!(code, KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A'))
}

fn is_right(code: &KeyCode) -> bool {
    matches!(code, KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D'))
}

/// Accumulates key events between ticks.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper `Press` /
///   `Repeat` / `Release` events, so keys are dropped on release.
/// * **Classic terminals**: only `Press` events; keys expire after
///   `HOLD_WINDOW` ticks of silence.
#[derive(Debug, Default)]
pub struct KeyTracker {
    last_seen: HashMap<KeyCode, u64>,
    pending: Vec<Command>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: KeyEvent, frame: u64) {
        match event.kind {
            KeyEventKind::Press => {
                self.last_seen.insert(event.code, frame);
                if let Some(cmd) = map_key(event.code, event.modifiers) {
                    self.pending.push(cmd);
                }
            }
            // Repeats keep movement alive but never re-trigger commands.
            KeyEventKind::Repeat => {
                self.last_seen.insert(event.code, frame);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&event.code);
            }
        }
    }

    fn held(&self, frame: u64, pred: fn(&KeyCode) -> bool) -> bool {
        self.last_seen
            .iter()
            .any(|(code, &seen)| pred(code) && frame.saturating_sub(seen) <= HOLD_WINDOW)
    }

    /// Build this tick's snapshot and clear the queued commands.
    pub fn snapshot(&mut self, frame: u64) -> InputSnapshot {
        InputSnapshot {
            left: self.held(frame, is_left),
            right: self.held(frame, is_right),
            commands: std::mem::take(&mut self.pending),
        }
    }
}
