use apple_catch::entities::Difficulty;
use apple_catch::input::*;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
}

fn repeat(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat)
}

fn release(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
}

#[test]
fn keys_map_to_commands() {
    let none = KeyModifiers::NONE;
    assert_eq!(map_key(KeyCode::Char(' '), none), Some(Command::Start));
    assert_eq!(map_key(KeyCode::Char('p'), none), Some(Command::TogglePause));
    assert_eq!(map_key(KeyCode::Char('m'), none), Some(Command::ToggleMute));
    assert_eq!(map_key(KeyCode::Char('+'), none), Some(Command::SpeedUp));
    assert_eq!(map_key(KeyCode::Char('='), none), Some(Command::SpeedUp));
    assert_eq!(map_key(KeyCode::Char('-'), none), Some(Command::SpeedDown));
    assert_eq!(
        map_key(KeyCode::Char('1'), none),
        Some(Command::SelectDifficulty(Difficulty::Easy))
    );
    assert_eq!(
        map_key(KeyCode::Char('2'), none),
        Some(Command::SelectDifficulty(Difficulty::Medium))
    );
    assert_eq!(
        map_key(KeyCode::Char('3'), none),
        Some(Command::SelectDifficulty(Difficulty::Hard))
    );
    assert_eq!(map_key(KeyCode::Char('q'), none), Some(Command::Quit));
    assert_eq!(map_key(KeyCode::Esc, none), Some(Command::Quit));
    assert_eq!(
        map_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        Some(Command::Quit)
    );
    assert_eq!(map_key(KeyCode::Char('c'), none), None);
    assert_eq!(map_key(KeyCode::Left, none), None);
}

#[test]
fn commands_are_consumed_once() {
    let mut keys = KeyTracker::new();
    keys.record(press(KeyCode::Char('p')), 1);
    keys.record(press(KeyCode::Char('m')), 1);

    let snap = keys.snapshot(1);
    assert_eq!(snap.commands, vec![Command::TogglePause, Command::ToggleMute]);
    assert!(keys.snapshot(2).commands.is_empty());
}

#[test]
fn repeats_do_not_retrigger_commands() {
    let mut keys = KeyTracker::new();
    keys.record(press(KeyCode::Char('+')), 1);
    keys.record(repeat(KeyCode::Char('+')), 2);
    keys.record(repeat(KeyCode::Char('+')), 3);
    assert_eq!(keys.snapshot(3).commands, vec![Command::SpeedUp]);
}

#[test]
fn direction_held_until_release() {
    let mut keys = KeyTracker::new();
    keys.record(press(KeyCode::Left), 1);
    let snap = keys.snapshot(2);
    assert!(snap.left && !snap.right);

    keys.record(release(KeyCode::Left), 3);
    assert!(!keys.snapshot(3).left);
}

#[test]
fn direction_expires_without_release_events() {
    let mut keys = KeyTracker::new();
    keys.record(press(KeyCode::Char('d')), 10);
    assert!(keys.snapshot(10 + HOLD_WINDOW).right);
    assert!(!keys.snapshot(11 + HOLD_WINDOW).right);

    // Repeats keep it alive.
    keys.record(repeat(KeyCode::Char('d')), 20);
    assert!(keys.snapshot(20 + HOLD_WINDOW).right);
}

#[test]
fn both_directions_can_be_held() {
    let mut keys = KeyTracker::new();
    keys.record(press(KeyCode::Char('a')), 1);
    keys.record(press(KeyCode::Right), 1);
    let snap = keys.snapshot(1);
    assert!(snap.left && snap.right);
}
