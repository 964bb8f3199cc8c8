use std::fs;
use std::path::PathBuf;

use apple_catch::config::{MAX_SPEED, MIN_SPEED};
use apple_catch::entities::Difficulty;
use apple_catch::settings::{Settings, SettingsError};

/// Fresh scratch directory per test, cleared of leftovers from earlier runs.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("apple_catch_tests")
        .join(format!("{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn missing_file_yields_defaults() {
    let path = scratch("missing").join("settings.json");
    let s = Settings::load(&path);
    assert_eq!(
        s,
        Settings {
            speed: 3.0,
            difficulty: Difficulty::Medium,
            mute: false
        }
    );
    assert!(matches!(
        Settings::try_load(&path),
        Err(SettingsError::Io { .. })
    ));
}

#[test]
fn corrupt_file_yields_defaults() {
    let path = scratch("corrupt").join("settings.json");
    fs::write(&path, "{ speed: three").unwrap();
    assert_eq!(Settings::load(&path), Settings::default());
    assert!(matches!(
        Settings::try_load(&path),
        Err(SettingsError::Parse { .. })
    ));

    fs::write(&path, r#"{"speed": 3.0, "difficulty": "Brutal", "mute": false}"#).unwrap();
    assert_eq!(Settings::load(&path), Settings::default());
}

#[test]
fn save_then_load_preserves_record() {
    let path = scratch("roundtrip").join("settings.json");
    let s = Settings {
        speed: 4.5,
        difficulty: Difficulty::Hard,
        mute: true,
    };
    s.save(&path).unwrap();
    assert_eq!(Settings::load(&path), s);
}

#[test]
fn saved_file_uses_plain_field_names() {
    let path = scratch("format").join("settings.json");
    Settings::default().save(&path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(v["speed"], serde_json::json!(3.0));
    assert_eq!(v["difficulty"], "Medium");
    assert_eq!(v["mute"], false);
}

#[test]
fn save_replaces_previous_file_and_leaves_no_temp() {
    let dir = scratch("replace");
    let path = dir.join("settings.json");
    Settings::default().save(&path).unwrap();
    Settings::default().toggled_mute().save(&path).unwrap();

    assert!(Settings::load(&path).mute);
    let names: Vec<_> = fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("settings.json")]);
}

#[test]
fn save_creates_missing_directories() {
    let path = scratch("nested").join("a").join("b").join("settings.json");
    Settings::default().save(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn save_into_a_file_path_fails_cleanly() {
    let dir = scratch("blocked");
    let blocker = dir.join("not_a_dir");
    fs::write(&blocker, "x").unwrap();
    let err = Settings::default().save(&blocker.join("settings.json"));
    assert!(matches!(err, Err(SettingsError::Io { .. })));
}

#[test]
fn loaded_speed_is_clamped() {
    let path = scratch("clamp").join("settings.json");
    fs::write(&path, r#"{"speed": 99.0, "difficulty": "Easy", "mute": false}"#).unwrap();
    assert_eq!(Settings::load(&path).speed, MAX_SPEED);

    fs::write(&path, r#"{"speed": -4, "difficulty": "Easy", "mute": false}"#).unwrap();
    assert_eq!(Settings::load(&path).speed, MIN_SPEED);
}

#[test]
fn adjustments_respect_bounds() {
    let s = Settings::default();
    assert_eq!(s.speed_up().speed, 3.5);
    assert_eq!(s.speed_down().speed, 2.5);

    let mut top = s;
    for _ in 0..20 {
        top = top.speed_up();
    }
    assert_eq!(top.speed, MAX_SPEED);

    let mut bottom = s;
    for _ in 0..20 {
        bottom = bottom.speed_down();
    }
    assert_eq!(bottom.speed, MIN_SPEED);
}

#[test]
fn difficulty_selection_sets_preset_speed() {
    let s = Settings::default().speed_up().with_difficulty(Difficulty::Easy);
    assert_eq!(s.difficulty, Difficulty::Easy);
    assert_eq!(s.speed, Difficulty::Easy.base_speed());
    assert!(!s.mute);
}

#[test]
fn non_finite_speed_falls_back_to_difficulty() {
    let s = Settings {
        speed: f32::NAN,
        difficulty: Difficulty::Hard,
        mute: false,
    }
    .sanitized();
    assert_eq!(s.speed, Difficulty::Hard.base_speed());
}
