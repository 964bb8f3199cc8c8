//! Session invariants under arbitrary input sequences.

use apple_catch::compute::*;
use apple_catch::config::*;
use apple_catch::entities::*;
use apple_catch::input::{Command, InputSnapshot};
use apple_catch::settings::Settings;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Start),
        Just(Command::TogglePause),
        Just(Command::ToggleMute),
        Just(Command::SpeedUp),
        Just(Command::SpeedDown),
        Just(Command::SelectDifficulty(Difficulty::Easy)),
        Just(Command::SelectDifficulty(Difficulty::Medium)),
        Just(Command::SelectDifficulty(Difficulty::Hard)),
    ]
}

fn snapshot() -> impl Strategy<Value = InputSnapshot> {
    (
        any::<bool>(),
        any::<bool>(),
        prop::collection::vec(command(), 0..2),
    )
        .prop_map(|(left, right, commands)| InputSnapshot {
            left,
            right,
            commands,
        })
}

fn any_rules() -> impl Strategy<Value = Rules> {
    prop_oneof![Just(Rules::default()), Just(Rules::auto_ramp())]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_every_tick(
        seed in any::<u64>(),
        rules in any_rules(),
        inputs in prop::collection::vec(snapshot(), 1..600),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = init_state(Settings::default(), rules, &mut rng);
        let mut best = 0;

        for input in &inputs {
            let (next, events) = step(&state, input, &mut rng);

            prop_assert!(next.lives <= MAX_LIVES);
            prop_assert!(next.settings.speed >= MIN_SPEED);
            prop_assert!(next.settings.speed <= MAX_SPEED);
            prop_assert_eq!(next.apples.len(), POOL_SIZE);
            prop_assert!(next.high_score >= best);
            prop_assert!(next.high_score >= next.score);
            prop_assert!(next.player.x >= 0.0);
            prop_assert!(next.player.x <= WORLD_WIDTH - PLAYER_WIDTH);
            for a in &next.apples {
                prop_assert!(a.speed <= MAX_SPEED);
            }
            if rules.speed_policy == SpeedPolicy::AutoRamp {
                prop_assert!(next.settings.speed >= state.settings.speed);
                prop_assert!(!events.settings_changed || next.settings.mute != state.settings.mute);
            }

            let entered_game_over =
                state.phase != Phase::GameOver && next.phase == Phase::GameOver;
            let alerts = events.sounds.iter().filter(|s| **s == Sound::GameOver).count();
            prop_assert_eq!(alerts, usize::from(entered_game_over));
            if next.phase == Phase::GameOver {
                prop_assert_eq!(next.lives, 0);
            }

            best = next.high_score;
            state = next;
        }
    }

    #[test]
    fn every_reset_starts_a_clean_round(
        seed in any::<u64>(),
        score in 0u32..1000,
        lives in 0u32..=MAX_LIVES,
        high in 0u32..1000,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = init_state(Settings::default(), Rules::default(), &mut rng);
        state.phase = Phase::GameOver;
        state.score = score;
        state.lives = lives;
        state.high_score = high.max(score);

        let r = reset(&state, &mut rng);
        prop_assert_eq!(r.phase, Phase::Playing);
        prop_assert_eq!(r.score, 0);
        prop_assert_eq!(r.lives, MAX_LIVES);
        prop_assert_eq!(r.apples.len(), POOL_SIZE);
        prop_assert_eq!(r.high_score, state.high_score);
        for a in &r.apples {
            prop_assert_eq!(a.y, APPLE_SPAWN_Y);
            prop_assert!(a.x >= 50.0 && a.x <= WORLD_WIDTH - APPLE_SIZE);
        }
    }

    #[test]
    fn player_never_leaves_the_world(
        start in 0.0f32..=(WORLD_WIDTH - PLAYER_WIDTH),
        moves in prop::collection::vec((any::<bool>(), any::<bool>()), 0..100),
    ) {
        let mut p = Player { x: start };
        for (left, right) in moves {
            p = p.moved(left, right);
            prop_assert!(p.x >= 0.0 && p.x <= WORLD_WIDTH - PLAYER_WIDTH);
        }
    }
}
