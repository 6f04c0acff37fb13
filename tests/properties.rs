use centipede::consts::*;
use centipede::sim::{Centipede, GamePhase, GameState, Mushroom, Segment, TickInput, tick};
use glam::Vec2;
use proptest::prelude::*;

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>()).prop_map(|(left, right)| TickInput { left, right })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ship_stays_on_screen(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..400),
    ) {
        let mut state = GameState::new(seed);
        state.start_game();
        for input in &inputs {
            tick(&mut state, input, SIM_DT);
            prop_assert!(state.ship.pos.x >= 0.0);
            prop_assert!(state.ship.pos.x <= WINDOW_WIDTH - SHIP_WIDTH);
        }
    }

    #[test]
    fn mushroom_removed_exactly_at_zero_hp(hits in 0usize..6) {
        let mut state = GameState::new(1);
        state.start_game();
        state.mushrooms = vec![Mushroom::new(Vec2::new(384.0, 320.0))];
        state.centipede = Centipede::default();
        state.centipede.segments.push(Segment::new(Vec2::new(0.0, 0.0)));

        for n in 1..=hits {
            let had_mushroom = !state.mushrooms.is_empty();
            state.bullets.clear();
            state.fire_bullet(Vec2::new(390.0, 340.0));
            tick(&mut state, &TickInput::default(), SIM_DT);

            // A bullet is consumed only when something was there to hit
            prop_assert_eq!(state.bullets.is_empty(), had_mushroom);

            let expected_hp = MUSHROOM_HP.saturating_sub(n as u8);
            if expected_hp == 0 {
                prop_assert!(state.mushrooms.is_empty());
            } else {
                prop_assert_eq!(state.mushrooms.len(), 1);
                prop_assert_eq!(state.mushrooms[0].hp, expected_hp);
            }
        }
        prop_assert!(state.mushrooms.iter().all(|m| m.hp > 0));
        let destroyed = hits >= MUSHROOM_HP as usize;
        prop_assert_eq!(state.score, if destroyed { MUSHROOM_POINTS } else { 0 });
    }

    #[test]
    fn body_trails_one_step_behind(seed in any::<u64>(), steps in 1usize..600) {
        let mut state = GameState::new(seed);
        state.start_game();
        for _ in 0..steps {
            if state.phase != GamePhase::Playing {
                break;
            }
            let before: Vec<Vec2> = state.centipede.segments.iter().map(|s| s.pos).collect();
            tick(&mut state, &TickInput::default(), SIM_DT);
            let after = &state.centipede.segments;
            prop_assert_eq!(after.len(), before.len());
            for i in 1..after.len() {
                prop_assert_eq!(after[i].pos, before[i - 1]);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn game_over_on_the_frame_the_head_hits_bottom(seed in any::<u64>()) {
        let mut state = GameState::new(seed);
        state.start_game();

        for _ in 0..20_000 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            let head_y = state.centipede.head().map(|h| h.pos.y).unwrap_or(0.0);
            let at_bottom = head_y >= WINDOW_HEIGHT - TILE_SIZE;
            prop_assert_eq!(at_bottom, state.phase == GamePhase::GameOver);
            if at_bottom {
                break;
            }
        }
        prop_assert_eq!(state.phase, GamePhase::GameOver);
    }
}
