#[cfg(test)]
mod property_tests {
    use frozen_dqn::agent::policy::{decay_epsilon, in_warm_up};
    use frozen_dqn::config::DeepQConfig;
    use frozen_dqn::encoding::{argmax, one_hot};
    use frozen_dqn::replay_buffer::{ReplayMemory, Transition};
    use ndarray::Array1;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn values_strategy() -> impl Strategy<Value = Vec<f32>> {
        prop::collection::vec(-100.0f32..100.0, 1..=16)
    }

    proptest! {
        #[test]
        fn test_epsilon_stays_in_unit_interval(episode in 1usize..10_000_000) {
            let epsilon = decay_epsilon(episode).unwrap();
            prop_assert!(epsilon > 0.0 && epsilon <= 1.0);
            if episode <= 6931 {
                prop_assert_eq!(epsilon, 1.0);
            }
        }

        #[test]
        fn test_epsilon_never_increases(episode in 1usize..10_000_000, gap in 1usize..1000) {
            prop_assert!(decay_epsilon(episode + gap).unwrap() <= decay_epsilon(episode).unwrap());
        }

        #[test]
        fn test_warm_up_boundary(skip in 0usize..10_000, offset in 1usize..100) {
            prop_assert!(!in_warm_up(skip + offset, skip));
            if skip > 0 {
                prop_assert!(in_warm_up(skip, skip));
            }
        }

        #[test]
        fn test_one_hot_has_single_hot_coordinate(state_space in 1usize..256, seed in any::<usize>()) {
            let state = seed % state_space;
            let encoded = one_hot(state, state_space).unwrap();
            prop_assert_eq!(encoded.len(), state_space);
            prop_assert_eq!(encoded.sum(), 1.0);
            prop_assert_eq!(argmax(&encoded).unwrap(), state);
            prop_assert!(one_hot(state_space + seed % 4, state_space).is_err());
        }

        #[test]
        fn test_argmax_picks_first_maximum(values in values_strategy()) {
            let array = Array1::from_vec(values.clone());
            let idx = argmax(&array).unwrap();
            let max = values.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
            prop_assert_eq!(values[idx], max);
            prop_assert!(values[..idx].iter().all(|&v| v < max));
        }

        #[test]
        fn test_memory_keeps_most_recent_in_order(capacity in 1usize..64, pushes in 0usize..200) {
            let mut memory = ReplayMemory::new(capacity).unwrap();
            for i in 0..pushes {
                memory.push(Transition::observe(i, 0, 0.0, i + 1, false, usize::MAX));
            }
            prop_assert_eq!(memory.len(), pushes.min(capacity));
            let states: Vec<usize> = memory.iter().map(|t| t.state).collect();
            let expected: Vec<usize> = (pushes.saturating_sub(capacity)..pushes).collect();
            prop_assert_eq!(states, expected);
        }

        #[test]
        fn test_samples_come_from_memory(len in 1usize..50, batch in 0usize..100, seed in any::<u64>()) {
            let mut memory = ReplayMemory::new(64).unwrap();
            memory.extend((0..len).map(|i| Transition::observe(i, 1, 0.0, i, false, usize::MAX)));
            let mut rng = StdRng::seed_from_u64(seed);
            let sample = memory.sample(batch, &mut rng);
            prop_assert_eq!(sample.len(), batch);
            prop_assert!(sample.iter().all(|t| t.state < len));
        }

        #[test]
        fn test_batch_size_is_floor_of_half_capacity(past_games in 1usize..50, step_limit in 1usize..200) {
            let config = DeepQConfig { past_games, step_limit, ..DeepQConfig::default() };
            prop_assert_eq!(config.replay_capacity(), past_games * step_limit);
            prop_assert_eq!(config.batch_size(), past_games * step_limit / 2);
        }
    }
}
