use ndarray::array;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::agent::policy::{decay_epsilon, explore, in_warm_up};
use crate::agent::DeepQAgent;
use crate::environment::Discrete;
use crate::tests::support::{test_config, TableApproximator};

#[test]
fn test_decay_clamped_at_start() {
    assert_eq!(decay_epsilon(1).unwrap(), 1.0);
    assert_eq!(decay_epsilon(6931).unwrap(), 1.0);
    assert!(decay_epsilon(6932).unwrap() < 1.0);
}

#[test]
fn test_decay_rejects_episode_zero() {
    assert!(decay_epsilon(0).is_err());
}

#[test]
fn test_decay_values() {
    let expected = (std::f64::consts::LN_2 / 100_000.0 * 10_000.0) as f32;
    assert!((decay_epsilon(100_000).unwrap() - expected).abs() < 1e-6);
    assert!(decay_epsilon(1_000_000_000).unwrap() > 0.0);
}

#[test]
fn test_decay_non_increasing() {
    let mut previous = decay_epsilon(1).unwrap();
    for episode in (1..200_000).step_by(97) {
        let epsilon = decay_epsilon(episode).unwrap();
        assert!(epsilon <= previous);
        assert!((0.0..=1.0).contains(&epsilon));
        previous = epsilon;
    }
}

#[test]
fn test_warm_up_boundary() {
    assert!(in_warm_up(1000, 1000));
    assert!(!in_warm_up(1001, 1000));
    assert!(!in_warm_up(1, 0));
}

#[test]
fn test_explore_extremes() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        assert!(explore(1.0, &mut rng));
        assert!(!explore(0.0, &mut rng));
    }
}

#[test]
fn test_warm_up_never_queries_approximator() {
    let approximator = TableApproximator::zeros(16, 4);
    let mut agent = DeepQAgent::new(approximator, Discrete::new(16), Discrete::new(4), &test_config(10)).unwrap();

    for episode in 1..=10 {
        for state in 0..16 {
            let action = agent.select_action(state, episode).unwrap();
            assert!(action < 4);
        }
    }
    assert_eq!(agent.approximator.predict_calls.get(), 0);
}

#[test]
fn test_exploitation_picks_argmax() {
    let table = array![[0.1, 0.9, 0.3], [0.5, 0.2, 0.7]];
    let approximator = TableApproximator::from_table(table);
    let mut agent = DeepQAgent::new(approximator, Discrete::new(2), Discrete::new(3), &test_config(0)).unwrap();

    // epsilon is ~7e-9 this far out
    let episode = 1_000_000_000_000;
    assert_eq!(agent.select_action(0, episode).unwrap(), 1);
    assert_eq!(agent.select_action(1, episode).unwrap(), 2);
    assert!(agent.epsilon < 1e-6);
    assert!(agent.approximator.predict_calls.get() >= 2);
}

#[test]
fn test_greedy_ties_go_to_first_index() {
    let table = array![[0.5, 0.5, 0.5, 0.5], [0.0, 0.8, 0.8, 0.1]];
    let approximator = TableApproximator::from_table(table);
    let agent = DeepQAgent::new(approximator, Discrete::new(2), Discrete::new(4), &test_config(0)).unwrap();

    assert_eq!(agent.greedy_action(0).unwrap(), 0);
    assert_eq!(agent.greedy_action(1).unwrap(), 1);
}

#[test]
fn test_select_action_rejects_out_of_range_state() {
    let approximator = TableApproximator::zeros(4, 2);
    let agent = DeepQAgent::new(approximator, Discrete::new(4), Discrete::new(2), &test_config(0)).unwrap();
    assert!(agent.greedy_action(4).is_err());
}
