//! # Deep Q-Learning Agent
//!
//! - **Policy selection**: epsilon-greedy with `epsilon = min(ln 2 / episode * 10000, 1)`,
//!   pure random play during the warm-up (`skip`) episodes
//! - **Online update**: one bootstrapped regression step per environment step
//! - **Experience replay**: per-sample fits on a batch drawn uniformly with replacement
//!
//! All approximator inputs are one-hot encoded states.

pub mod policy;

mod dqn;
pub use dqn::DeepQAgent;
