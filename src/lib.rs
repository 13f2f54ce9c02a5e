//! # frozen-dqn - Deep Q-Learning for Discrete Grid Worlds
//!
//! A Deep Q-Learning agent for environments with a discrete observation space
//! and a discrete action space, such as FrozenLake. States are one-hot encoded
//! and fed to a small feed-forward network acting as a Q-table surrogate.
//!
//! ## Key Features
//!
//! - **Epsilon-greedy exploration** with `epsilon = min(ln 2 / episode * 10000, 1)`
//!   and a random-play warm-up period
//! - **Online Q-learning updates** after every step
//! - **Experience replay** from a bounded FIFO memory sampled uniformly with replacement
//! - **Periodic greedy evaluation**
//! - **FrozenLake** 4x4 / 8x8 / custom maps, slippery or not, with time-limit truncation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use frozen_dqn::config::DeepQConfig;
//! use frozen_dqn::environment::{FrozenLake, FrozenLakeConfig};
//! use frozen_dqn::trainer::Trainer;
//!
//! let env = FrozenLake::new(&FrozenLakeConfig::default()).unwrap();
//! let mut trainer = Trainer::from_config(env, DeepQConfig::default()).unwrap();
//! let summary = trainer.run().unwrap();
//! println!("total reward {}", summary.total_reward);
//! ```
//!
//! ## Module Organization
//!
//! - [`agent`] - policy selection, online update, experience replay
//! - [`approximator`] - the Q-function trait the agent trains
//! - [`config`] - run configuration and defaults
//! - [`encoding`] - one-hot state encoding and argmax helpers
//! - [`environment`] - environment trait, discrete spaces, FrozenLake
//! - [`error`] - error types and result handling
//! - [`evaluator`] - greedy test rollouts
//! - [`network`] - the default feed-forward approximator
//! - [`replay_buffer`] - bounded transition memory
//! - [`trainer`] - the episode driver

pub mod activations;
pub mod agent;
pub mod approximator;
pub mod config;
pub mod encoding;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod layers;
pub mod logging;
pub mod loss;
pub mod metrics;
pub mod network;
pub mod optimizer;
pub mod replay_buffer;
pub mod trainer;

#[cfg(test)]
mod tests;
