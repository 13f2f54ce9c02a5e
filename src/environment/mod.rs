//! # Environments
//!
//! The agent drives any type implementing [`Environment`]: a discrete observation
//! space, a discrete action space, `reset` and `step`. [`FrozenLake`] is the
//! bundled grid world.

mod frozen_lake;

pub use frozen_lake::{FrozenLake, FrozenLakeConfig, LakeMap, Tile};

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::Result;

/// A finite space `{0, 1, ..., n - 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrete {
    n: usize,
}

impl Discrete {
    pub fn new(n: usize) -> Self {
        Discrete { n }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn contains(&self, value: usize) -> bool {
        value < self.n
    }

    /// Uniform random draw from the space.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.n)
    }
}

/// Auxiliary information returned alongside a step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepInfo {
    /// Probability of the transition that actually happened.
    pub probability: f32,
    /// The episode ended because of the step limit rather than the task.
    pub truncated: bool,
}

/// Outcome of one environment step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub next_state: usize,
    pub reward: f32,
    pub done: bool,
    pub info: StepInfo,
}

pub trait Environment {
    fn observation_space(&self) -> Discrete;

    fn action_space(&self) -> Discrete;

    /// Start a new episode and return its initial state.
    fn reset(&mut self) -> Result<usize>;

    fn step(&mut self, action: usize) -> Result<Step>;
}
