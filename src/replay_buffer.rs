use rand::Rng;
use std::collections::VecDeque;

use crate::error::{DeepQError, Result};

/// One observed step.
///
/// `done` is the environment's end-of-episode signal (goal, hole or time limit).
/// `terminal` marks that `next_state` is the goal cell and is what cuts off
/// bootstrapping during replay. The two are deliberately kept apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub state: usize,
    pub action: usize,
    pub reward: f32,
    pub next_state: usize,
    pub done: bool,
    pub terminal: bool,
}

impl Transition {
    /// Build a transition, deriving `terminal` from `next_state == state_space - 1`.
    pub fn observe(state: usize, action: usize, reward: f32, next_state: usize, done: bool, state_space: usize) -> Self {
        Transition {
            state,
            action,
            reward,
            next_state,
            done,
            terminal: state_space > 0 && next_state == state_space - 1,
        }
    }
}

/// Bounded FIFO memory of transitions with uniform sampling.
#[derive(Clone, Debug)]
pub struct ReplayMemory {
    buffer: VecDeque<Transition>,
    capacity: usize,
}

impl ReplayMemory {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(DeepQError::invalid_parameter("capacity", "must be greater than 0"));
        }
        Ok(ReplayMemory {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append at the tail, evicting the oldest entry when full.
    pub fn push(&mut self, transition: Transition) {
        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(transition);
    }

    pub fn extend<I: IntoIterator<Item = Transition>>(&mut self, transitions: I) {
        for transition in transitions {
            self.push(transition);
        }
    }

    /// During warm-up only episodes that ended on a reward of exactly 1 are kept.
    pub fn should_retain(final_reward: f32, episode: usize, skip: usize) -> bool {
        final_reward == 1.0 || episode > skip
    }

    /// Store a finished episode if [`should_retain`](Self::should_retain) allows it.
    /// Returns whether the transitions were stored.
    pub fn append_episode(&mut self, transitions: Vec<Transition>, final_reward: f32, episode: usize, skip: usize) -> bool {
        if !Self::should_retain(final_reward, episode, skip) {
            return false;
        }
        self.extend(transitions);
        true
    }

    /// Draw `batch_size` transitions uniformly at random, with replacement.
    /// An empty memory yields an empty batch.
    pub fn sample<R: Rng + ?Sized>(&self, batch_size: usize, rng: &mut R) -> Vec<&Transition> {
        if self.buffer.is_empty() {
            return Vec::new();
        }
        (0..batch_size)
            .map(|_| &self.buffer[rng.gen_range(0..self.buffer.len())])
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.buffer.iter()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
