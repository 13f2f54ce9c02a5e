use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};

/// Result of one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub episode: usize,
    pub total_reward: f32,
    pub cycles: usize,
}

/// Stores training metrics over time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingMetrics {
    /// Rewards per episode (most recent `history_size`)
    pub episode_rewards: VecDeque<f32>,

    /// Episode lengths (most recent `history_size`)
    pub episode_lengths: VecDeque<usize>,

    /// Exploration rate in effect for each recorded episode
    pub epsilons: VecDeque<f32>,

    /// Every evaluation pass, in order
    pub test_results: Vec<TestResult>,
}

impl TrainingMetrics {
    pub fn new(history_size: usize) -> Self {
        TrainingMetrics {
            episode_rewards: VecDeque::with_capacity(history_size),
            episode_lengths: VecDeque::with_capacity(history_size),
            epsilons: VecDeque::with_capacity(history_size),
            test_results: Vec::new(),
        }
    }
}

fn push_bounded<T>(queue: &mut VecDeque<T>, value: T, limit: usize) {
    if queue.len() >= limit {
        queue.pop_front();
    }
    queue.push_back(value);
}

/// Tracks progress of a training run
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    metrics: TrainingMetrics,
    history_size: usize,

    // Cumulative over the whole run, never reset
    total_reward: f32,
    episode_count: usize,
    total_steps: usize,
    retained_episodes: usize,
}

impl MetricsTracker {
    pub fn new(history_size: usize) -> Self {
        let history_size = history_size.max(1);
        MetricsTracker {
            metrics: TrainingMetrics::new(history_size),
            history_size,
            total_reward: 0.0,
            episode_count: 0,
            total_steps: 0,
            retained_episodes: 0,
        }
    }

    /// Record a finished training episode.
    pub fn record_episode(&mut self, reward: f32, length: usize, epsilon: f32, retained: bool) {
        self.total_reward += reward;
        self.episode_count += 1;
        self.total_steps += length;
        if retained {
            self.retained_episodes += 1;
        }
        push_bounded(&mut self.metrics.episode_rewards, reward, self.history_size);
        push_bounded(&mut self.metrics.episode_lengths, length, self.history_size);
        push_bounded(&mut self.metrics.epsilons, epsilon, self.history_size);
    }

    pub fn record_test(&mut self, episode: usize, total_reward: f32, cycles: usize) {
        self.metrics.test_results.push(TestResult { episode, total_reward, cycles });
    }

    /// Cumulative reward over the whole run.
    pub fn total_reward(&self) -> f32 {
        self.total_reward
    }

    /// `total_reward / (episode + 1)`, the figure printed after every episode.
    ///
    /// The numerator is never reset and the denominator is off by one, so this
    /// drifts from the true win rate. See [`recent_win_rate`](Self::recent_win_rate).
    pub fn cumulative_win_rate(&self, episode: usize) -> f32 {
        self.total_reward / (episode + 1) as f32
    }

    /// Mean reward over the last `window` episodes.
    pub fn recent_win_rate(&self, window: usize) -> Option<f32> {
        if self.metrics.episode_rewards.is_empty() || window == 0 {
            return None;
        }
        let n = window.min(self.metrics.episode_rewards.len());
        let sum: f32 = self.metrics.episode_rewards.iter().rev().take(n).sum();
        Some(sum / n as f32)
    }

    pub fn best_test(&self) -> Option<&TestResult> {
        self.metrics
            .test_results
            .iter()
            .max_by(|a, b| a.total_reward.partial_cmp(&b.total_reward).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn metrics(&self) -> &TrainingMetrics {
        &self.metrics
    }

    pub fn episode_count(&self) -> usize {
        self.episode_count
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn retained_episodes(&self) -> usize {
        self.retained_episodes
    }

    /// Write the recorded history as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::error::Result<()> {
        let serialized = serde_json::to_string_pretty(&self.metrics)?;
        fs::write(path, serialized)?;
        Ok(())
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new(1000)
    }
}
