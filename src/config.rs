use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::activations::Activation;
use crate::environment::FrozenLakeConfig;
use crate::error::{DeepQError, Result};
use crate::optimizer::OptimizerKind;

/// Every tunable constant of a training run.
///
/// Fields missing from a deserialized document fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepQConfig {
    /// Episode budget; episodes are numbered `1..=episodes`.
    pub episodes: usize,
    /// Per-episode step limit, also used to size the replay memory.
    pub step_limit: usize,
    /// Warm-up episodes: random actions, no fitting.
    pub skip: usize,
    /// Number of full-length episodes the replay memory can hold.
    pub past_games: usize,
    /// Share of the replay capacity drawn per replay pass.
    pub batch_fraction: f64,
    pub learning_rate: f32,
    pub gamma: f32,
    pub learning_interval: usize,
    pub replay_interval: usize,
    pub testing_interval: usize,
    pub test_cycles: usize,
    pub online_epochs: usize,
    pub replay_epochs: usize,
    pub hidden_layers: Vec<usize>,
    pub hidden_activation: Activation,
    pub output_activation: Activation,
    pub optimizer: OptimizerKind,
    /// Seed for the agent's random source. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for DeepQConfig {
    fn default() -> Self {
        DeepQConfig {
            episodes: 100_000,
            step_limit: 100,
            skip: 1000,
            past_games: 10,
            batch_fraction: 0.5,
            learning_rate: 0.001,
            gamma: 0.9,
            learning_interval: 1,
            replay_interval: 1,
            testing_interval: 10,
            test_cycles: 10,
            online_epochs: 2,
            replay_epochs: 1,
            hidden_layers: vec![26, 26, 26],
            hidden_activation: Activation::Sigmoid,
            output_activation: Activation::Linear,
            optimizer: OptimizerKind::default(),
            seed: None,
        }
    }
}

impl DeepQConfig {
    /// `past_games * step_limit`
    pub fn replay_capacity(&self) -> usize {
        self.past_games * self.step_limit
    }

    /// `floor(replay_capacity * batch_fraction)`
    pub fn batch_size(&self) -> usize {
        (self.replay_capacity() as f64 * self.batch_fraction).floor() as usize
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("episodes", self.episodes),
            ("step_limit", self.step_limit),
            ("past_games", self.past_games),
            ("learning_interval", self.learning_interval),
            ("replay_interval", self.replay_interval),
            ("testing_interval", self.testing_interval),
            ("online_epochs", self.online_epochs),
            ("replay_epochs", self.replay_epochs),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(DeepQError::invalid_parameter(name, "must be greater than 0"));
            }
        }

        if !(self.gamma > 0.0 && self.gamma < 1.0) {
            return Err(DeepQError::invalid_parameter(
                "gamma".to_string(),
                format!("must lie in (0, 1), got {}", self.gamma),
            ));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(DeepQError::invalid_parameter(
                "learning_rate".to_string(),
                format!("must be positive, got {}", self.learning_rate),
            ));
        }
        if !(self.batch_fraction > 0.0 && self.batch_fraction <= 1.0) {
            return Err(DeepQError::invalid_parameter(
                "batch_fraction".to_string(),
                format!("must lie in (0, 1], got {}", self.batch_fraction),
            ));
        }
        if self.batch_size() == 0 {
            return Err(DeepQError::invalid_parameter("batch_fraction", "yields an empty replay batch"));
        }
        if self.hidden_layers.iter().any(|&width| width == 0) {
            return Err(DeepQError::invalid_parameter("hidden_layers", "every layer needs at least one unit"));
        }
        Ok(())
    }
}

/// What the binary reads from an optional JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub agent: DeepQConfig,
    pub lake: FrozenLakeConfig,
    /// Where the binary writes the training metrics once the run finishes.
    pub metrics_path: Option<PathBuf>,
}

impl RunConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&data)?;
        config.agent.validate()?;
        Ok(config)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)?;
        Ok(())
    }
}
