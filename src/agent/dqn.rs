use ndarray::Array1;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::policy::{decay_epsilon, explore, in_warm_up};
use crate::approximator::Approximator;
use crate::config::DeepQConfig;
use crate::encoding::{argmax, max_value, one_hot};
use crate::environment::{Discrete, Environment};
use crate::error::{DeepQError, Result};
use crate::network::NeuralNetwork;
use crate::replay_buffer::{ReplayMemory, Transition};

/// Deep Q-learning agent over a discrete state space.
///
/// Owns the Q-function approximator and the replay memory for the whole run.
/// The episode number is never stored here; callers pass it to every method
/// that depends on it.
///
/// # Example
///
/// ```rust
/// use frozen_dqn::agent::DeepQAgent;
/// use frozen_dqn::config::DeepQConfig;
/// use frozen_dqn::environment::{Environment, FrozenLake, FrozenLakeConfig};
///
/// let mut env = FrozenLake::new(&FrozenLakeConfig::default()).unwrap();
/// let config = DeepQConfig { skip: 0, seed: Some(7), ..DeepQConfig::default() };
/// let mut agent = DeepQAgent::for_environment(&env, &config).unwrap();
///
/// let state = env.reset().unwrap();
/// let action = agent.select_action(state, 1).unwrap();
/// let step = env.step(action).unwrap();
/// agent.q_update(state, action, step.reward, step.next_state, step.done, 1).unwrap();
/// ```
pub struct DeepQAgent<A: Approximator = NeuralNetwork> {
    pub approximator: A,
    memory: ReplayMemory,
    observation_space: Discrete,
    action_space: Discrete,
    gamma: f32,
    skip: usize,
    online_epochs: usize,
    replay_epochs: usize,
    batch_size: usize,
    /// Exploration rate computed by the most recent post-warm-up `select_action`.
    pub epsilon: f32,
    rng: StdRng,
}

impl DeepQAgent<NeuralNetwork> {
    /// Agent with the configured feed-forward network, sized for `env`.
    pub fn for_environment<E: Environment>(env: &E, config: &DeepQConfig) -> Result<Self> {
        let observation_space = env.observation_space();
        let action_space = env.action_space();
        let network = NeuralNetwork::for_config(observation_space.n(), action_space.n(), config)?;
        Self::new(network, observation_space, action_space, config)
    }
}

impl<A: Approximator> DeepQAgent<A> {
    pub fn new(approximator: A, observation_space: Discrete, action_space: Discrete, config: &DeepQConfig) -> Result<Self> {
        config.validate()?;
        if observation_space.n() == 0 || action_space.n() == 0 {
            return Err(DeepQError::invalid_parameter("space", "observation and action spaces must be non-empty"));
        }
        if approximator.input_size() != observation_space.n() {
            return Err(DeepQError::dimension_mismatch(
                format!("approximator input of {}", observation_space.n()),
                format!("approximator input of {}", approximator.input_size()),
            ));
        }
        if approximator.output_size() != action_space.n() {
            return Err(DeepQError::dimension_mismatch(
                format!("approximator output of {}", action_space.n()),
                format!("approximator output of {}", approximator.output_size()),
            ));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(DeepQAgent {
            approximator,
            memory: ReplayMemory::new(config.replay_capacity())?,
            observation_space,
            action_space,
            gamma: config.gamma,
            skip: config.skip,
            online_epochs: config.online_epochs,
            replay_epochs: config.replay_epochs,
            batch_size: config.batch_size(),
            epsilon: 1.0,
            rng,
        })
    }

    pub fn memory(&self) -> &ReplayMemory {
        &self.memory
    }

    pub fn observation_space(&self) -> Discrete {
        self.observation_space
    }

    pub fn action_space(&self) -> Discrete {
        self.action_space
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Predicted Q-values for a state.
    pub fn q_values(&self, state: usize) -> Result<Array1<f32>> {
        let encoded = one_hot(state, self.observation_space.n())?;
        self.approximator.predict(encoded.view())
    }

    /// Epsilon-greedy action choice.
    ///
    /// During warm-up the action is uniform random and the approximator is not
    /// consulted at all.
    pub fn select_action(&mut self, state: usize, episode: usize) -> Result<usize> {
        if in_warm_up(episode, self.skip) {
            return Ok(self.action_space.sample(&mut self.rng));
        }
        self.epsilon = decay_epsilon(episode)?;
        if explore(self.epsilon, &mut self.rng) {
            Ok(self.action_space.sample(&mut self.rng))
        } else {
            self.greedy_action(state)
        }
    }

    /// Argmax of the predicted Q-values. Ties resolve to the lowest action index.
    pub fn greedy_action(&self, state: usize) -> Result<usize> {
        let q_values = self.q_values(state)?;
        argmax(&q_values)
    }

    /// `reward` when `cut_off` is set, else `reward + gamma * max Q(next_state)`.
    pub fn compute_target(&self, reward: f32, next_state: usize, cut_off: bool) -> Result<f32> {
        if cut_off {
            return Ok(reward);
        }
        let next_q_values = self.q_values(next_state)?;
        Ok(reward + self.gamma * max_value(&next_q_values)?)
    }

    /// Fit the prediction for `state` toward `target` on the `action` coordinate only.
    fn fit_toward(&mut self, state: usize, action: usize, target: f32, epochs: usize) -> Result<f32> {
        if !self.action_space.contains(action) {
            return Err(DeepQError::InvalidAction { action, max_actions: self.action_space.n() });
        }
        let encoded = one_hot(state, self.observation_space.n())?;
        let mut target_vector = self.approximator.predict(encoded.view())?;
        target_vector[action] = target;
        self.approximator.fit(encoded.view(), target_vector.view(), epochs, false)
    }

    /// Online Q-learning update for a single transition, skipped during warm-up.
    pub fn q_update(&mut self, state: usize, action: usize, reward: f32, next_state: usize, done: bool, episode: usize) -> Result<()> {
        if in_warm_up(episode, self.skip) {
            return Ok(());
        }
        let target = self.compute_target(reward, next_state, done)?;
        self.fit_toward(state, action, target, self.online_epochs)?;
        Ok(())
    }

    /// Offer a finished episode to the replay memory. Returns whether it was kept.
    pub fn remember_episode(&mut self, transitions: Vec<Transition>, final_reward: f32, episode: usize) -> bool {
        self.memory.append_episode(transitions, final_reward, episode, self.skip)
    }

    /// Store a single transition directly, bypassing the warm-up filter.
    pub fn remember(&mut self, transition: Transition) {
        self.memory.push(transition);
    }

    /// Replay a uniformly drawn batch, one isolated fit per sample.
    ///
    /// Returns the number of samples trained on; an empty memory trains nothing.
    pub fn experience_replay(&mut self) -> Result<usize> {
        let batch: Vec<Transition> = self
            .memory
            .sample(self.batch_size, &mut self.rng)
            .into_iter()
            .copied()
            .collect();

        for transition in &batch {
            let target = self.compute_target(transition.reward, transition.next_state, transition.terminal)?;
            self.fit_toward(transition.state, transition.action, target, self.replay_epochs)?;
        }

        log::debug!("replayed {} transitions from a memory of {}", batch.len(), self.memory.len());
        Ok(batch.len())
    }
}
