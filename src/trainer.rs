use crate::agent::DeepQAgent;
use crate::approximator::Approximator;
use crate::config::DeepQConfig;
use crate::environment::Environment;
use crate::error::{DeepQError, Result};
use crate::evaluator::Evaluator;
use crate::metrics::{MetricsTracker, TrainingMetrics};
use crate::network::NeuralNetwork;
use crate::replay_buffer::Transition;

/// Episodes averaged by [`TrainingSummary::recent_win_rate`].
pub const RECENT_WINDOW: usize = 100;

/// What happened during one training episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeOutcome {
    pub episode: usize,
    /// Sum of rewards collected in the episode.
    pub reward: f32,
    /// Reward of the last step.
    pub final_reward: f32,
    pub steps: usize,
    /// Whether the episode's transitions went into replay memory.
    pub retained: bool,
    /// Number of replayed samples fitted after the episode.
    pub replayed: usize,
    /// Evaluation total, if an evaluation ran after this episode.
    pub test_reward: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct TrainingSummary {
    pub episodes: usize,
    pub total_reward: f32,
    pub win_rate: f32,
    pub recent_win_rate: Option<f32>,
    pub replay_size: usize,
    pub metrics: TrainingMetrics,
}

/// Drives episodes: acting, online updates, replay and periodic evaluation.
pub struct Trainer<E: Environment, A: Approximator = NeuralNetwork> {
    env: E,
    agent: DeepQAgent<A>,
    evaluator: Evaluator,
    config: DeepQConfig,
    tracker: MetricsTracker,
}

impl<E: Environment> Trainer<E, NeuralNetwork> {
    /// Trainer with a freshly initialised network sized for `env`.
    pub fn from_config(env: E, config: DeepQConfig) -> Result<Self> {
        let agent = DeepQAgent::for_environment(&env, &config)?;
        Self::new(env, agent, config)
    }
}

impl<E: Environment, A: Approximator> Trainer<E, A> {
    pub fn new(env: E, agent: DeepQAgent<A>, config: DeepQConfig) -> Result<Self> {
        config.validate()?;
        if agent.skip() != config.skip {
            return Err(DeepQError::invalid_parameter(
                "skip".to_string(),
                format!("agent was built with skip {}, trainer config has {}", agent.skip(), config.skip),
            ));
        }
        if env.observation_space() != agent.observation_space() || env.action_space() != agent.action_space() {
            return Err(DeepQError::dimension_mismatch(
                format!("{:?}/{:?}", agent.observation_space(), agent.action_space()),
                format!("{:?}/{:?}", env.observation_space(), env.action_space()),
            ));
        }
        Ok(Trainer {
            env,
            agent,
            evaluator: Evaluator::new(config.test_cycles),
            config,
            tracker: MetricsTracker::default(),
        })
    }

    pub fn agent(&self) -> &DeepQAgent<A> {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut DeepQAgent<A> {
        &mut self.agent
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn tracker(&self) -> &MetricsTracker {
        &self.tracker
    }

    pub fn into_parts(self) -> (E, DeepQAgent<A>) {
        (self.env, self.agent)
    }

    /// Replay and evaluation cadence: every `interval` episodes once `episode` reaches `skip`.
    fn on_cadence(&self, episode: usize, interval: usize) -> bool {
        episode % interval == 0 && episode >= self.config.skip
    }

    /// Run the whole episode budget, `1..=episodes`.
    pub fn run(&mut self) -> Result<TrainingSummary> {
        for episode in 1..=self.config.episodes {
            self.run_episode(episode)?;
        }
        Ok(self.summary())
    }

    /// Play one training episode and everything scheduled after it.
    pub fn run_episode(&mut self, episode: usize) -> Result<EpisodeOutcome> {
        if episode == 0 {
            return Err(DeepQError::invalid_parameter("episode", "episodes are numbered from 1"));
        }
        let state_space = self.agent.observation_space().n();
        let learn = episode % self.config.learning_interval == 0;

        let mut state = self.env.reset()?;
        let mut transitions = Vec::with_capacity(self.config.step_limit);
        let mut reward = 0.0;
        let mut final_reward = 0.0;

        loop {
            let action = self.agent.select_action(state, episode)?;
            let step = self.env.step(action)?;
            log::trace!("state {} action {} -> {} reward {} done {}", state, action, step.next_state, step.reward, step.done);

            if learn {
                self.agent.q_update(state, action, step.reward, step.next_state, step.done, episode)?;
            }

            reward += step.reward;
            final_reward = step.reward;
            transitions.push(Transition::observe(state, action, step.reward, step.next_state, step.done, state_space));
            state = step.next_state;

            if step.done {
                break;
            }
        }

        let steps = transitions.len();
        let retained = self.agent.remember_episode(transitions, final_reward, episode);
        if !retained {
            log::debug!("episode {} discarded during warm-up", episode);
        }

        let replayed = if self.on_cadence(episode, self.config.replay_interval) {
            self.agent.experience_replay()?
        } else {
            0
        };

        let test_reward = if self.on_cadence(episode, self.config.testing_interval) {
            let total = self.evaluator.run_tests(&mut self.env, &self.agent, episode)?;
            self.tracker.record_test(episode, total, self.evaluator.test_cycles);
            Some(total)
        } else {
            None
        };

        let epsilon = if episode <= self.config.skip { 1.0 } else { self.agent.epsilon };
        self.tracker.record_episode(reward, steps, epsilon, retained);
        log::info!(
            "Episode {}, Reward: {}, Win Rate: {}",
            episode,
            self.tracker.total_reward(),
            self.tracker.cumulative_win_rate(episode)
        );

        Ok(EpisodeOutcome {
            episode,
            reward,
            final_reward,
            steps,
            retained,
            replayed,
            test_reward,
        })
    }

    pub fn summary(&self) -> TrainingSummary {
        let episodes = self.tracker.episode_count();
        TrainingSummary {
            episodes,
            total_reward: self.tracker.total_reward(),
            win_rate: self.tracker.cumulative_win_rate(episodes),
            recent_win_rate: self.tracker.recent_win_rate(RECENT_WINDOW),
            replay_size: self.agent.memory().len(),
            metrics: self.tracker.metrics().clone(),
        }
    }
}
