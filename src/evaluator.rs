use crate::agent::DeepQAgent;
use crate::approximator::Approximator;
use crate::environment::Environment;
use crate::error::Result;

/// Greedy rollouts that measure the current policy without learning from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    pub test_cycles: usize,
}

impl Evaluator {
    pub fn new(test_cycles: usize) -> Self {
        Evaluator { test_cycles }
    }

    /// Run `test_cycles` greedy episodes and return the summed reward.
    ///
    /// The agent is only borrowed immutably: no fitting, no replay memory
    /// writes, no exploration. The environment is reset before each cycle.
    pub fn run_tests<E, A>(&self, env: &mut E, agent: &DeepQAgent<A>, episode: usize) -> Result<f32>
    where
        E: Environment,
        A: Approximator,
    {
        let mut sum_reward = 0.0;
        for _ in 0..self.test_cycles {
            let mut state = env.reset()?;
            loop {
                let action = agent.greedy_action(state)?;
                let step = env.step(action)?;
                sum_reward += step.reward;
                state = step.next_state;
                if step.done {
                    break;
                }
            }
        }

        log::info!("Test win rate after {} episodes: {} out of {}", episode, sum_reward, self.test_cycles);
        Ok(sum_reward)
    }
}
