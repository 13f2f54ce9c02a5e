use std::cell::Cell;

use ndarray::{Array1, Array2, ArrayView1};

use crate::approximator::Approximator;
use crate::config::DeepQConfig;
use crate::encoding::argmax;
use crate::environment::{Discrete, Environment, Step, StepInfo};
use crate::error::{DeepQError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct FitCall {
    pub input: Array1<f32>,
    pub target: Array1<f32>,
    pub epochs: usize,
}

/// Q-table behind the approximator interface. Counts predictions, records fits,
/// and optionally copies fit targets straight into the table.
pub struct TableApproximator {
    pub table: Array2<f32>,
    pub predict_calls: Cell<usize>,
    pub fits: Vec<FitCall>,
    pub learn: bool,
}

impl TableApproximator {
    pub fn zeros(states: usize, actions: usize) -> Self {
        Self::from_table(Array2::zeros((states, actions)))
    }

    pub fn from_table(table: Array2<f32>) -> Self {
        TableApproximator {
            table,
            predict_calls: Cell::new(0),
            fits: Vec::new(),
            learn: false,
        }
    }

    fn row_of(&self, input: ArrayView1<f32>) -> Result<usize> {
        if input.len() != self.table.nrows() {
            return Err(DeepQError::dimension_mismatch(
                self.table.nrows().to_string(),
                input.len().to_string(),
            ));
        }
        argmax(&input.to_owned())
    }
}

impl Approximator for TableApproximator {
    fn input_size(&self) -> usize {
        self.table.nrows()
    }

    fn output_size(&self) -> usize {
        self.table.ncols()
    }

    fn predict(&self, input: ArrayView1<f32>) -> Result<Array1<f32>> {
        self.predict_calls.set(self.predict_calls.get() + 1);
        let row = self.row_of(input)?;
        Ok(self.table.row(row).to_owned())
    }

    fn fit(&mut self, input: ArrayView1<f32>, target: ArrayView1<f32>, epochs: usize, _verbose: bool) -> Result<f32> {
        let row = self.row_of(input)?;
        self.fits.push(FitCall { input: input.to_owned(), target: target.to_owned(), epochs });
        if self.learn {
            self.table.row_mut(row).assign(&target);
        }
        Ok(0.0)
    }
}

/// States `0..length` in a line. Action 1 moves right, action 0 moves left,
/// anything else stays. Reaching the last cell pays 1 and ends the episode;
/// so does running out of steps, with no reward.
pub struct Corridor {
    pub length: usize,
    pub actions: usize,
    pub step_limit: usize,
    pub position: usize,
    pub steps: usize,
    pub resets: usize,
}

impl Corridor {
    pub fn new(length: usize, step_limit: usize) -> Self {
        Corridor { length, actions: 2, step_limit, position: 0, steps: 0, resets: 0 }
    }
}

impl Environment for Corridor {
    fn observation_space(&self) -> Discrete {
        Discrete::new(self.length)
    }

    fn action_space(&self) -> Discrete {
        Discrete::new(self.actions)
    }

    fn reset(&mut self) -> Result<usize> {
        self.position = 0;
        self.steps = 0;
        self.resets += 1;
        Ok(0)
    }

    fn step(&mut self, action: usize) -> Result<Step> {
        if action >= self.actions {
            return Err(DeepQError::InvalidAction { action, max_actions: self.actions });
        }
        self.position = match action {
            0 => self.position.saturating_sub(1),
            1 => (self.position + 1).min(self.length - 1),
            _ => self.position,
        };
        self.steps += 1;
        let goal = self.position == self.length - 1;
        let truncated = !goal && self.steps >= self.step_limit;
        Ok(Step {
            next_state: self.position,
            reward: if goal { 1.0 } else { 0.0 },
            done: goal || truncated,
            info: StepInfo { probability: 1.0, truncated },
        })
    }
}

/// Small configuration suitable for unit tests.
pub fn test_config(skip: usize) -> DeepQConfig {
    DeepQConfig {
        episodes: 20,
        step_limit: 10,
        skip,
        past_games: 2,
        testing_interval: 5,
        test_cycles: 3,
        hidden_layers: vec![8],
        seed: Some(42),
        ..DeepQConfig::default()
    }
}
