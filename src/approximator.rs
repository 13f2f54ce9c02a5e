//! The function-approximator seam.
//!
//! The agent only ever talks to its Q-function through [`Approximator`]. The
//! crate ships [`NeuralNetwork`](crate::network::NeuralNetwork) as the default
//! implementation; tests swap in deterministic stubs.

use ndarray::{Array1, ArrayView1};

use crate::error::Result;

pub trait Approximator {
    /// Length of the input vector (the one-hot state width).
    fn input_size(&self) -> usize;

    /// Length of the output vector (one Q-value per action).
    fn output_size(&self) -> usize;

    /// Predicted Q-values for one encoded state. Must not change learned state.
    fn predict(&self, input: ArrayView1<f32>) -> Result<Array1<f32>>;

    /// Regress the prediction for `input` toward `target` with MSE loss for
    /// `epochs` gradient steps. Returns the loss of the last epoch.
    fn fit(&mut self, input: ArrayView1<f32>, target: ArrayView1<f32>, epochs: usize, verbose: bool) -> Result<f32>;
}
