use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::activations::Activation;
use crate::approximator::Approximator;
use crate::config::DeepQConfig;
use crate::error::{DeepQError, Result};
use crate::layers::DenseLayer;
use crate::loss::{Loss, MSE};
use crate::optimizer::{Optimizer, OptimizerWrapper};

/// A feed-forward network of dense layers trained with MSE loss at a fixed learning rate.
#[derive(Clone, Debug)]
pub struct NeuralNetwork {
    pub layers: Vec<DenseLayer>,
    pub optimizer: OptimizerWrapper,
    pub learning_rate: f32,
}

impl NeuralNetwork {
    /// Create a new neural network with the given layer sizes, activations, and optimizer.
    ///
    /// `layer_sizes` includes the input and output widths, so it needs one more
    /// entry than `activations`.
    pub fn new(layer_sizes: &[usize], activations: &[Activation], optimizer: OptimizerWrapper, learning_rate: f32) -> Result<Self> {
        if layer_sizes.len() < 2 {
            return Err(DeepQError::invalid_parameter("layer_sizes", "must have at least input and output sizes"));
        }
        if layer_sizes.len() - 1 != activations.len() {
            return Err(DeepQError::dimension_mismatch(
                format!("{} activations", layer_sizes.len() - 1),
                format!("{} activations", activations.len()),
            ));
        }
        if layer_sizes.iter().any(|&size| size == 0) {
            return Err(DeepQError::invalid_parameter("layer_sizes", "every layer needs at least one unit"));
        }

        let layers = layer_sizes
            .windows(2)
            .zip(activations.iter())
            .map(|(window, &activation)| DenseLayer::new(window[0], window[1], activation))
            .collect();

        Ok(NeuralNetwork { layers, optimizer, learning_rate })
    }

    /// Build the Q-network described by `config` for the given space sizes:
    /// `[state_space, hidden_layers..., action_space]`.
    pub fn for_config(state_space: usize, action_space: usize, config: &DeepQConfig) -> Result<Self> {
        let mut layer_sizes = Vec::with_capacity(config.hidden_layers.len() + 2);
        layer_sizes.push(state_space);
        layer_sizes.extend_from_slice(&config.hidden_layers);
        layer_sizes.push(action_space);

        let mut activations = vec![config.hidden_activation; config.hidden_layers.len()];
        activations.push(config.output_activation);

        let mut network = Self::new(&layer_sizes, &activations, OptimizerWrapper::SGD(Default::default()), config.learning_rate)?;
        network.optimizer = OptimizerWrapper::from_kind(config.optimizer, &network.layers);
        Ok(network)
    }

    pub fn with_layers(mut self, layers: Vec<DenseLayer>) -> Self {
        self.layers = layers;
        self
    }

    /// Forward pass for a batch that caches activations for backpropagation.
    fn forward_batch(&mut self, inputs: ArrayView2<f32>) -> Array2<f32> {
        let mut current_output = inputs.to_owned();
        for layer in &mut self.layers {
            current_output = layer.forward_batch(current_output.view());
        }
        current_output
    }

    fn backward_batch(&self, output_errors: ArrayView2<f32>) -> Result<Vec<(Array2<f32>, Array1<f32>)>> {
        let mut gradients = Vec::with_capacity(self.layers.len());
        let mut current_error = output_errors.to_owned();

        for (i, layer) in self.layers.iter().enumerate().rev() {
            let (adjusted_error, weight_gradients, bias_gradients) = layer
                .backward_batch(current_error.view())
                .ok_or_else(|| DeepQError::NumericalError("backward pass before forward pass".to_string()))?;
            gradients.push((weight_gradients, bias_gradients));
            if i != 0 {
                current_error = adjusted_error.dot(&layer.weights.t());
            }
        }

        gradients.reverse();
        Ok(gradients)
    }

    /// One gradient step on a batch. Returns the MSE loss measured before the step.
    pub fn train_minibatch(&mut self, inputs: ArrayView2<f32>, targets: ArrayView2<f32>) -> Result<f32> {
        let outputs = self.forward_batch(inputs);
        if outputs.dim() != targets.dim() {
            return Err(DeepQError::dimension_mismatch(
                format!("{:?}", outputs.dim()),
                format!("{:?}", targets.dim()),
            ));
        }

        let loss = MSE.compute_batch(outputs.view(), targets);
        if !loss.is_finite() {
            return Err(DeepQError::NumericalError(format!("non-finite loss {}", loss)));
        }

        let output_errors = MSE.gradient_batch(outputs.view(), targets);
        let gradients = self.backward_batch(output_errors.view())?;

        for (index, (layer, (weight_gradients, bias_gradients))) in self.layers.iter_mut().zip(gradients).enumerate() {
            self.optimizer.update_weights(index, &mut layer.weights, &weight_gradients, self.learning_rate);
            self.optimizer.update_biases(index, &mut layer.biases, &bias_gradients, self.learning_rate);
        }
        self.optimizer.step();

        Ok(loss)
    }

    fn check_input(&self, input: ArrayView1<f32>) -> Result<()> {
        if input.len() != self.input_size() {
            return Err(DeepQError::dimension_mismatch(
                format!("input of length {}", self.input_size()),
                format!("input of length {}", input.len()),
            ));
        }
        Ok(())
    }
}

impl Approximator for NeuralNetwork {
    fn input_size(&self) -> usize {
        self.layers.first().map_or(0, DenseLayer::input_size)
    }

    fn output_size(&self) -> usize {
        self.layers.last().map_or(0, DenseLayer::output_size)
    }

    fn predict(&self, input: ArrayView1<f32>) -> Result<Array1<f32>> {
        self.check_input(input)?;
        let mut current_output = input.to_owned();
        for layer in &self.layers {
            current_output = layer.predict(current_output.view());
        }
        Ok(current_output)
    }

    fn fit(&mut self, input: ArrayView1<f32>, target: ArrayView1<f32>, epochs: usize, verbose: bool) -> Result<f32> {
        self.check_input(input)?;
        let inputs = input.insert_axis(Axis(0));
        let targets = target.insert_axis(Axis(0));

        let mut loss = 0.0;
        for epoch in 0..epochs {
            loss = self.train_minibatch(inputs, targets)?;
            if verbose {
                log::trace!("epoch {}/{} - loss: {:.6}", epoch + 1, epochs, loss);
            }
        }
        Ok(loss)
    }
}
