//! # Activation Functions
//!
//! Element-wise non-linearities for the dense layers of the Q-network.
//!
//! - **Sigmoid**: `1 / (1 + e^(-x))`, the default for hidden layers
//! - **Linear**: identity, the default for the output layer so Q-values are unbounded
//! - **ReLU**, **LeakyReLU**, **Tanh**: alternatives for swapping the architecture
//!
//! ```rust
//! use frozen_dqn::activations::Activation;
//! use ndarray::array;
//!
//! let mut data = array![[1.0, -0.5, 0.0, 2.0]];
//! Activation::Relu.apply_batch(&mut data);
//! assert_eq!(data, array![[1.0f32, 0.0, 0.0, 2.0]]);
//! ```

pub mod functions;

pub use functions::Activation;
