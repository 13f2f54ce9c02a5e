use ndarray::{array, Array1};

use crate::activations::Activation;
use crate::approximator::Approximator;
use crate::config::DeepQConfig;
use crate::encoding::{argmax, one_hot};
use crate::error::DeepQError;
use crate::layers::DenseLayer;
use crate::network::NeuralNetwork;
use crate::optimizer::{Adam, OptimizerWrapper, SGD};

#[test]
fn test_network_output_shape() {
    let network = NeuralNetwork::new(&[16, 8, 4], &[Activation::Sigmoid, Activation::Linear], OptimizerWrapper::SGD(SGD::new()), 0.1).unwrap();
    let output = network.predict(one_hot(3, 16).unwrap().view()).unwrap();
    assert_eq!(output.len(), 4);
    assert_eq!(network.input_size(), 16);
    assert_eq!(network.output_size(), 4);
}

#[test]
fn test_network_rejects_bad_shapes() {
    let sgd = OptimizerWrapper::SGD(SGD::new());
    assert!(NeuralNetwork::new(&[4], &[], sgd.clone(), 0.1).is_err());
    assert!(NeuralNetwork::new(&[4, 2], &[Activation::Relu, Activation::Linear], sgd.clone(), 0.1).is_err());
    assert!(NeuralNetwork::new(&[4, 0, 2], &[Activation::Relu, Activation::Linear], sgd, 0.1).is_err());
}

#[test]
fn test_predict_rejects_wrong_input_length() {
    let network = NeuralNetwork::new(&[4, 2], &[Activation::Linear], OptimizerWrapper::SGD(SGD::new()), 0.1).unwrap();
    let err = network.predict(Array1::zeros(5).view()).unwrap_err();
    assert!(matches!(err, DeepQError::DimensionMismatch { .. }));
}

#[test]
fn test_predict_is_pure() {
    let network = NeuralNetwork::for_config(16, 4, &DeepQConfig::default()).unwrap();
    let input = one_hot(7, 16).unwrap();
    let first = network.predict(input.view()).unwrap();
    let second = network.predict(input.view()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_known_weights_forward() {
    let layer = DenseLayer::new(2, 2, Activation::Linear)
        .with_weights(array![[1.0, 2.0], [3.0, 4.0]])
        .with_biases(array![0.5, -0.5]);
    let network = NeuralNetwork::new(&[2, 2], &[Activation::Linear], OptimizerWrapper::SGD(SGD::new()), 0.1)
        .unwrap()
        .with_layers(vec![layer]);

    let output = network.predict(array![1.0, 1.0].view()).unwrap();
    assert_eq!(output, array![4.5f32, 5.5]);
}

#[test]
fn test_fit_reduces_loss_sgd() {
    let mut network = NeuralNetwork::new(&[16, 12, 4], &[Activation::Sigmoid, Activation::Linear], OptimizerWrapper::SGD(SGD::new()), 0.2).unwrap();
    let input = one_hot(5, 16).unwrap();
    let target = array![0.0, 0.0, 1.0, 0.0];

    let initial = network.fit(input.view(), target.view(), 1, false).unwrap();
    let last = network.fit(input.view(), target.view(), 200, true).unwrap();
    assert!(last < initial);
    assert_eq!(argmax(&network.predict(input.view()).unwrap()).unwrap(), 2);
}

#[test]
fn test_fit_reduces_loss_adam() {
    let config = DeepQConfig { learning_rate: 0.01, ..DeepQConfig::default() };
    let mut network = NeuralNetwork::for_config(16, 4, &config).unwrap();
    assert!(matches!(network.optimizer, OptimizerWrapper::Adam(_)));

    let input = one_hot(9, 16).unwrap();
    let target = array![0.0, 1.0, 0.0, 0.0];
    let initial = network.fit(input.view(), target.view(), 1, false).unwrap();
    let last = network.fit(input.view(), target.view(), 300, false).unwrap();
    assert!(last < initial);
}

#[test]
fn test_fit_changes_weights() {
    let layers = vec![DenseLayer::new(4, 3, Activation::Sigmoid), DenseLayer::new(3, 2, Activation::Linear)];
    let adam = OptimizerWrapper::Adam(Adam::new(&layers, 0.9, 0.999, 1e-7));
    let mut network = NeuralNetwork::new(&[4, 3, 2], &[Activation::Sigmoid, Activation::Linear], adam, 0.01)
        .unwrap()
        .with_layers(layers);

    let before = network.layers[1].weights.clone();
    network.fit(array![1.0, 0.5, 0.0, 0.2].view(), array![1.0, -1.0].view(), 1, false).unwrap();
    assert_ne!(before, network.layers[1].weights);
}

#[test]
fn test_fit_with_zero_epochs_is_noop() {
    let mut network = NeuralNetwork::new(&[3, 2], &[Activation::Linear], OptimizerWrapper::SGD(SGD::new()), 0.1).unwrap();
    let before = network.layers[0].weights.clone();
    network.fit(array![1.0, 0.0, 0.0].view(), array![1.0, 1.0].view(), 0, false).unwrap();
    assert_eq!(before, network.layers[0].weights);
}

#[test]
fn test_fit_rejects_target_of_wrong_length() {
    let mut network = NeuralNetwork::new(&[3, 2], &[Activation::Linear], OptimizerWrapper::SGD(SGD::new()), 0.1).unwrap();
    let result = network.fit(array![1.0, 0.0, 0.0].view(), array![1.0, 1.0, 1.0].view(), 1, false);
    assert!(result.is_err());
}

#[test]
fn test_activations() {
    let mut data = array![[-1.0, 0.0, 2.0]];
    Activation::Relu.apply_batch(&mut data);
    assert_eq!(data, array![[0.0f32, 0.0, 2.0]]);

    let mut data = array![[0.0f32]];
    Activation::Sigmoid.apply_batch(&mut data);
    assert!((data[[0, 0]] - 0.5).abs() < 1e-6);
    let derivative = Activation::Sigmoid.derivative_batch(array![[0.0f32]].view());
    assert!((derivative[[0, 0]] - 0.25).abs() < 1e-6);

    let derivative = Activation::LeakyRelu { alpha: 0.1 }.derivative_batch(array![[-2.0f32, 3.0]].view());
    assert_eq!(derivative, array![[0.1f32, 1.0]]);
}
