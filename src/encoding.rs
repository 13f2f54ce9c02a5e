use ndarray::Array1;

use crate::error::{DeepQError, Result};

/// One-hot encode a discrete state index into a vector of length `state_space`.
///
/// Every approximator call goes through this; raw indices are never fed forward.
pub fn one_hot(state: usize, state_space: usize) -> Result<Array1<f32>> {
    if state >= state_space {
        return Err(DeepQError::InvalidState { state, state_space });
    }
    let mut encoded = Array1::zeros(state_space);
    encoded[state] = 1.0;
    Ok(encoded)
}

/// Index of the largest coordinate. Ties go to the first index.
pub fn argmax(values: &Array1<f32>) -> Result<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &value) in values.iter().enumerate() {
        if value.is_nan() {
            return Err(DeepQError::NumericalError(format!("NaN output at index {}", idx)));
        }
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
        .ok_or_else(|| DeepQError::EmptyBuffer("cannot take argmax of an empty vector".to_string()))
}

/// Largest coordinate of a prediction.
pub fn max_value(values: &Array1<f32>) -> Result<f32> {
    let idx = argmax(values)?;
    Ok(values[idx])
}
