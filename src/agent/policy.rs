use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::{DeepQError, Result};

/// Scale of the `ln 2 / episode` decay.
pub const DECAY_SCALE: f64 = 10_000.0;

/// Exploration rate for an episode: `min((ln 2 / episode) * 10000, 1)`.
///
/// Clamped to 1 up to episode 6931 and strictly decreasing after that,
/// approaching but never reaching 0. Episodes are numbered from 1.
pub fn decay_epsilon(episode: usize) -> Result<f32> {
    if episode == 0 {
        return Err(DeepQError::invalid_parameter("episode", "episodes are numbered from 1"));
    }
    let epsilon = (std::f64::consts::LN_2 / episode as f64) * DECAY_SCALE;
    Ok(epsilon.min(1.0) as f32)
}

/// Whether `episode` still belongs to the warm-up period.
pub fn in_warm_up(episode: usize, skip: usize) -> bool {
    episode <= skip
}

/// Draw `u ~ Uniform(0, 1)` and report whether `u < epsilon`.
pub fn explore<R: Rng + ?Sized>(epsilon: f32, rng: &mut R) -> bool {
    let u: f32 = Uniform::new(0.0, 1.0).sample(rng);
    u < epsilon
}
