use std::fmt;

/// Result type for frozen-dqn operations
pub type Result<T> = std::result::Result<T, DeepQError>;

/// Main error type for the agent, its environment and its approximator
#[derive(Debug, Clone, PartialEq)]
pub enum DeepQError {
    /// Invalid parameter value
    InvalidParameter {
        name: String,
        reason: String,
    },

    /// State index outside the observation space
    InvalidState {
        state: usize,
        state_space: usize,
    },

    /// Action index outside the action space
    InvalidAction {
        action: usize,
        max_actions: usize,
    },

    /// Invalid dimensions for operations
    DimensionMismatch {
        expected: String,
        actual: String,
    },

    /// Empty buffer or container
    EmptyBuffer(String),

    /// Numerical computation errors
    NumericalError(String),

    /// Failure reported by an environment
    Environment(String),

    /// IO errors (file operations)
    Io(String),

    /// Serialization/deserialization errors
    Serialization(String),
}

impl fmt::Display for DeepQError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeepQError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            DeepQError::InvalidState { state, state_space } => {
                write!(f, "Invalid state {}: must be less than {}", state, state_space)
            }
            DeepQError::InvalidAction { action, max_actions } => {
                write!(f, "Invalid action {}: must be less than {}", action, max_actions)
            }
            DeepQError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {}, got {}", expected, actual)
            }
            DeepQError::EmptyBuffer(msg) => write!(f, "Empty buffer: {}", msg),
            DeepQError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
            DeepQError::Environment(msg) => write!(f, "Environment error: {}", msg),
            DeepQError::Io(msg) => write!(f, "IO error: {}", msg),
            DeepQError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for DeepQError {}

impl From<std::io::Error> for DeepQError {
    fn from(err: std::io::Error) -> Self {
        DeepQError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DeepQError {
    fn from(err: serde_json::Error) -> Self {
        DeepQError::Serialization(err.to_string())
    }
}

impl DeepQError {
    pub fn dimension_mismatch<S: Into<String>>(expected: S, actual: S) -> Self {
        DeepQError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        DeepQError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
