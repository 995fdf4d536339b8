//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum ReplayMemoryError {
    /// Invalid configuration, detected when building a replay memory.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No anchor index can be sampled from the stored transitions yet.
    #[error(
        "Cannot sample a batch with {size} transitions \
         (capacity = {capacity}, expected sample range = [{start}, {end}))"
    )]
    EmptyRange {
        /// Number of stored transitions.
        size: usize,
        /// Capacity of the memory.
        capacity: usize,
        /// Start of the (unwrapped) sample range.
        start: isize,
        /// End of the (unwrapped) sample range.
        end: isize,
    },

    /// Rejection sampling ran out of its retry budget.
    #[error(
        "Max sample attempts: re-tried {attempts} times but only {sampled} samples got \
         (batch size = {batch_size})"
    )]
    SamplingExhausted {
        /// Number of rejected draws.
        attempts: usize,
        /// Number of valid anchors collected.
        sampled: usize,
        /// Requested batch size.
        batch_size: usize,
    },

    /// An observation does not have the configured shape.
    #[error("Observation shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Configured observation shape.
        expected: Vec<usize>,
        /// Shape of the given observation.
        actual: Vec<usize>,
    },

    /// Failed to read or write a configuration file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failed to (de)serialize a configuration.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type of the library.
pub type Result<T> = std::result::Result<T, ReplayMemoryError>;
