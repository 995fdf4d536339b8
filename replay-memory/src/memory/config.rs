//! Configuration of [`ReplayMemory`](super::ReplayMemory).
use crate::{error::Result, HistType};
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`ReplayMemory`](super::ReplayMemory).
///
/// # Examples
///
/// ```rust
/// use replay_memory::{HistType, ReplayMemoryConfig};
///
/// let config = ReplayMemoryConfig::default()
///     .observation_shape(vec![84, 84])
///     .capacity(100_000)
///     .hist_len(4)
///     .hist_type(HistType::Exp2);
/// ```
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ReplayMemoryConfig {
    /// Shape of each (preprocessed) observation.
    pub observation_shape: Vec<usize>,

    /// Maximum number of transitions. When the memory is full, new transitions
    /// replace the oldest ones.
    pub capacity: usize,

    /// Requested number of frames in a state. The effective value may be smaller
    /// so that the history window fits in the capacity.
    pub hist_len: usize,

    /// Shape of the history window.
    pub hist_type: HistType,

    /// Spacing between adjacent frames of a state. Only used with
    /// [`HistType::Linear`].
    pub hist_spacing: usize,

    /// Maximum number of rejected draws allowed while sampling a batch.
    pub max_sample_attempts: usize,

    /// Random seed used for sampling.
    pub seed: u64,
}

impl Default for ReplayMemoryConfig {
    fn default() -> Self {
        Self {
            observation_shape: vec![1],
            capacity: 1024,
            hist_len: 1,
            hist_type: HistType::Linear,
            hist_spacing: 1,
            max_sample_attempts: 1000,
            seed: 42,
        }
    }
}

impl ReplayMemoryConfig {
    /// Sets the shape of observations.
    pub fn observation_shape(mut self, observation_shape: Vec<usize>) -> Self {
        self.observation_shape = observation_shape;
        self
    }

    /// Sets the capacity of the memory.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the number of frames in a state.
    pub fn hist_len(mut self, hist_len: usize) -> Self {
        self.hist_len = hist_len;
        self
    }

    /// Sets the shape of the history window.
    pub fn hist_type(mut self, hist_type: HistType) -> Self {
        self.hist_type = hist_type;
        self
    }

    /// Sets the spacing of frames for [`HistType::Linear`].
    pub fn hist_spacing(mut self, hist_spacing: usize) -> Self {
        self.hist_spacing = hist_spacing;
        self
    }

    /// Sets the retry budget of sampling.
    pub fn max_sample_attempts(mut self, max_sample_attempts: usize) -> Self {
        self.max_sample_attempts = max_sample_attempts;
        self
    }

    /// Sets the random seed for sampling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves the configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ReplayMemoryConfig;
    use crate::HistType;
    use anyhow::Result;
    use tempdir::TempDir;
    use test_log::test;

    #[test]
    fn test_serde_config() -> Result<()> {
        let config = ReplayMemoryConfig::default()
            .observation_shape(vec![84, 84])
            .capacity(500)
            .hist_len(4)
            .hist_type(HistType::Exp1_5)
            .max_sample_attempts(10)
            .seed(7);

        let dir = TempDir::new("replay_memory_config")?;
        let path = dir.path().join("replay_memory.yaml");
        config.save(&path)?;
        let config_ = ReplayMemoryConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_hist_type_yaml() -> Result<()> {
        let yaml = "observation_shape: [2]\n\
                    capacity: 16\n\
                    hist_len: 3\n\
                    hist_type: exp1.5\n\
                    hist_spacing: 1\n\
                    max_sample_attempts: 100\n\
                    seed: 0\n";
        let config: ReplayMemoryConfig = serde_yaml::from_str(yaml)?;
        assert_eq!(config.hist_type, HistType::Exp1_5);
        assert_eq!(config.observation_shape, vec![2]);
        Ok(())
    }
}
