//! Replay buffer interface.
//!
//! Storing experiences and generating batches are split into two traits, so
//! that a process collecting experiences only needs [`ExperienceBufferBase`].
use anyhow::Result;

/// Interface of buffers that store experiences from environments.
pub trait ExperienceBufferBase {
    /// Item pushed into the buffer.
    type Item;

    /// Pushes a new experience into the buffer.
    ///
    /// # Arguments
    ///
    /// * `tr` - The experience to store
    ///
    /// # Returns
    ///
    /// `Ok(())` if the push was successful, or an error if the experience
    /// does not fit the buffer
    fn push(&mut self, tr: Self::Item) -> Result<()>;

    /// Returns the current number of experiences in the buffer.
    fn len(&self) -> usize;
}

/// Interface of replay buffers that generate batches for training.
///
/// # Examples
///
/// ```rust
/// use replay_memory::{ReplayBufferBase, ReplayMemory, ReplayMemoryConfig};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = ReplayMemoryConfig::default().capacity(16).hist_len(2);
/// let buffer = <ReplayMemory<f32> as ReplayBufferBase>::build(&config)?;
/// assert_eq!(buffer.capacity(), 16);
/// # Ok(())
/// # }
/// ```
pub trait ReplayBufferBase: Sized {
    /// Configuration of the replay buffer.
    type Config: Clone;

    /// Batch generated for training.
    type Batch;

    /// Builds a new replay buffer from the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration parameters
    ///
    /// # Returns
    ///
    /// A new instance of the replay buffer, or an error if the configuration
    /// is invalid
    fn build(config: &Self::Config) -> Result<Self>;

    /// Constructs a batch of experiences for training.
    ///
    /// This method samples experiences from the buffer and returns them
    /// in a format suitable for training.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of experiences to include in the batch
    ///
    /// # Returns
    ///
    /// A batch of experiences or an error if sampling failed
    fn batch(&mut self, size: usize) -> Result<Self::Batch>;
}
