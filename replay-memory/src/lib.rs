#![warn(missing_docs)]
//! Experience replay memory for off-policy reinforcement learning.
//!
//! [`ReplayMemory`] stores `(observation, action, reward, done)` transitions in a
//! fixed-capacity ring and serves states made of several past observations, as
//! used by DQN on Atari-like environments. The frames composing a state are
//! selected by [`HistoryShifts`], with linear or exponentially growing gaps.
//!
//! ```rust
//! use ndarray::ArrayD;
//! use replay_memory::{ReplayMemory, ReplayMemoryConfig, Transition};
//!
//! # fn main() -> replay_memory::Result<()> {
//! let config = ReplayMemoryConfig::default()
//!     .observation_shape(vec![2])
//!     .capacity(64)
//!     .hist_len(4);
//! let mut memory = ReplayMemory::<f32>::build(&config)?;
//!
//! for t in 0..32 {
//!     let obs = ArrayD::from_elem(vec![2], t as f32);
//!     memory.add(Transition::new(obs, 0, 1.0, t % 10 == 9))?;
//! }
//!
//! let state = memory.construct_current_state(&ArrayD::zeros(vec![2]))?;
//! assert_eq!(state.shape(), &[4, 2]);
//!
//! let batch = memory.sample(8)?;
//! assert_eq!(batch.obs.shape(), &[8, 4, 2]);
//! # Ok(())
//! # }
//! ```
pub mod error;
mod base;
mod hist;
mod memory;
mod store;
mod transition;
pub use base::{ExperienceBufferBase, ReplayBufferBase, TransitionBatch};
pub use error::{ReplayMemoryError, Result};
pub use hist::{HistType, HistoryShifts};
pub use memory::{ReplayMemory, ReplayMemoryConfig, StackedBatch};
pub use store::RingStore;
pub use transition::Transition;
