//! Interfaces between the replay memory and a training loop.
mod batch;
mod replay_buffer;
pub use batch::TransitionBatch;
pub use replay_buffer::{ExperienceBufferBase, ReplayBufferBase};
