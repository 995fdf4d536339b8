//! Batch of stacked-frame transitions.
use crate::TransitionBatch;
use ndarray::ArrayD;

/// Batch sampled from [`ReplayMemory`](super::ReplayMemory).
///
/// States have shape `(batch_size, hist_len, *observation_shape)`.
#[derive(Clone, Debug)]
pub struct StackedBatch<T> {
    /// States `s_t`.
    pub obs: ArrayD<T>,

    /// Actions.
    pub act: Vec<i64>,

    /// Next states `s_t+1`.
    pub next_obs: ArrayD<T>,

    /// Rewards.
    pub reward: Vec<f32>,

    /// Done flags.
    pub is_done: Vec<i8>,

    /// Anchor indices of the samples in the memory.
    pub ix_sample: Vec<usize>,
}

impl<T> TransitionBatch for StackedBatch<T> {
    type ObsBatch = ArrayD<T>;
    type ActBatch = Vec<i64>;

    fn unpack(self) -> (Self::ObsBatch, Self::ActBatch, Self::ObsBatch, Vec<f32>, Vec<i8>) {
        (self.obs, self.act, self.next_obs, self.reward, self.is_done)
    }

    fn len(&self) -> usize {
        self.reward.len()
    }

    fn obs(&self) -> &Self::ObsBatch {
        &self.obs
    }

    fn act(&self) -> &Self::ActBatch {
        &self.act
    }

    fn next_obs(&self) -> &Self::ObsBatch {
        &self.next_obs
    }

    fn reward(&self) -> &Vec<f32> {
        &self.reward
    }

    fn is_done(&self) -> &Vec<i8> {
        &self.is_done
    }
}
