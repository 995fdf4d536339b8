//! Rejection sampling of batches.
use super::{wrap, ReplayMemory, StackedBatch};
use crate::error::{ReplayMemoryError, Result};
use log::{trace, warn};
use ndarray::{ArrayD, Axis, IxDyn};
use num_traits::Zero;
use rand::Rng;

impl<T> ReplayMemory<T> {
    /// Returns the anchor indices that can represent a sample.
    ///
    /// An index is sampleable if `start - shifts[0] <= index < end - 1` in the
    /// wrapped range, where `-1` reserves the slot of the next state. This does not
    /// ensure the index is valid (see [`ReplayMemory::is_valid_index`]).
    ///
    /// The range is empty only when a single transition has been added since the
    /// last reset. In that case, an error is returned if `raise_for_empty_range`
    /// is `true`, otherwise an empty vector.
    pub fn sampleable_range(&self, raise_for_empty_range: bool) -> Result<Vec<usize>> {
        let capacity = self.capacity();
        let (start_, end_) = (self.store.start() as isize, self.store.end() as isize);
        let start = start_ - self.shifts.min();
        let end = if !self.is_full() && start_ <= end_ {
            end_ - 1
        } else {
            end_ + capacity as isize - 1
        };

        if end <= start {
            if raise_for_empty_range {
                return Err(ReplayMemoryError::EmptyRange {
                    size: self.size(),
                    capacity,
                    start,
                    end,
                });
            }
            return Ok(vec![]);
        }

        Ok((start..end).map(|i| wrap(i, capacity)).collect())
    }
}

impl<T> ReplayMemory<T>
where
    T: Clone + Zero,
{
    /// Samples a batch of `(state, action, reward, is_done, next_state)` with
    /// replacement.
    ///
    /// Candidates are drawn uniformly from [`ReplayMemory::sampleable_range`] and
    /// rejected if not valid. Fails if the range is empty, or if the number of
    /// rejected draws reaches `max_sample_attempts` before `batch_size` samples
    /// are collected.
    pub fn sample(&mut self, batch_size: usize) -> Result<StackedBatch<T>> {
        let candidates = self.sampleable_range(true)?;
        let mut ixs = Vec::with_capacity(batch_size);
        let mut attempts = 0;

        while ixs.len() < batch_size && attempts < self.max_sample_attempts {
            let n = batch_size - ixs.len();
            let draws = (0..n)
                .map(|_| candidates[self.rng.gen_range(0..candidates.len())])
                .collect::<Vec<_>>();
            for ix in draws {
                if self.is_valid_index(ix, false) {
                    ixs.push(ix);
                } else {
                    trace!("Rejected anchor index {}", ix);
                    attempts += 1;
                }
            }
        }

        if ixs.len() != batch_size {
            warn!(
                "Sampling exhausted after {} rejections: {}",
                attempts,
                self.info().replace('\n', ", ")
            );
            return Err(ReplayMemoryError::SamplingExhausted {
                attempts,
                sampled: ixs.len(),
                batch_size,
            });
        }

        Ok(StackedBatch {
            obs: self.stack_states(&ixs, 0),
            act: ixs.iter().map(|&ix| self.store.act_at(ix)).collect(),
            next_obs: self.stack_states(&ixs, 1),
            reward: ixs.iter().map(|&ix| self.store.reward_at(ix)).collect(),
            is_done: ixs
                .iter()
                .map(|&ix| self.store.is_done_at(ix) as i8)
                .collect(),
            ix_sample: ixs,
        })
    }

    /// States anchored at `ixs[i] + offset`, with shape
    /// `(ixs.len(), hist_len, *observation_shape)`.
    fn stack_states(&self, ixs: &[usize], offset: isize) -> ArrayD<T> {
        let shape = std::iter::once(ixs.len())
            .chain(self.state_shape())
            .collect::<Vec<_>>();
        let mut states = ArrayD::zeros(IxDyn(&shape));
        for (b, &ix) in ixs.iter().enumerate() {
            self.fill_state(states.index_axis_mut(Axis(0), b), ix as isize + offset);
        }
        states
    }
}
