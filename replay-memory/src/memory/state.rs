//! Construction of stacked-frame states.
use super::{wrap, ReplayMemory};
use crate::error::{ReplayMemoryError, Result};
use ndarray::{ArrayD, ArrayViewMutD, Axis, IxDyn};
use num_traits::Zero;

impl<T> ReplayMemory<T>
where
    T: Clone + Zero,
{
    /// Copies the frames of the state anchored at unwrapped position `index`
    /// into `dst`, which has shape `(hist_len, *observation_shape)`.
    pub(super) fn fill_state(&self, mut dst: ArrayViewMutD<'_, T>, index: isize) {
        let capacity = self.capacity();
        for (k, &shift) in self.shifts.iter().enumerate() {
            dst.index_axis_mut(Axis(0), k)
                .assign(&self.store.obs_at(wrap(index + shift, capacity)));
        }
    }

    /// Returns the state of `index`, with shape `(hist_len, *observation_shape)`.
    ///
    /// `index` is supposed to be valid; the caller should check it with
    /// [`ReplayMemory::is_valid_index`] with `allow_terminal_at_index = true`.
    /// `index` may exceed the capacity, in which case it is wrapped.
    pub fn get_state(&self, index: usize) -> ArrayD<T> {
        let mut state = ArrayD::zeros(IxDyn(&self.state_shape()));
        self.fill_state(state.view_mut(), index as isize);
        state
    }

    /// Constructs the state ending at `current_obs`, which is not stored yet.
    ///
    /// If added to the memory, `current_obs` would be placed at the `end` cursor.
    /// Unlike [`ReplayMemory::get_state`], the history frames need not be all
    /// available: frames out of the stored range, or at or before the most recent
    /// terminal flag in the window, are replaced with zeros. Thus the current state
    /// can be constructed right after an episode boundary or with an empty memory.
    ///
    /// Fails only if `current_obs` does not have the configured shape.
    pub fn construct_current_state(&self, current_obs: &ArrayD<T>) -> Result<ArrayD<T>> {
        if current_obs.shape() != self.observation_shape() {
            return Err(ReplayMemoryError::ShapeMismatch {
                expected: self.observation_shape().to_vec(),
                actual: current_obs.shape().to_vec(),
            });
        }

        let hist_len = self.hist_len();
        let mut state = ArrayD::zeros(IxDyn(&self.state_shape()));
        state
            .index_axis_mut(Axis(0), hist_len - 1)
            .assign(current_obs);

        let back_shifts = &self.shifts.as_slice()[..hist_len - 1];
        if back_shifts.is_empty() {
            return Ok(state);
        }

        let capacity = self.capacity();
        let end = self.store.end() as isize;
        let lowest_stored = end - self.size() as isize;
        let last_terminal =
            (end + back_shifts[0]..end).rfind(|&i| self.store.is_done_at(wrap(i, capacity)));
        let lowest = match last_terminal {
            Some(t) => lowest_stored.max(t + 1),
            None => lowest_stored,
        };

        // Valid frames form a suffix of the window; they are right-aligned
        // before the current frame, leaving zeros in front.
        let valid = back_shifts
            .iter()
            .map(|&shift| end + shift)
            .filter(|&i| i >= lowest)
            .collect::<Vec<_>>();
        let offset = hist_len - 1 - valid.len();
        for (k, &i) in valid.iter().enumerate() {
            state
                .index_axis_mut(Axis(0), offset + k)
                .assign(&self.store.obs_at(wrap(i, capacity)));
        }

        Ok(state)
    }
}
