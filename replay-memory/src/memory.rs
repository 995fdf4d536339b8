//! Replay memory storing single frames and serving stacked-frame states.
mod batch;
mod config;
mod sampler;
mod state;
mod validity;
use crate::{
    error::Result, ExperienceBufferBase, HistoryShifts, ReplayBufferBase, RingStore, Transition,
};
pub use batch::StackedBatch;
pub use config::ReplayMemoryConfig;
use log::{info, warn};
use num_traits::Zero;
use rand::{rngs::StdRng, SeedableRng};

/// Maps an unwrapped position to its slot.
#[inline]
fn wrap(i: isize, capacity: usize) -> usize {
    i.rem_euclid(capacity as isize) as usize
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Replay memory for off-policy agents like DQN.
///
/// Each environment step is stored as a single frame in a [`RingStore`], and a
/// state is assembled from a window of past frames described by
/// [`HistoryShifts`]. The state of index `i` is
/// `[f_{i + shifts[0]}, ..., f_{i + shifts[hist_len - 2]}, f_i]`.
///
/// ```mermaid
/// graph LR
///     L[Training loop]-->|add|S[RingStore]
///     L-->|sample|B[Sampler]
///     B-->|is_valid_index|V[IndexValidator]
///     V-->H[HistoryShifts]
///     V-->S
///     B-->|get_state|G[StateBuilder]
///     G-->S
///     P[Policy]-->|construct_current_state|G
/// ```
///
/// * [`ReplayMemory::add`] stores `(o_t, a_t, r_t, is_done_t)`. `o_t+1` is
///   recovered from the next slot.
/// * [`ReplayMemory::sample`] draws anchor indices uniformly with replacement and
///   rejects those whose history window is out of range or crosses an episode
///   boundary.
/// * [`ReplayMemory::construct_current_state`] builds the state for action
///   selection, padding missing history with zeros.
///
/// The memory is not synchronized; wrap it with a mutex when it is shared
/// between threads.
pub struct ReplayMemory<T = f32> {
    store: RingStore<T>,
    shifts: HistoryShifts,
    max_sample_attempts: usize,
    rng: StdRng,
}

impl<T> ReplayMemory<T>
where
    T: Clone + Zero,
{
    /// Builds a replay memory.
    ///
    /// Fails with [`ReplayMemoryError::Configuration`](crate::ReplayMemoryError::Configuration)
    /// if the capacity cannot hold a state and its next state.
    pub fn build(config: &ReplayMemoryConfig) -> Result<Self> {
        let shifts = HistoryShifts::compute(
            config.hist_len,
            config.hist_type,
            config.hist_spacing,
            config.capacity,
        )?;
        if shifts.len() < config.hist_len {
            warn!(
                "hist_len is reduced from {} to {} to fit capacity {}",
                config.hist_len,
                shifts.len(),
                config.capacity
            );
        }
        info!(
            "Build replay memory: capacity = {}, observation_shape = {:?}, hist_type = {}, shifts = {:?}",
            config.capacity,
            config.observation_shape,
            config.hist_type,
            shifts.as_slice()
        );

        let headroom = (-shifts.min()) as usize;
        let mut memory = Self {
            store: RingStore::new(config.capacity, &config.observation_shape, headroom)?,
            shifts,
            max_sample_attempts: config.max_sample_attempts,
            rng: StdRng::seed_from_u64(config.seed),
        };
        memory.reset();

        Ok(memory)
    }

    /// Clears all transitions.
    pub fn reset(&mut self) {
        self.store.reset();
    }

    /// Adds a transition.
    ///
    /// Only `(obs, act, reward, is_done)` is stored, and `next_obs` is ignored.
    /// In a continuous episode it is added by the next call as the following
    /// observation. After a terminal transition it is never stored, which does
    /// not matter since the TD target of a terminal transition does not use it.
    ///
    /// When the memory is full, the oldest transition is evicted.
    pub fn add(&mut self, transition: Transition<T>) -> Result<()> {
        self.store.push(transition)
    }
}

impl<T> ReplayMemory<T> {
    /// Number of stored transitions, including the zero-filled history padding
    /// behind the first transition.
    pub fn size(&self) -> usize {
        self.store.size()
    }

    /// Maximum number of transitions.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Returns `true` if the memory is full.
    pub fn is_full(&self) -> bool {
        self.store.is_full()
    }

    /// Cursors `(start, end)` of the occupied range.
    pub fn cursors(&self) -> (usize, usize) {
        (self.store.start(), self.store.end())
    }

    /// Effective number of frames in a state.
    pub fn hist_len(&self) -> usize {
        self.shifts.len()
    }

    /// History offsets of a state.
    pub fn hist_shifts(&self) -> &HistoryShifts {
        &self.shifts
    }

    /// Shape of a single observation.
    pub fn observation_shape(&self) -> &[usize] {
        self.store.observation_shape()
    }

    /// Shape of a state, `(hist_len, *observation_shape)`.
    pub fn state_shape(&self) -> Vec<usize> {
        std::iter::once(self.hist_len())
            .chain(self.observation_shape().iter().copied())
            .collect()
    }

    /// Number of stored terminal transitions.
    pub fn num_done_flags(&self) -> usize {
        self.store.num_done_flags()
    }

    /// Summary of the size and cursors.
    pub fn info(&self) -> String {
        format!(
            "size = {} (capacity = {}{})\ncursors: ({}, {})",
            self.size(),
            self.capacity(),
            if self.is_full() { ", full" } else { "" },
            self.store.start(),
            self.store.end()
        )
    }
}

impl<T> ExperienceBufferBase for ReplayMemory<T>
where
    T: Clone + Zero,
{
    type Item = Transition<T>;

    fn push(&mut self, tr: Self::Item) -> anyhow::Result<()> {
        Ok(self.add(tr)?)
    }

    fn len(&self) -> usize {
        self.size()
    }
}

impl<T> ReplayBufferBase for ReplayMemory<T>
where
    T: Clone + Zero,
{
    type Config = ReplayMemoryConfig;
    type Batch = StackedBatch<T>;

    fn build(config: &Self::Config) -> anyhow::Result<Self> {
        Ok(Self::build(config)?)
    }

    fn batch(&mut self, size: usize) -> anyhow::Result<Self::Batch> {
        Ok(self.sample(size)?)
    }
}
