//! Fixed-capacity ring storage of transitions.
use crate::{
    error::{ReplayMemoryError, Result},
    Transition,
};
use log::debug;
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};
use num_traits::Zero;

/// Parallel arrays of observations, actions, rewards and done flags.
///
/// The occupied slots are the wrapped range `[start, end)`. When `start == end`,
/// the store is either empty or full, which is told apart by `is_full`.
/// Once full, every push evicts the oldest slot.
pub struct RingStore<T> {
    capacity: usize,

    observation_shape: Vec<usize>,

    /// Position of the first push after reset.
    headroom: usize,

    /// Shape `(capacity, *observation_shape)`.
    obs: ArrayD<T>,

    act: Vec<i64>,

    reward: Vec<f32>,

    is_done: Vec<i8>,

    start: usize,

    end: usize,

    is_full: bool,
}

impl<T> RingStore<T>
where
    T: Clone + Zero,
{
    /// Creates an empty store.
    ///
    /// The first push after [`RingStore::reset`] lands at `headroom`, leaving
    /// zero-filled, non-terminal slots behind it. Those slots are counted as
    /// occupied and serve as history padding of the first frames.
    ///
    /// Fails with [`ReplayMemoryError::Configuration`] if `capacity` is zero, or
    /// if the headroom leaves no slot for a frame and its next frame.
    pub fn new(capacity: usize, observation_shape: &[usize], headroom: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ReplayMemoryError::Configuration(format!(
                "Invalid capacity: {}",
                capacity
            )));
        }
        if headroom.saturating_add(1) >= capacity {
            return Err(ReplayMemoryError::Configuration(format!(
                "Headroom {} does not fit capacity {}",
                headroom, capacity
            )));
        }

        Ok(Self {
            capacity,
            observation_shape: observation_shape.to_vec(),
            headroom,
            obs: ArrayD::zeros(Self::storage_shape(capacity, observation_shape)),
            act: vec![0; capacity],
            reward: vec![0.; capacity],
            is_done: vec![0; capacity],
            start: 0,
            end: 0,
            is_full: false,
        })
    }

    fn storage_shape(capacity: usize, observation_shape: &[usize]) -> IxDyn {
        let shape = std::iter::once(capacity)
            .chain(observation_shape.iter().copied())
            .collect::<Vec<_>>();
        IxDyn(&shape)
    }

    /// Zeroes all arrays and empties the store.
    pub fn reset(&mut self) {
        self.obs = ArrayD::zeros(Self::storage_shape(self.capacity, &self.observation_shape));
        self.act = vec![0; self.capacity];
        self.reward = vec![0.; self.capacity];
        self.is_done = vec![0; self.capacity];
        self.start = 0;
        self.end = 0;
        self.is_full = false;
        debug!("Reset ring store (capacity = {})", self.capacity);
    }

    /// Writes a transition at `end` and advances the cursors.
    ///
    /// `tr.next_obs` is not stored.
    pub fn push(&mut self, tr: Transition<T>) -> Result<()> {
        if tr.obs.shape() != &self.observation_shape[..] {
            return Err(ReplayMemoryError::ShapeMismatch {
                expected: self.observation_shape.clone(),
                actual: tr.obs.shape().to_vec(),
            });
        }

        if self.size() == 0 {
            self.end = self.headroom;
        }

        let i = self.end;
        self.obs.index_axis_mut(Axis(0), i).assign(&tr.obs);
        self.act[i] = tr.act;
        self.reward[i] = tr.reward;
        self.is_done[i] = tr.is_done as i8;

        if !self.is_full {
            self.end = (self.end + 1) % self.capacity;
            if self.end == self.start {
                self.is_full = true;
                debug!("Ring store is full (capacity = {})", self.capacity);
            }
        } else {
            self.start = (self.start + 1) % self.capacity;
            self.end = (self.end + 1) % self.capacity;
        }

        Ok(())
    }
}

impl<T> RingStore<T> {
    /// Number of occupied slots.
    pub fn size(&self) -> usize {
        if self.start < self.end {
            self.end - self.start
        } else if self.end < self.start {
            self.end + self.capacity - self.start
        } else if self.is_full {
            self.capacity
        } else {
            0
        }
    }

    /// Maximum number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Shape of a single observation.
    pub fn observation_shape(&self) -> &[usize] {
        &self.observation_shape
    }

    /// Cursor of the oldest occupied slot.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Cursor of the slot written by the next push.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns `true` if all slots are occupied.
    pub fn is_full(&self) -> bool {
        self.is_full
    }

    /// All observations, with shape `(capacity, *observation_shape)`.
    pub fn obs(&self) -> &ArrayD<T> {
        &self.obs
    }

    /// Observation at slot `i`.
    pub fn obs_at(&self, i: usize) -> ArrayViewD<'_, T> {
        self.obs.index_axis(Axis(0), i)
    }

    /// Action at slot `i`.
    pub fn act_at(&self, i: usize) -> i64 {
        self.act[i]
    }

    /// Reward at slot `i`.
    pub fn reward_at(&self, i: usize) -> f32 {
        self.reward[i]
    }

    /// Done flag at slot `i`.
    pub fn is_done_at(&self, i: usize) -> bool {
        self.is_done[i] != 0
    }

    /// Number of slots with the done flag set.
    pub fn num_done_flags(&self) -> usize {
        self.is_done.iter().map(|&d| d as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::RingStore;
    use crate::{ReplayMemoryError, Transition};
    use ndarray::{arr1, ArrayD};
    use test_log::test;

    fn tr(v: f32, is_done: bool) -> Transition<f32> {
        Transition::new(arr1(&[v, -v]).into_dyn(), v as i64, v, is_done)
    }

    #[test]
    fn test_headroom_on_first_push() -> anyhow::Result<()> {
        let mut store = RingStore::<f32>::new(8, &[2], 3)?;
        assert_eq!(store.size(), 0);

        store.push(tr(1.0, false))?;
        assert_eq!(store.start(), 0);
        assert_eq!(store.end(), 4);
        assert_eq!(store.size(), 4);
        assert_eq!(store.obs_at(3).iter().copied().collect::<Vec<f32>>(), vec![1.0, -1.0]);
        assert_eq!(store.obs_at(2).iter().copied().collect::<Vec<f32>>(), vec![0.0, 0.0]);

        // Headroom applies only to the first push
        store.push(tr(2.0, false))?;
        assert_eq!(store.end(), 5);
        assert_eq!(store.act_at(4), 2);
        Ok(())
    }

    #[test]
    fn test_eviction() -> anyhow::Result<()> {
        let mut store = RingStore::<f32>::new(4, &[2], 0)?;
        for i in 0..4 {
            store.push(tr(i as f32, false))?;
        }
        assert!(store.is_full());
        assert_eq!(store.size(), 4);
        assert_eq!((store.start(), store.end()), (0, 0));

        store.push(tr(4.0, true))?;
        assert_eq!(store.size(), 4);
        assert_eq!((store.start(), store.end()), (1, 1));
        assert_eq!(store.reward_at(0), 4.0);
        assert!(store.is_done_at(0));
        assert_eq!(store.num_done_flags(), 1);
        Ok(())
    }

    #[test]
    fn test_reset() -> anyhow::Result<()> {
        let mut store = RingStore::<f32>::new(4, &[2], 1)?;
        for i in 0..6 {
            store.push(tr(i as f32, true))?;
        }
        store.reset();
        assert_eq!(store.size(), 0);
        assert!(!store.is_full());
        assert_eq!(store.num_done_flags(), 0);
        assert!(store.obs().iter().all(|&x| x == 0.0));
        Ok(())
    }

    #[test]
    fn test_shape_mismatch() -> anyhow::Result<()> {
        let mut store = RingStore::<f32>::new(4, &[2], 0)?;
        let bad = Transition::new(ArrayD::<f32>::zeros(vec![3]), 0, 0.0, false);
        assert!(store.push(bad).is_err());
        assert_eq!(store.size(), 0);
        Ok(())
    }

    #[test]
    fn test_invalid_capacity_and_headroom() {
        for &(capacity, headroom) in &[(0, 0), (1, 0), (4, 3), (4, 7), (2, usize::MAX)] {
            let res = RingStore::<f32>::new(capacity, &[2], headroom);
            assert!(
                matches!(res, Err(ReplayMemoryError::Configuration(_))),
                "capacity = {}, headroom = {}",
                capacity,
                headroom
            );
        }

        // The largest headroom still leaves a frame and its next frame
        assert!(RingStore::<f32>::new(4, &[2], 2).is_ok());
    }
}
