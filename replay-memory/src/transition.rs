//! A single environment step pushed into the replay memory.
use ndarray::ArrayD;

/// Transition `(o_t, a_t, r_t, is_done_t, o_t+1)`.
///
/// Only `(obs, act, reward, is_done)` is stored. `next_obs` is recovered from
/// the observation of the following transition in a continuous episode. When
/// `is_done` is true, `next_obs` is never recovered, which is fine since a
/// terminal transition has no bootstrapped target in DQN.
#[derive(Clone, Debug)]
pub struct Transition<T> {
    /// Observation `o_t`, already preprocessed.
    pub obs: ArrayD<T>,

    /// Action `a_t`.
    pub act: i64,

    /// Reward `r_t`.
    pub reward: f32,

    /// Whether the episode ended at this step.
    pub is_done: bool,

    /// Next observation `o_t+1`. Ignored by the replay memory.
    pub next_obs: Option<ArrayD<T>>,
}

impl<T> Transition<T> {
    /// Creates a transition without the next observation.
    pub fn new(obs: ArrayD<T>, act: i64, reward: f32, is_done: bool) -> Self {
        Self {
            obs,
            act,
            reward,
            is_done,
            next_obs: None,
        }
    }

    /// Sets the next observation.
    pub fn with_next_obs(mut self, next_obs: ArrayD<T>) -> Self {
        self.next_obs = Some(next_obs);
        self
    }
}
