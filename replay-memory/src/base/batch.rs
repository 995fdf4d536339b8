//! Batch of transitions.

/// A batch of transitions used in an optimization step.
pub trait TransitionBatch {
    /// A set of observations (states) in a batch.
    type ObsBatch;

    /// A set of actions in a batch.
    type ActBatch;

    /// Unpacks the batch into its components.
    ///
    /// # Returns
    ///
    /// A tuple `(o_t, a_t, o_t+1, r_t, is_done_t)`, where `is_done_t` is `1`
    /// for terminal transitions and `0` otherwise
    fn unpack(self) -> (Self::ObsBatch, Self::ActBatch, Self::ObsBatch, Vec<f32>, Vec<i8>);

    /// Returns the number of samples.
    fn len(&self) -> usize;

    /// Returns `o_t`.
    fn obs(&self) -> &Self::ObsBatch;

    /// Returns `a_t`.
    fn act(&self) -> &Self::ActBatch;

    /// Returns `o_t+1`.
    fn next_obs(&self) -> &Self::ObsBatch;

    /// Returns `r_t`.
    fn reward(&self) -> &Vec<f32>;

    /// Returns `is_done_t`.
    fn is_done(&self) -> &Vec<i8>;
}
