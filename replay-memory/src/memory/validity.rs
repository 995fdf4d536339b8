//! Validity of anchor indices.
use super::{wrap, ReplayMemory};

impl<T> ReplayMemory<T> {
    /// Checks whether `index` can be the anchor of a state.
    ///
    /// Two requirements must be satisfied:
    /// 1. All frames in the history window of `index` are in the wrapped range
    ///    `[start, end)`.
    /// 2. No frame from the oldest one in the window up to `index` is terminal,
    ///    including those between the referenced frames. The frame at `index`
    ///    itself is checked only when `allow_terminal_at_index` is `false`,
    ///    which is required for an anchor of a sampled transition since a
    ///    terminal frame has no next state.
    pub fn is_valid_index(&self, index: usize, allow_terminal_at_index: bool) -> bool {
        let capacity = self.capacity();
        if index >= capacity {
            return false;
        }

        // Range check in unwrapped positions. Frames in [end, capacity) are the
        // older half of a wrapped range.
        let index_ = index as isize;
        let end = self.store.end() as isize;
        let size = self.store.size() as isize;
        let lowest = if index_ < end {
            end - size
        } else {
            end + capacity as isize - size
        };
        // shifts are ascending, so the oldest frame decides
        if index_ + self.shifts.min() < lowest {
            return false;
        }

        let first = wrap(index_ + self.shifts.min(), capacity);
        let stop = if allow_terminal_at_index {
            index
        } else {
            index + 1
        };
        let mut window = if first <= index {
            (first..stop).chain(0..0)
        } else {
            (first..capacity).chain(0..stop)
        };

        !window.any(|i| self.store.is_done_at(i))
    }
}
