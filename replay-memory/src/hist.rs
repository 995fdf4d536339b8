//! Relative frame offsets composing a stacked state.
use crate::error::{ReplayMemoryError, Result};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};

/// Shape of the history window of a state.
///
/// Exponential types imply that older observations have less influence on the
/// current state, since they are sampled more sparsely.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum HistType {
    /// Offsets `0, s, 2s, ...` for spacing `s`.
    #[serde(rename = "linear")]
    Linear,

    /// Offsets `2^k - 1`.
    #[serde(rename = "exp2")]
    Exp2,

    /// Offsets `ceil(1.5^k) - 1`.
    #[serde(rename = "exp1.5")]
    Exp1_5,
}

impl Default for HistType {
    fn default() -> Self {
        Self::Linear
    }
}

impl fmt::Display for HistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Linear => "linear",
            Self::Exp2 => "exp2",
            Self::Exp1_5 => "exp1.5",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for HistType {
    type Err = ReplayMemoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(Self::Linear),
            "exp2" => Ok(Self::Exp2),
            "exp1.5" => Ok(Self::Exp1_5),
            _ => Err(ReplayMemoryError::Configuration(format!(
                "Unknown history type: {} (expected linear, exp2 or exp1.5)",
                s
            ))),
        }
    }
}

impl HistType {
    /// Magnitude of the `k`-th offset, counted from the current frame.
    ///
    /// Returns `None` on overflow.
    fn magnitude(&self, k: usize, spacing: usize) -> Option<usize> {
        match self {
            Self::Linear => k.checked_mul(spacing),
            Self::Exp2 => u32::try_from(k)
                .ok()
                .and_then(|k| 1usize.checked_shl(k))
                .map(|p| p - 1),
            Self::Exp1_5 => {
                let m = 1.5f64.powi(k as i32).ceil() - 1.0;
                if m.is_finite() && m < usize::MAX as f64 {
                    Some(m as usize)
                } else {
                    None
                }
            }
        }
    }
}

/// Ordered history offsets of a state.
///
/// If the memory contains observations `[f_0, ..., f_n]`, the state at index `i` is
/// `[f_{i + shifts[0]}, ..., f_{i + shifts[hist_len - 2]}, f_i]`. The offsets are
/// non-positive, strictly increasing, and the last one is always `0`.
/// They also satisfy `capacity - 1 + shifts[0] >= 1`, which leaves room for the
/// next state of the oldest anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryShifts {
    shifts: Vec<isize>,
}

impl HistoryShifts {
    /// Computes the offsets for the given history shape.
    ///
    /// Offsets whose magnitude is not less than `capacity - 1` are dropped, so the
    /// resulting length can be smaller than `hist_len`. `hist_spacing` is used only
    /// for [`HistType::Linear`].
    pub fn compute(
        hist_len: usize,
        hist_type: HistType,
        hist_spacing: usize,
        capacity: usize,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(ReplayMemoryError::Configuration(format!(
                "Invalid capacity: {}",
                capacity
            )));
        }
        if capacity == 1 {
            return Err(ReplayMemoryError::Configuration(
                "Capacity must be at least 2 to hold a state and its next state".into(),
            ));
        }
        if hist_len == 0 {
            return Err(ReplayMemoryError::Configuration(
                "hist_len must be positive".into(),
            ));
        }
        if hist_type == HistType::Linear && hist_spacing == 0 {
            return Err(ReplayMemoryError::Configuration(
                "hist_spacing must be positive for linear history".into(),
            ));
        }

        // Magnitudes grow strictly, so the capacity filter cuts a prefix.
        let limit = capacity - 1;
        let mut shifts = (0..hist_len)
            .map_while(|k| hist_type.magnitude(k, hist_spacing))
            .take_while(|&m| m < limit && m <= isize::MAX as usize)
            .map(|m| -(m as isize))
            .collect::<Vec<_>>();
        shifts.reverse();

        Ok(Self { shifts })
    }

    /// Number of frames in a state.
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    /// The most negative offset, i.e., that of the oldest frame.
    pub fn min(&self) -> isize {
        self.shifts[0]
    }

    /// Offsets in ascending order.
    pub fn as_slice(&self) -> &[isize] {
        &self.shifts
    }

    /// Iterates over the offsets in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &isize> {
        self.shifts.iter()
    }
}
