//! Story-point estimation scale
//!
//! The scale is the Fibonacci-like sequence of values a consensus may
//! settle on. It is regenerated per call; there is no shared global scale.

use serde::{Deserialize, Serialize};

/// Default ceiling for scale generation
pub const DEFAULT_SCALE_CEILING: u64 = 100;

/// Ordered, strictly increasing sequence of permissible consensus values
///
/// Seeded with `[1, 2]`; each following value is the sum of the previous
/// two. Generation continues while the last value is strictly below the
/// ceiling, so the terminating value may exceed it.
///
/// # Example
///
/// ```
/// use pointing_domain::estimation::EstimationScale;
///
/// let scale = EstimationScale::default();
/// assert_eq!(scale.values(), &[1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144]);
/// assert_eq!(scale.snap(2.5), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationScale {
    values: Vec<u64>,
}

impl EstimationScale {
    /// Generate the scale up to (and including the first value reaching) `ceiling`
    pub fn generate(ceiling: u64) -> Self {
        let mut values: Vec<u64> = vec![1, 2];
        loop {
            let n = values.len();
            let last = values[n - 1];
            if last >= ceiling {
                break;
            }
            match values[n - 2].checked_add(last) {
                Some(next) => values.push(next),
                None => break,
            }
        }
        Self { values }
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Smallest scale value (always 1)
    pub fn min(&self) -> u64 {
        self.values[0]
    }

    /// Largest scale value
    pub fn max(&self) -> u64 {
        self.values[self.values.len() - 1]
    }

    pub fn contains(&self, value: u64) -> bool {
        self.values.binary_search(&value).is_ok()
    }

    /// Snap an arbitrary value onto the nearest scale value.
    ///
    /// - `value <= 1` snaps to the minimum.
    /// - An exact match is returned as is.
    /// - Between two neighbours the nearer one wins; an exact tie rounds up.
    /// - Anything above the largest value snaps to the maximum.
    ///
    /// Total over all `f64`: `NaN` compares false everywhere and therefore
    /// falls through to the maximum.
    pub fn snap(&self, value: f64) -> u64 {
        if value <= 1.0 {
            return self.min();
        }

        for (i, &candidate) in self.values.iter().enumerate() {
            let upper = candidate as f64;
            if upper == value {
                return candidate;
            }
            if upper > value {
                if i == 0 {
                    return candidate;
                }
                let lower = self.values[i - 1];
                let below = value - lower as f64;
                let above = upper - value;
                return if below < above { lower } else { candidate };
            }
        }

        self.max()
    }
}

impl Default for EstimationScale {
    fn default() -> Self {
        Self::generate(DEFAULT_SCALE_CEILING)
    }
}

/// Generate the scale values for `ceiling`
pub fn generate_scale(ceiling: u64) -> Vec<u64> {
    EstimationScale::generate(ceiling).values
}

/// Snap `value` onto the default scale
pub fn snap_to_scale(value: f64) -> u64 {
    EstimationScale::default().snap(value)
}
