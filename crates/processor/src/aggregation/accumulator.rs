//! Partial aggregation state for a single pet

use serde::{Deserialize, Serialize};

/// Running sums and count for one pet
///
/// The accumulator is the unit of distribution: it serializes, and
/// `merge` combines two partials produced by different workers. Sum and
/// count are commutative and associative, so any merge order yields the
/// same result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetAccumulator {
    count: u64,
    heart_rate_sum: f64,
    activity_steps_sum: f64,
}

impl PetAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one reading into the running sums
    pub fn update(&mut self, heart_rate_bpm: f64, activity_steps: f64) {
        self.count += 1;
        self.heart_rate_sum += heart_rate_bpm;
        self.activity_steps_sum += activity_steps;
    }

    /// Merge another partial into this one
    pub fn merge(&mut self, other: &PetAccumulator) {
        self.count += other.count;
        self.heart_rate_sum += other.heart_rate_sum;
        self.activity_steps_sum += other.activity_steps_sum;
    }

    /// Number of readings folded in so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Whether any readings have been folded in
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Sum of heart rates folded in so far
    pub fn heart_rate_sum(&self) -> f64 {
        self.heart_rate_sum
    }

    /// Sum of step counts folded in so far
    pub fn activity_steps_sum(&self) -> f64 {
        self.activity_steps_sum
    }

    /// Mean heart rate, `None` while empty
    pub fn avg_heart_rate(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.heart_rate_sum / self.count as f64)
        }
    }

    /// Mean step count, `None` while empty
    pub fn avg_activity_steps(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.activity_steps_sum / self.count as f64)
        }
    }
}
