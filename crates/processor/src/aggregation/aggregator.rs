//! Stateful reducer keyed by pet identifier

use std::collections::HashMap;

use pettrack_types::{PetAggregate, TelemetryRecord};

use super::accumulator::PetAccumulator;

/// Per-pet aggregation over one batch
///
/// `add` folds a record into the accumulator for its pet id; it never
/// reads the classification flags, so anomalous and alert records count
/// toward the averages like any other reading. State lives for one run
/// and is discarded after `finalize`.
#[derive(Debug, Clone, Default)]
pub struct PetAggregator {
    accumulators: HashMap<i64, PetAccumulator>,
}

impl PetAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the accumulator for its pet
    pub fn add(&mut self, record: &TelemetryRecord) {
        self.accumulators
            .entry(record.pet_id)
            .or_default()
            .update(record.heart_rate_bpm, record.activity_steps);
    }

    /// Fold a slice of records
    pub fn add_batch(&mut self, records: &[TelemetryRecord]) {
        for record in records {
            self.add(record);
        }
    }

    /// Merge a shard produced by another worker
    ///
    /// Partial-sum merge is commutative and associative, so shards can
    /// be reduced in any order with identical results.
    pub fn merge(&mut self, other: PetAggregator) {
        for (pet_id, partial) in other.accumulators {
            self.accumulators.entry(pet_id).or_default().merge(&partial);
        }
    }

    /// Number of distinct pets seen so far
    pub fn len(&self) -> usize {
        self.accumulators.len()
    }

    /// Whether any records have been added
    pub fn is_empty(&self) -> bool {
        self.accumulators.is_empty()
    }

    /// The accumulator for a pet, if any record referenced it
    pub fn accumulator(&self, pet_id: i64) -> Option<&PetAccumulator> {
        self.accumulators.get(&pet_id)
    }

    /// Discard all accumulated state
    pub fn reset(&mut self) {
        self.accumulators.clear();
    }

    /// Produce one aggregate per distinct pet id encountered
    ///
    /// The rows come out sorted by pet id so emission is deterministic,
    /// but callers must not rely on any particular order. Division by
    /// zero cannot occur: a key only exists after at least one `add`.
    pub fn finalize(&self) -> Vec<PetAggregate> {
        let mut aggregates: Vec<PetAggregate> = self
            .accumulators
            .iter()
            .map(|(pet_id, acc)| {
                PetAggregate::new(
                    *pet_id,
                    acc.avg_heart_rate().unwrap_or(0.0),
                    acc.avg_activity_steps().unwrap_or(0.0),
                )
            })
            .collect();
        aggregates.sort_by_key(|agg| agg.pet_id);
        aggregates
    }
}
