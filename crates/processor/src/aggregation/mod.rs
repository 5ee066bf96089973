//! Per-pet aggregation
//!
//! This module provides the stateful half of the engine: a reducer
//! keyed by pet identifier that accumulates running sums and counts and
//! finalizes them into mean heart rate and mean step count per pet.
//! Accumulators are serializable and merge commutatively and
//! associatively, so a batch can be sharded by key across workers and
//! the partial sums reduced in any order with identical results.

pub mod accumulator;
pub mod aggregator;

pub use accumulator::PetAccumulator;
pub use aggregator::PetAggregator;
