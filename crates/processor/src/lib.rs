//! Batch processor for pet telemetry records
//!
//! This crate provides the record classification and aggregation engine:
//! given a bounded batch of raw telemetry records it normalizes them,
//! derives per-record classifications (activity band, alert flag, anomaly
//! flag), accumulates per-pet rolling statistics, and emits three result
//! sets — high-severity alerts, per-pet aggregates, and anomalous
//! readings — through a pluggable output sink.

pub mod aggregation;
pub mod classifier;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod sink;

// Re-export commonly used types
pub use aggregation::{PetAccumulator, PetAggregator};
pub use classifier::{activity_level, classify, is_alert, is_anomalous};
pub use config::{CoercionPolicy, PipelineConfig};
pub use error::{
    NormalizeError, ProcessorError, SinkError,
    Result as ProcessorResult,
};
pub use normalizer::RecordNormalizer;
pub use pipeline::{BatchOutput, BatchPipeline, BatchStats};
pub use sink::{JsonLinesSink, MemorySink, OutputDataset, ResultSink};
