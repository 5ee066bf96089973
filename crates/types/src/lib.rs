//! Core types and data models for the pet telemetry batch processor
//!
//! This crate provides the data structures shared across the pipeline:
//! raw and normalized telemetry records, classification output, and
//! per-pet aggregates.

pub mod aggregates;
pub mod classification;
pub mod records;

pub use aggregates::PetAggregate;
pub use classification::{ActivityLevel, ClassifiedRecord};
pub use records::{RawTelemetryRecord, TelemetryRecord};
