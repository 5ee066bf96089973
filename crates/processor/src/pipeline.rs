//! Batch pipeline orchestration
//!
//! Drives one bounded batch end to end: normalize every raw record,
//! classify and aggregate the survivors, partition the classified
//! records into alerts and anomalies, and finalize per-pet aggregates.
//! The whole run happens inside a tracing span that closes on every
//! exit path, success or error.

use chrono::{DateTime, Utc};
use pettrack_types::{ClassifiedRecord, PetAggregate, RawTelemetryRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use crate::aggregation::PetAggregator;
use crate::classifier;
use crate::config::{CoercionPolicy, PipelineConfig};
use crate::error::{NormalizeError, Result};
use crate::normalizer::RecordNormalizer;
use crate::sink::ResultSink;

/// Counters and timing for one batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Raw records presented to the pipeline
    pub records_in: u64,
    /// Records that survived normalization
    pub records_normalized: u64,
    /// Records skipped for a non-coercible pet id
    pub records_skipped: u64,
    /// Records flagged as high-severity alerts
    pub alert_count: u64,
    /// Records flagged as anomalous
    pub anomaly_count: u64,
    /// Distinct pets seen in the batch
    pub pets_seen: u64,
    /// Wall-clock start of the run
    pub started_at: DateTime<Utc>,
    /// Wall-clock end of the run
    pub finished_at: DateTime<Utc>,
}

impl BatchStats {
    /// Wall-clock duration of the run
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// The three result sets of a batch run plus its stats
///
/// `alerts` and `anomalies` are flag-filtered subsets of the classified
/// records and may overlap; `aggregates` covers the full unfiltered
/// normalized batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutput {
    pub alerts: Vec<ClassifiedRecord>,
    pub aggregates: Vec<PetAggregate>,
    pub anomalies: Vec<ClassifiedRecord>,
    pub stats: BatchStats,
}

/// Orchestrator for one bounded batch
///
/// Holds no state between runs; every `run` builds its aggregator
/// fresh and discards it after finalizing.
#[derive(Debug, Clone, Default)]
pub struct BatchPipeline {
    config: PipelineConfig,
    normalizer: RecordNormalizer,
}

impl BatchPipeline {
    /// Create a pipeline with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with the given configuration
    pub fn with_config(config: PipelineConfig) -> Self {
        Self {
            config,
            normalizer: RecordNormalizer::new(),
        }
    }

    /// Process one batch of raw records
    ///
    /// A missing required field aborts the batch with no output. A
    /// non-coercible pet id is skipped and counted under
    /// `CoercionPolicy::Skip` (the default), or aborts the batch under
    /// `CoercionPolicy::Fail`.
    pub fn run(&self, records: &[RawTelemetryRecord]) -> Result<BatchOutput> {
        let span = info_span!("batch_run", records_in = records.len());
        let _guard = span.enter();
        let started_at = Utc::now();

        let mut aggregator = PetAggregator::new();
        let mut alerts = Vec::new();
        let mut anomalies = Vec::new();
        let mut normalized = 0u64;
        let mut skipped = 0u64;

        for raw in records {
            let record = match self.normalizer.normalize(raw) {
                Ok(record) => record,
                Err(err @ NormalizeError::MissingField { .. }) => return Err(err.into()),
                Err(err) => match self.config.coercion_policy {
                    CoercionPolicy::Skip => {
                        warn!(%err, "skipping record that failed normalization");
                        skipped += 1;
                        continue;
                    }
                    CoercionPolicy::Fail => return Err(err.into()),
                },
            };

            normalized += 1;
            aggregator.add(&record);

            let classified = classifier::classify(&record);
            if classified.is_alert {
                alerts.push(classified.clone());
            }
            if classified.is_anomalous {
                anomalies.push(classified);
            }
        }

        let aggregates = aggregator.finalize();
        let stats = BatchStats {
            records_in: records.len() as u64,
            records_normalized: normalized,
            records_skipped: skipped,
            alert_count: alerts.len() as u64,
            anomaly_count: anomalies.len() as u64,
            pets_seen: aggregates.len() as u64,
            started_at,
            finished_at: Utc::now(),
        };

        info!(
            records_in = stats.records_in,
            normalized = stats.records_normalized,
            skipped = stats.records_skipped,
            alerts = stats.alert_count,
            anomalies = stats.anomaly_count,
            pets = stats.pets_seen,
            "batch run complete"
        );

        Ok(BatchOutput {
            alerts,
            aggregates,
            anomalies,
            stats,
        })
    }

    /// Write the three result sets to a sink
    ///
    /// Emission stops at the first failing dataset and the error names
    /// it; the caller retries the whole run rather than reconciling
    /// partial output (overwrite semantics make the rerun safe).
    pub fn emit(&self, output: &BatchOutput, sink: &mut dyn ResultSink) -> Result<()> {
        sink.write_alerts(&output.alerts)?;
        debug!(rows = output.alerts.len(), "alerts emitted");
        sink.write_aggregates(&output.aggregates)?;
        debug!(rows = output.aggregates.len(), "aggregates emitted");
        sink.write_anomalies(&output.anomalies)?;
        debug!(rows = output.anomalies.len(), "anomalies emitted");
        Ok(())
    }

    /// Process a batch and emit its outputs in one call
    pub fn run_and_emit(
        &self,
        records: &[RawTelemetryRecord],
        sink: &mut dyn ResultSink,
    ) -> Result<BatchOutput> {
        let output = self.run(records)?;
        self.emit(&output, sink)?;
        Ok(output)
    }
}
