//! Output sink seam
//!
//! The pipeline hands its three result sets to a `ResultSink`. Every
//! write is a full replacement of whatever the sink previously held for
//! that dataset name, which makes reruns of an unchanged batch
//! idempotent.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use pettrack_types::{ClassifiedRecord, PetAggregate};
use serde::Serialize;
use tracing::info;

use crate::error::{SinkError, SinkResult};

/// The three named output datasets produced by a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputDataset {
    HighAlerts,
    PetAggregates,
    Anomalies,
}

impl OutputDataset {
    /// Upstream dataset name, used as the persistence key
    pub fn name(&self) -> &'static str {
        match self {
            OutputDataset::HighAlerts => "alertas_altas",
            OutputDataset::PetAggregates => "aggregados_por_mascota",
            OutputDataset::Anomalies => "errores",
        }
    }
}

impl fmt::Display for OutputDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Destination for the three result sets of a batch run
///
/// Implementations must use overwrite semantics: each call replaces the
/// dataset's prior contents entirely. A failed write should surface a
/// `SinkError` naming the dataset so the caller can retry the full run.
pub trait ResultSink {
    /// Replace the high-severity alerts dataset
    fn write_alerts(&mut self, alerts: &[ClassifiedRecord]) -> SinkResult<()>;

    /// Replace the per-pet aggregates dataset
    fn write_aggregates(&mut self, aggregates: &[PetAggregate]) -> SinkResult<()>;

    /// Replace the anomalous readings dataset
    fn write_anomalies(&mut self, anomalies: &[ClassifiedRecord]) -> SinkResult<()>;
}

/// In-memory sink for tests and embedding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySink {
    pub alerts: Vec<ClassifiedRecord>,
    pub aggregates: Vec<PetAggregate>,
    pub anomalies: Vec<ClassifiedRecord>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultSink for MemorySink {
    fn write_alerts(&mut self, alerts: &[ClassifiedRecord]) -> SinkResult<()> {
        self.alerts = alerts.to_vec();
        Ok(())
    }

    fn write_aggregates(&mut self, aggregates: &[PetAggregate]) -> SinkResult<()> {
        self.aggregates = aggregates.to_vec();
        Ok(())
    }

    fn write_anomalies(&mut self, anomalies: &[ClassifiedRecord]) -> SinkResult<()> {
        self.anomalies = anomalies.to_vec();
        Ok(())
    }
}

/// Sink writing each dataset as a JSON Lines file under a directory
///
/// `<output_dir>/<dataset>.jsonl`, replaced wholesale on every write.
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    output_dir: PathBuf,
}

impl JsonLinesSink {
    /// Create a sink rooted at `output_dir` (created on first write)
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path the given dataset is written to
    pub fn dataset_path(&self, dataset: OutputDataset) -> PathBuf {
        self.output_dir.join(format!("{}.jsonl", dataset.name()))
    }

    fn write_dataset<T: Serialize>(&self, dataset: OutputDataset, rows: &[T]) -> SinkResult<()> {
        fs::create_dir_all(&self.output_dir).map_err(|e| SinkError::WriteFailed {
            dataset: dataset.name(),
            reason: e.to_string(),
        })?;

        let mut buf = Vec::new();
        for row in rows {
            serde_json::to_writer(&mut buf, row).map_err(|source| SinkError::Serialization {
                dataset: dataset.name(),
                source,
            })?;
            buf.push(b'\n');
        }

        let path = self.dataset_path(dataset);
        fs::write(&path, &buf).map_err(|e| SinkError::WriteFailed {
            dataset: dataset.name(),
            reason: e.to_string(),
        })?;

        info!(
            dataset = dataset.name(),
            rows = rows.len(),
            path = %path.display(),
            "dataset written"
        );
        Ok(())
    }
}

impl ResultSink for JsonLinesSink {
    fn write_alerts(&mut self, alerts: &[ClassifiedRecord]) -> SinkResult<()> {
        self.write_dataset(OutputDataset::HighAlerts, alerts)
    }

    fn write_aggregates(&mut self, aggregates: &[PetAggregate]) -> SinkResult<()> {
        self.write_dataset(OutputDataset::PetAggregates, aggregates)
    }

    fn write_anomalies(&mut self, anomalies: &[ClassifiedRecord]) -> SinkResult<()> {
        self.write_dataset(OutputDataset::Anomalies, anomalies)
    }
}
