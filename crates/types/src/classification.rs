//! Classification output types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::records::TelemetryRecord;

/// Three-band categorical summary of a step count
///
/// `High` iff `activity_steps >= 10000`; `Medium` iff
/// `5000 <= activity_steps < 10000`; `Low` otherwise. The bands are
/// exact, non-overlapping, and exhaustive over any numeric input
/// (negative step counts fall into `Low`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    High,
    Medium,
    Low,
}

impl ActivityLevel {
    /// String form used in the output datasets
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::High => "high",
            ActivityLevel::Medium => "medium",
            ActivityLevel::Low => "low",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A telemetry record with its derived classification
///
/// One ClassifiedRecord exists per normalized input record. The alert
/// and anomaly flags are computed independently and are not mutually
/// exclusive: a record can be both alert-worthy and anomalous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    /// Pet identifier
    #[serde(rename = "idmascota")]
    pub pet_id: i64,
    /// Heart rate in beats per minute
    pub heart_rate_bpm: f64,
    /// Step count for the reporting period
    pub activity_steps: f64,
    /// Free-form emotional-state tag
    pub emotion: String,
    /// Derived activity band
    pub activity_level: ActivityLevel,
    /// High heart rate combined with a pain tag
    pub is_alert: bool,
    /// Out-of-domain numeric value (sensor/data error)
    pub is_anomalous: bool,
}

impl ClassifiedRecord {
    /// Attach a classification to a normalized record
    pub fn from_record(
        record: TelemetryRecord,
        activity_level: ActivityLevel,
        is_alert: bool,
        is_anomalous: bool,
    ) -> Self {
        Self {
            pet_id: record.pet_id,
            heart_rate_bpm: record.heart_rate_bpm,
            activity_steps: record.activity_steps,
            emotion: record.emotion,
            activity_level,
            is_alert,
            is_anomalous,
        }
    }
}
