//! Telemetry record types
//!
//! Records arrive from upstream device tagging with the columnar field
//! names of the source schema (`idmascota`, `heart_rate_bpm`,
//! `activity_steps`, `emotion`). The raw form keeps every field optional
//! and the pet identifier loosely typed, so schema problems surface in
//! the normalizer rather than as deserialization failures.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A telemetry record as read from upstream, before normalization
///
/// `idmascota` is whatever the upstream tagger produced: a JSON integer,
/// an integral float, or a numeric string have all been observed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTelemetryRecord {
    /// Pet identifier, loosely typed
    pub idmascota: Option<Value>,
    /// Heart rate in beats per minute
    pub heart_rate_bpm: Option<f64>,
    /// Step count for the reporting period
    pub activity_steps: Option<f64>,
    /// Free-form emotional-state tag
    pub emotion: Option<String>,
}

impl RawTelemetryRecord {
    /// Create a raw record with every field present
    pub fn new(
        idmascota: impl Into<Value>,
        heart_rate_bpm: f64,
        activity_steps: f64,
        emotion: impl Into<String>,
    ) -> Self {
        Self {
            idmascota: Some(idmascota.into()),
            heart_rate_bpm: Some(heart_rate_bpm),
            activity_steps: Some(activity_steps),
            emotion: Some(emotion.into()),
        }
    }
}

/// A normalized telemetry record
///
/// Immutable once produced by the normalizer; every downstream stage
/// assumes a well-typed `pet_id`. Heart rate is non-negative in the
/// valid domain, but malformed upstream data may supply negative values;
/// those still classify (flagged anomalous) rather than being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Pet identifier; many records per pet within a batch
    #[serde(rename = "idmascota")]
    pub pet_id: i64,
    /// Heart rate in beats per minute
    pub heart_rate_bpm: f64,
    /// Step count for the reporting period, expected in [0, 50000]
    pub activity_steps: f64,
    /// Free-form emotional-state tag (`"dolor"` = pain)
    pub emotion: String,
}

impl TelemetryRecord {
    /// Create a new telemetry record
    pub fn new(pet_id: i64, heart_rate_bpm: f64, activity_steps: f64, emotion: impl Into<String>) -> Self {
        Self {
            pet_id,
            heart_rate_bpm,
            activity_steps,
            emotion: emotion.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_deserializes_upstream_field_names() {
        let raw: RawTelemetryRecord = serde_json::from_str(
            r#"{"idmascota": 7, "heart_rate_bpm": 88.0, "activity_steps": 4200.0, "emotion": "feliz"}"#,
        )
        .unwrap();

        assert_eq!(raw.idmascota, Some(Value::from(7)));
        assert_eq!(raw.heart_rate_bpm, Some(88.0));
        assert_eq!(raw.activity_steps, Some(4200.0));
        assert_eq!(raw.emotion.as_deref(), Some("feliz"));
    }

    #[test]
    fn test_raw_record_tolerates_missing_fields() {
        let raw: RawTelemetryRecord = serde_json::from_str(r#"{"idmascota": "12"}"#).unwrap();

        assert_eq!(raw.idmascota, Some(Value::from("12")));
        assert!(raw.heart_rate_bpm.is_none());
        assert!(raw.activity_steps.is_none());
        assert!(raw.emotion.is_none());
    }

    #[test]
    fn test_raw_record_tolerates_string_pet_id() {
        let raw = RawTelemetryRecord::new("42", 100.0, 5000.0, "calma");
        assert_eq!(raw.idmascota, Some(Value::from("42")));
    }

    #[test]
    fn test_telemetry_record_serializes_pet_id_as_idmascota() {
        let record = TelemetryRecord::new(3, 95.0, 7500.0, "calma");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["idmascota"], 3);
        assert!(json.get("pet_id").is_none());
    }

    #[test]
    fn test_telemetry_record_roundtrip() {
        let record = TelemetryRecord::new(1, 140.0, 12000.0, "dolor");
        let json = serde_json::to_string(&record).unwrap();
        let back: TelemetryRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, back);
    }
}
