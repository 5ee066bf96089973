//! Record normalization
//!
//! The upstream tagger is sloppy about the pet identifier: the same
//! field arrives as a JSON integer, an integral float, or a numeric
//! string depending on the device firmware. This module coerces it to a
//! fixed-width integer and verifies the required fields are present. No
//! other field transformation happens here.

use pettrack_types::{RawTelemetryRecord, TelemetryRecord};
use serde_json::Value;

use crate::error::{NormalizeError, NormalizeResult};

/// Stateless normalizer for raw telemetry records
#[derive(Debug, Clone, Default)]
pub struct RecordNormalizer;

impl RecordNormalizer {
    /// Create a new normalizer
    pub fn new() -> Self {
        Self
    }

    /// Normalize a single raw record
    ///
    /// A missing required field yields `NormalizeError::MissingField`
    /// (fatal for the batch); a present but non-coercible pet id yields
    /// `NormalizeError::TypeCoercion` (recoverable, per pipeline policy).
    pub fn normalize(&self, raw: &RawTelemetryRecord) -> NormalizeResult<TelemetryRecord> {
        let pet_id = match &raw.idmascota {
            Some(value) => coerce_pet_id(value)?,
            None => return Err(NormalizeError::MissingField { field: "idmascota" }),
        };
        let heart_rate_bpm = raw
            .heart_rate_bpm
            .ok_or(NormalizeError::MissingField { field: "heart_rate_bpm" })?;
        let activity_steps = raw
            .activity_steps
            .ok_or(NormalizeError::MissingField { field: "activity_steps" })?;
        let emotion = raw
            .emotion
            .clone()
            .ok_or(NormalizeError::MissingField { field: "emotion" })?;

        Ok(TelemetryRecord {
            pet_id,
            heart_rate_bpm,
            activity_steps,
            emotion,
        })
    }
}

/// Coerce a loosely typed pet identifier to `i64`
///
/// Accepts JSON integers, floats with an integral value (upstream
/// cast-to-long semantics), and numeric strings (surrounding whitespace
/// tolerated).
fn coerce_pet_id(value: &Value) -> NormalizeResult<i64> {
    match value {
        Value::Number(n) => {
            if let Some(id) = n.as_i64() {
                return Ok(id);
            }
            if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                    return Ok(f as i64);
                }
            }
            Err(coercion_error(value, "number is not an integral value"))
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| coercion_error(value, &e.to_string())),
        _ => Err(coercion_error(value, "expected a number or numeric string")),
    }
}

fn coercion_error(value: &Value, reason: &str) -> NormalizeError {
    NormalizeError::TypeCoercion {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(idmascota: Value) -> RawTelemetryRecord {
        RawTelemetryRecord {
            idmascota: Some(idmascota),
            heart_rate_bpm: Some(100.0),
            activity_steps: Some(5000.0),
            emotion: Some("calma".to_string()),
        }
    }

    #[test]
    fn test_normalize_integer_pet_id() {
        let normalizer = RecordNormalizer::new();
        let record = normalizer.normalize(&raw(Value::from(42))).unwrap();
        assert_eq!(record.pet_id, 42);
        assert_eq!(record.heart_rate_bpm, 100.0);
        assert_eq!(record.emotion, "calma");
    }

    #[test]
    fn test_normalize_integral_float_pet_id() {
        let normalizer = RecordNormalizer::new();
        let record = normalizer.normalize(&raw(Value::from(42.0))).unwrap();
        assert_eq!(record.pet_id, 42);
    }

    #[test]
    fn test_normalize_numeric_string_pet_id() {
        let normalizer = RecordNormalizer::new();
        let record = normalizer.normalize(&raw(Value::from(" 42 "))).unwrap();
        assert_eq!(record.pet_id, 42);
    }

    #[test]
    fn test_normalize_negative_pet_id() {
        let normalizer = RecordNormalizer::new();
        let record = normalizer.normalize(&raw(Value::from(-3))).unwrap();
        assert_eq!(record.pet_id, -3);
    }

    #[test]
    fn test_fractional_float_pet_id_fails_coercion() {
        let normalizer = RecordNormalizer::new();
        let err = normalizer.normalize(&raw(Value::from(42.5))).unwrap_err();
        assert!(matches!(err, NormalizeError::TypeCoercion { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_non_numeric_string_pet_id_fails_coercion() {
        let normalizer = RecordNormalizer::new();
        let err = normalizer.normalize(&raw(Value::from("perro"))).unwrap_err();
        assert!(matches!(err, NormalizeError::TypeCoercion { .. }));
    }

    #[test]
    fn test_boolean_pet_id_fails_coercion() {
        let normalizer = RecordNormalizer::new();
        let err = normalizer.normalize(&raw(Value::from(true))).unwrap_err();
        assert!(matches!(err, NormalizeError::TypeCoercion { .. }));
    }

    #[test]
    fn test_missing_pet_id_is_fatal() {
        let normalizer = RecordNormalizer::new();
        let mut record = raw(Value::from(1));
        record.idmascota = None;

        let err = normalizer.normalize(&record).unwrap_err();
        assert!(matches!(err, NormalizeError::MissingField { field: "idmascota" }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_missing_heart_rate_is_fatal() {
        let normalizer = RecordNormalizer::new();
        let mut record = raw(Value::from(1));
        record.heart_rate_bpm = None;

        let err = normalizer.normalize(&record).unwrap_err();
        assert!(matches!(err, NormalizeError::MissingField { field: "heart_rate_bpm" }));
    }

    #[test]
    fn test_missing_emotion_is_fatal() {
        let normalizer = RecordNormalizer::new();
        let mut record = raw(Value::from(1));
        record.emotion = None;

        let err = normalizer.normalize(&record).unwrap_err();
        assert!(matches!(err, NormalizeError::MissingField { field: "emotion" }));
    }

    #[test]
    fn test_no_other_field_is_transformed() {
        let normalizer = RecordNormalizer::new();
        let mut record = raw(Value::from(1));
        record.heart_rate_bpm = Some(-5.0);
        record.activity_steps = Some(60000.0);
        record.emotion = Some("DOLOR".to_string());

        let normalized = normalizer.normalize(&record).unwrap();
        assert_eq!(normalized.heart_rate_bpm, -5.0);
        assert_eq!(normalized.activity_steps, 60000.0);
        assert_eq!(normalized.emotion, "DOLOR");
    }
}
