//! Record classification
//!
//! Pure, single-record classification: activity band, high-severity
//! alert flag, and anomaly flag. Every function here is deterministic,
//! free of I/O and shared state, and total over any numeric input —
//! out-of-domain values classify (and get flagged anomalous) rather
//! than producing an error.

use pettrack_types::{ActivityLevel, ClassifiedRecord, TelemetryRecord};

/// Step count at or above which activity is classified as high
pub const HIGH_ACTIVITY_STEPS: f64 = 10_000.0;

/// Step count at or above which activity is classified as medium
pub const MEDIUM_ACTIVITY_STEPS: f64 = 5_000.0;

/// Heart rate strictly above which a pain reading raises an alert
pub const ALERT_HEART_RATE_BPM: f64 = 130.0;

/// Emotion tag indicating pain (exact, case-sensitive match)
pub const PAIN_EMOTION: &str = "dolor";

/// Step count strictly above which a reading is a sensor-error anomaly
pub const MAX_PLAUSIBLE_STEPS: f64 = 50_000.0;

/// Derive the activity band for a step count
///
/// Three-way threshold ladder evaluated top-down; the first matching
/// band wins. Negative (or otherwise sub-threshold) values fall into
/// `Low`.
pub fn activity_level(activity_steps: f64) -> ActivityLevel {
    if activity_steps >= HIGH_ACTIVITY_STEPS {
        ActivityLevel::High
    } else if activity_steps >= MEDIUM_ACTIVITY_STEPS {
        ActivityLevel::Medium
    } else {
        ActivityLevel::Low
    }
}

/// Whether a reading is a high-severity health alert
///
/// True iff the heart rate is strictly above the alert threshold and
/// the emotion tag equals the pain literal exactly. No fuzzy matching.
pub fn is_alert(heart_rate_bpm: f64, emotion: &str) -> bool {
    heart_rate_bpm > ALERT_HEART_RATE_BPM && emotion == PAIN_EMOTION
}

/// Whether a reading is an out-of-domain anomaly
///
/// True iff the heart rate is negative or the step count exceeds the
/// plausible ceiling. Independent of the emotion field entirely.
pub fn is_anomalous(heart_rate_bpm: f64, activity_steps: f64) -> bool {
    heart_rate_bpm < 0.0 || activity_steps > MAX_PLAUSIBLE_STEPS
}

/// Classify a normalized record
///
/// The alert and anomaly flags are computed independently; a record can
/// carry both.
pub fn classify(record: &TelemetryRecord) -> ClassifiedRecord {
    let level = activity_level(record.activity_steps);
    let alert = is_alert(record.heart_rate_bpm, &record.emotion);
    let anomalous = is_anomalous(record.heart_rate_bpm, record.activity_steps);
    ClassifiedRecord::from_record(record.clone(), level, alert, anomalous)
}
