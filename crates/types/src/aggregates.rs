//! Per-pet aggregate types

use serde::{Deserialize, Serialize};

/// Summary statistics for one pet over one batch
///
/// The means cover every record for the pet in the batch, including
/// anomalous and alert records; aggregation is unfiltered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetAggregate {
    /// Pet identifier
    #[serde(rename = "idmascota")]
    pub pet_id: i64,
    /// Arithmetic mean heart rate over the batch
    pub avg_heart_rate: f64,
    /// Arithmetic mean step count over the batch
    pub avg_activity_steps: f64,
}

impl PetAggregate {
    /// Create a new aggregate row
    pub fn new(pet_id: i64, avg_heart_rate: f64, avg_activity_steps: f64) -> Self {
        Self {
            pet_id,
            avg_heart_rate,
            avg_activity_steps,
        }
    }
}
