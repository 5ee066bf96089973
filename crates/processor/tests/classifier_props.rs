//! Property tests for classification and aggregation

use pettrack_processor::classifier::{
    activity_level, is_alert, is_anomalous, ALERT_HEART_RATE_BPM, HIGH_ACTIVITY_STEPS,
    MAX_PLAUSIBLE_STEPS, MEDIUM_ACTIVITY_STEPS, PAIN_EMOTION,
};
use pettrack_processor::PetAggregator;
use pettrack_types::{ActivityLevel, TelemetryRecord};
use proptest::prelude::*;

fn band_rank(level: ActivityLevel) -> u8 {
    match level {
        ActivityLevel::Low => 0,
        ActivityLevel::Medium => 1,
        ActivityLevel::High => 2,
    }
}

fn arb_record() -> impl Strategy<Value = (i64, f64, f64)> {
    (
        0i64..8,                  // pet_id, few distinct keys to force collisions
        -200.0f64..400.0,         // heart_rate_bpm, includes invalid negatives
        -1_000.0f64..80_000.0,    // activity_steps, includes anomalous values
    )
}

proptest! {
    #[test]
    fn band_matches_threshold_definition(steps in -100_000.0f64..100_000.0) {
        let expected = if steps >= HIGH_ACTIVITY_STEPS {
            ActivityLevel::High
        } else if steps >= MEDIUM_ACTIVITY_STEPS {
            ActivityLevel::Medium
        } else {
            ActivityLevel::Low
        };
        prop_assert_eq!(activity_level(steps), expected);
    }

    #[test]
    fn band_is_monotonic_in_steps(a in -100_000.0f64..100_000.0, b in -100_000.0f64..100_000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(band_rank(activity_level(lo)) <= band_rank(activity_level(hi)));
    }

    #[test]
    fn alert_matches_conjunction(hr in -500.0f64..500.0, emotion in "[a-z]{0,8}") {
        let expected = hr > ALERT_HEART_RATE_BPM && emotion == PAIN_EMOTION;
        prop_assert_eq!(is_alert(hr, &emotion), expected);
    }

    #[test]
    fn anomaly_matches_disjunction(hr in -500.0f64..500.0, steps in -1_000.0f64..100_000.0) {
        let expected = hr < 0.0 || steps > MAX_PLAUSIBLE_STEPS;
        prop_assert_eq!(is_anomalous(hr, steps), expected);
    }

    #[test]
    fn anomaly_is_independent_of_emotion(hr in -500.0f64..500.0, steps in -1_000.0f64..100_000.0) {
        // the emotion tag never influences the anomaly flag
        let painful = TelemetryRecord::new(1, hr, steps, PAIN_EMOTION);
        let calm = TelemetryRecord::new(1, hr, steps, "calma");
        prop_assert_eq!(
            pettrack_processor::classify(&painful).is_anomalous,
            pettrack_processor::classify(&calm).is_anomalous
        );
    }

    #[test]
    fn sharded_aggregation_matches_single_pass(
        rows in proptest::collection::vec(arb_record(), 1..60),
        split in 0usize..60,
    ) {
        let records: Vec<TelemetryRecord> = rows
            .iter()
            .map(|(id, hr, steps)| TelemetryRecord::new(*id, *hr, *steps, "calma"))
            .collect();
        let split = split.min(records.len());

        let mut single = PetAggregator::new();
        single.add_batch(&records);

        let mut shard_a = PetAggregator::new();
        shard_a.add_batch(&records[..split]);
        let mut shard_b = PetAggregator::new();
        shard_b.add_batch(&records[split..]);
        shard_a.merge(shard_b);

        let merged = shard_a.finalize();
        let direct = single.finalize();
        prop_assert_eq!(merged.len(), direct.len());
        for (m, d) in merged.iter().zip(direct.iter()) {
            prop_assert_eq!(m.pet_id, d.pet_id);
            // float sums may differ in the last ulp depending on fold order
            prop_assert!((m.avg_heart_rate - d.avg_heart_rate).abs() < 1e-9);
            prop_assert!((m.avg_activity_steps - d.avg_activity_steps).abs() < 1e-6);
        }
    }
}
