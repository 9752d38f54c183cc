use crate::models::{new_entity_id, PersonalRecord, RecordType, SetLog};
use crate::util::unix_millis_now;

use super::estimate_one_rep_max;

/// Best values recorded for an exercise before the set being checked
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PreviousBests {
    pub weight: Option<f32>,
    pub estimated_1rm: Option<f32>,
    /// When the current best was set (Unix ms)
    pub date: Option<i64>,
}

/// Personal records earned by a completed set.
///
/// Emits up to two rows: a `WEIGHT` record when the load beats the previous
/// heaviest set, and an `ESTIMATED_1RM` record when the estimate beats the
/// previous best estimate. Both carry the set id as `source_set_id` so that
/// undoing the set removes them together.
#[must_use]
pub fn personal_records_for_set(
    set: &SetLog,
    exercise_id: &str,
    workout_id: Option<&str>,
    previous: PreviousBests,
) -> Vec<PersonalRecord> {
    if !set.is_completed || set.actual_reps == 0 || set.actual_weight <= 0.0 {
        return Vec::new();
    }

    let estimate = estimate_one_rep_max(set.actual_weight, set.actual_reps, set.actual_rpe);
    let record_date = set.completed_at.unwrap_or_else(unix_millis_now);
    let record = |record_type: RecordType, value: f32, previous_value: Option<f32>| {
        PersonalRecord {
            id: new_entity_id(),
            user_id: set.user_id.clone(),
            exercise_id: exercise_id.to_string(),
            record_type,
            weight: set.actual_weight,
            reps: set.actual_reps,
            rpe: set.actual_rpe,
            estimated_1rm: estimate,
            previous_weight: previous.weight,
            previous_date: previous.date,
            improvement_percentage: improvement(value, previous_value),
            workout_id: workout_id.map(str::to_string),
            source_set_id: Some(set.id.clone()),
            record_date,
        }
    };

    let mut records = Vec::new();
    if beats(set.actual_weight, previous.weight) {
        records.push(record(RecordType::Weight, set.actual_weight, previous.weight));
    }
    if let Some(estimate) = estimate {
        if beats(estimate, previous.estimated_1rm) {
            records.push(record(
                RecordType::Estimated1Rm,
                estimate,
                previous.estimated_1rm,
            ));
        }
    }
    records
}

fn beats(value: f32, previous: Option<f32>) -> bool {
    previous.is_none_or(|previous| value > previous)
}

fn improvement(value: f32, previous: Option<f32>) -> f32 {
    match previous {
        Some(previous) if previous > 0.0 => (value - previous) / previous * 100.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn set(weight: f32, reps: u32) -> SetLog {
        SetLog::completed("user-1", "log-1", 0, weight, reps)
    }

    #[test]
    fn first_set_sets_both_records() {
        let set = set(100.0, 5);
        let records =
            personal_records_for_set(&set, "squat", Some("w-1"), PreviousBests::default());

        assert_eq!(
            records.iter().map(|r| r.record_type).collect::<Vec<_>>(),
            vec![RecordType::Weight, RecordType::Estimated1Rm]
        );
        for record in &records {
            assert_eq!(record.source_set_id.as_deref(), Some(set.id.as_str()));
            assert_eq!(record.user_id.as_deref(), Some("user-1"));
            assert_eq!(record.improvement_percentage, 0.0);
        }
    }

    #[test]
    fn only_beaten_metrics_produce_records() {
        let previous = PreviousBests {
            weight: Some(110.0),
            estimated_1rm: Some(115.0),
            date: Some(1_000),
        };

        let records = personal_records_for_set(&set(100.0, 6), "squat", None, previous);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_type, RecordType::Estimated1Rm);
        assert_eq!(records[0].previous_weight, Some(110.0));
        assert!(records[0].improvement_percentage > 0.0);
    }

    #[test]
    fn incomplete_sets_earn_nothing() {
        let mut pending = set(100.0, 5);
        pending.is_completed = false;

        let records = personal_records_for_set(&pending, "squat", None, PreviousBests::default());
        assert!(records.is_empty());
    }
}
