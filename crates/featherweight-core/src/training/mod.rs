//! Training heuristics: one-rep-max estimation, load suggestions and
//! personal-record detection for logged sets.

mod records;

pub use records::{personal_records_for_set, PreviousBests};

/// Smallest load step assumed when rounding suggestions (kg)
pub const DEFAULT_PLATE_INCREMENT: f32 = 2.5;

/// Highest rep count the Epley estimate is trusted for
const MAX_ESTIMATE_REPS: f32 = 15.0;

/// Estimate a one-rep max from a set using the Epley formula.
///
/// A single rep with no RPE is the weight itself. With an RPE the reps left
/// in reserve (`10 - rpe`) are added before estimating. Returns `None` for
/// empty sets and for rep counts too high to extrapolate from.
#[must_use]
pub fn estimate_one_rep_max(weight: f32, reps: u32, rpe: Option<f32>) -> Option<f32> {
    if weight <= 0.0 || reps == 0 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let mut effective_reps = reps as f32;
    match rpe {
        Some(rpe) => effective_reps += (10.0 - rpe.clamp(1.0, 10.0)).max(0.0),
        None if reps == 1 => return Some(weight),
        None => {}
    }

    if effective_reps > MAX_ESTIMATE_REPS {
        return None;
    }
    if effective_reps <= 1.0 {
        return Some(weight);
    }
    Some(weight * (1.0 + effective_reps / 30.0))
}

/// Suggest a working weight for `target_reps` at `target_rpe` from a 1RM.
///
/// Inverse Epley, rounded down to the nearest multiple of `increment`.
#[must_use]
pub fn suggest_weight(
    one_rm: f32,
    target_reps: u32,
    target_rpe: Option<f32>,
    increment: f32,
) -> Option<f32> {
    if one_rm <= 0.0 || target_reps == 0 {
        return None;
    }

    let reserve = target_rpe.map_or(0.0, |rpe| (10.0 - rpe.clamp(1.0, 10.0)).max(0.0));
    #[allow(clippy::cast_precision_loss)]
    let effective_reps = target_reps as f32 + reserve;
    let raw = if effective_reps <= 1.0 {
        one_rm
    } else {
        one_rm / (1.0 + effective_reps / 30.0)
    };

    Some(round_down_to(raw, increment))
}

/// Share of a one-rep max, in percent
#[must_use]
pub fn percentage_of_one_rep_max(weight: f32, one_rm: f32) -> Option<f32> {
    (one_rm > 0.0).then(|| weight / one_rm * 100.0)
}

fn round_down_to(value: f32, increment: f32) -> f32 {
    if increment <= 0.0 {
        return value;
    }
    (value / increment).floor() * increment
}
