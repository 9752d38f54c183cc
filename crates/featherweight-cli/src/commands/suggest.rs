use featherweight_core::training::{
    estimate_one_rep_max, percentage_of_one_rep_max, suggest_weight,
};

use crate::error::CliError;

/// Reference set and target for a load suggestion
#[derive(Debug, Clone, Copy)]
pub struct SuggestRequest {
    pub weight: f32,
    pub reps: u32,
    pub rpe: Option<f32>,
    pub target_reps: u32,
    pub target_rpe: Option<f32>,
    pub increment: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Suggestion {
    pub estimated_one_rep_max: f32,
    pub weight: f32,
    pub percentage: f32,
}

pub fn run_suggest(request: SuggestRequest) -> Result<(), CliError> {
    let suggestion = suggest(request)?;
    println!("Estimated 1RM: {:.1}", suggestion.estimated_one_rep_max);
    println!(
        "Suggested weight for {} reps: {:.1} ({:.0}% of 1RM)",
        request.target_reps, suggestion.weight, suggestion.percentage
    );
    Ok(())
}

pub fn suggest(request: SuggestRequest) -> Result<Suggestion, CliError> {
    if request.rpe.is_some_and(|rpe| !(1.0..=10.0).contains(&rpe))
        || request.target_rpe.is_some_and(|rpe| !(1.0..=10.0).contains(&rpe))
    {
        return Err(CliError::InvalidInput("RPE must be between 1 and 10".to_string()));
    }

    let estimated_one_rep_max = estimate_one_rep_max(request.weight, request.reps, request.rpe)
        .ok_or_else(|| {
            CliError::InvalidInput(
                "Reference set needs a positive weight and between 1 and 15 reps".to_string(),
            )
        })?;
    let weight = suggest_weight(
        estimated_one_rep_max,
        request.target_reps,
        request.target_rpe,
        request.increment,
    )
    .ok_or_else(|| CliError::InvalidInput("Target reps must be at least 1".to_string()))?;
    let percentage = percentage_of_one_rep_max(weight, estimated_one_rep_max).unwrap_or_default();

    Ok(Suggestion {
        estimated_one_rep_max,
        weight,
        percentage,
    })
}
