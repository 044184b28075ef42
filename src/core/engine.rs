use super::error::InvalidInputError;
use super::types::{ProjectionInput, ProjectionResult, YearlySnapshot};

const MONTHS_PER_YEAR: u64 = 12;

/// Rounds to cents the way the form's table prints them: the exact binary
/// value decides, and a magnitude sitting exactly on a half cent rounds away
/// from zero.
fn round_cents(value: f64) -> f64 {
    let magnitude = value.abs();
    // Only multiples of 1/8 land exactly on a half cent.
    let exact_half_cent = (magnitude * 8.0).fract() == 0.0 && (magnitude * 100.0).fract() != 0.0;
    let rounded = if exact_half_cent {
        (magnitude * 100.0).ceil() / 100.0
    } else {
        format!("{magnitude:.2}").parse::<f64>().unwrap_or(magnitude)
    };
    rounded.copysign(value)
}

pub(super) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, InvalidInputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidInputError::NotFinite(field))
    }
}

fn validate(input: &ProjectionInput) -> Result<(), InvalidInputError> {
    ensure_finite("income", input.monthly_income)?;
    ensure_finite("expenses", input.monthly_expenses)?;
    ensure_finite("investPercent", input.invest_percent)?;
    ensure_finite("annualReturn", input.annual_return_percent)?;
    ensure_finite("years", input.years)?;
    Ok(())
}

/// Simulates monthly contributions compounding at a fixed rate and records
/// one snapshot per completed year.
///
/// Each month's contribution is added before that month's growth is
/// applied. A fractional horizon stops at the last whole month it reaches,
/// so the partial final year produces no snapshot.
pub fn calculate(input: &ProjectionInput) -> Result<ProjectionResult, InvalidInputError> {
    validate(input)?;

    let monthly_investment = input.monthly_investment();
    let growth_factor = 1.0 + input.monthly_rate();
    let month_limit = input.years * MONTHS_PER_YEAR as f64;

    let mut snapshots = Vec::new();
    let mut total_invested = 0.0;
    let mut corpus = 0.0;
    let mut month: u64 = 1;

    while month as f64 <= month_limit {
        total_invested += monthly_investment;
        corpus = (corpus + monthly_investment) * growth_factor;
        if month % MONTHS_PER_YEAR == 0 {
            snapshots.push(YearlySnapshot {
                year: (month / MONTHS_PER_YEAR) as u32,
                total_invested: round_cents(total_invested),
                corpus_value: round_cents(corpus),
            });
        }
        month += 1;
    }

    tracing::debug!(
        years = input.years,
        snapshots = snapshots.len(),
        "projection calculated"
    );
    Ok(ProjectionResult::from_snapshots(snapshots))
}
