use super::engine::ensure_finite;
use super::error::InvalidInputError;
use super::types::{ProjectionInput, RawProjectionInput};

fn parse_field(field: &'static str, raw: Option<&str>) -> Result<f64, InvalidInputError> {
    let text = raw.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(InvalidInputError::Missing(field));
    }
    let value = text
        .parse::<f64>()
        .map_err(|_| InvalidInputError::NotANumber {
            field,
            value: text.to_string(),
        })?;
    ensure_finite(field, value)
}

/// Parses the five form fields in the order they are presented; the first
/// bad field is reported.
pub fn parse_inputs(raw: &RawProjectionInput) -> Result<ProjectionInput, InvalidInputError> {
    Ok(ProjectionInput {
        monthly_income: parse_field("income", raw.income.as_deref())?,
        monthly_expenses: parse_field("expenses", raw.expenses.as_deref())?,
        invest_percent: parse_field("investPercent", raw.invest_percent.as_deref())?,
        annual_return_percent: parse_field("annualReturn", raw.annual_return.as_deref())?,
        years: parse_field("years", raw.years.as_deref())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn raw(fields: [&str; 5]) -> RawProjectionInput {
        let [income, expenses, invest_percent, annual_return, years] =
            fields.map(|f| Some(f.to_string()));
        RawProjectionInput {
            income,
            expenses,
            invest_percent,
            annual_return,
            years,
        }
    }

    #[test]
    fn parse_inputs_accepts_trimmed_numbers() {
        let input = parse_inputs(&raw([" 50000 ", "30000", "50", "12.5", "3"]))
            .expect("valid fields");
        assert_approx(input.monthly_income, 50_000.0);
        assert_approx(input.annual_return_percent, 12.5);
        assert_approx(input.years, 3.0);
    }

    #[test]
    fn parse_inputs_reports_first_bad_field_in_form_order() {
        let err = parse_inputs(&raw(["abc", "30000", "x", "12", "1"])).expect_err("bad income");
        assert_eq!(
            err,
            InvalidInputError::NotANumber {
                field: "income",
                value: "abc".to_string()
            }
        );

        let mut fields = raw(["50000", "30000", "50", "12", "1"]);
        fields.years = None;
        assert_eq!(
            parse_inputs(&fields),
            Err(InvalidInputError::Missing("years"))
        );

        fields.years = Some("   ".to_string());
        assert_eq!(
            parse_inputs(&fields),
            Err(InvalidInputError::Missing("years"))
        );
    }

    #[test]
    fn parse_inputs_rejects_infinity_and_nan_text() {
        let err = parse_inputs(&raw(["50000", "inf", "50", "12", "1"])).expect_err("inf");
        assert_eq!(err, InvalidInputError::NotFinite("expenses"));

        let err = parse_inputs(&raw(["50000", "1", "NaN", "12", "1"])).expect_err("nan");
        assert_eq!(err, InvalidInputError::NotFinite("investPercent"));
    }
}
