use super::types::{
    ChartSeries, ProjectionInput, ProjectionResult, ProjectionSummary, TableRow,
};

pub fn table_rows(result: &ProjectionResult) -> Vec<TableRow> {
    result
        .iter()
        .map(|snapshot| TableRow {
            year: snapshot.year,
            invested: format!("{:.2}", snapshot.total_invested),
            corpus: format!("{:.2}", snapshot.corpus_value),
        })
        .collect()
}

pub fn chart_series(result: &ProjectionResult) -> ChartSeries {
    let mut series = ChartSeries {
        years: Vec::with_capacity(result.len()),
        invested: Vec::with_capacity(result.len()),
        corpus: Vec::with_capacity(result.len()),
    };
    for snapshot in result {
        series.years.push(snapshot.year);
        series.invested.push(snapshot.total_invested);
        series.corpus.push(snapshot.corpus_value);
    }
    series
}

/// Monthly figures behind the projection plus the final-year totals.
/// An empty projection reports zero totals.
pub fn summarize(input: &ProjectionInput, result: &ProjectionResult) -> ProjectionSummary {
    let (final_invested, final_corpus) = result
        .last()
        .map(|s| (s.total_invested, s.corpus_value))
        .unwrap_or((0.0, 0.0));
    ProjectionSummary {
        monthly_savings: input.monthly_savings(),
        monthly_investment: input.monthly_investment(),
        monthly_rate: input.monthly_rate(),
        completed_years: result.len(),
        final_invested,
        final_corpus,
        growth: final_corpus - final_invested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculate;

    fn three_years() -> (ProjectionInput, ProjectionResult) {
        let input = ProjectionInput {
            monthly_income: 1_000.0,
            monthly_expenses: 400.0,
            invest_percent: 50.0,
            annual_return_percent: 0.0,
            years: 3.0,
        };
        let result = calculate(&input).expect("valid input");
        (input, result)
    }

    #[test]
    fn table_rows_use_two_decimals() {
        let (_, result) = three_years();
        let rows = table_rows(&result);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].year, 1);
        assert_eq!(rows[0].invested, "3600.00");
        assert_eq!(rows[2].corpus, "10800.00");
    }

    #[test]
    fn chart_series_are_parallel() {
        let (_, result) = three_years();
        let series = chart_series(&result);
        assert_eq!(series.years, vec![1, 2, 3]);
        assert_eq!(series.invested, vec![3_600.0, 7_200.0, 10_800.0]);
        assert_eq!(series.corpus, series.invested);
    }

    #[test]
    fn summary_reports_final_year_and_growth() {
        let (input, result) = three_years();
        let summary = summarize(&input, &result);
        assert_eq!(summary.completed_years, 3);
        assert_eq!(summary.monthly_savings, 600.0);
        assert_eq!(summary.monthly_investment, 300.0);
        assert_eq!(summary.final_corpus, 10_800.0);
        assert_eq!(summary.growth, 0.0);
    }

    #[test]
    fn summary_of_empty_projection_is_zero() {
        let (mut input, _) = three_years();
        input.years = 0.5;
        let result = calculate(&input).expect("valid input");
        let summary = summarize(&input, &result);
        assert_eq!(summary.completed_years, 0);
        assert_eq!(summary.final_invested, 0.0);
        assert_eq!(summary.growth, 0.0);
        assert!(table_rows(&result).is_empty());
    }
}
