use serde::Serialize;

/// Five numeric parameters of one projection request. Percentages are whole
/// numbers (`12.0` means 12%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionInput {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub invest_percent: f64,
    pub annual_return_percent: f64,
    pub years: f64,
}

impl ProjectionInput {
    pub fn monthly_savings(&self) -> f64 {
        self.monthly_income - self.monthly_expenses
    }

    pub fn monthly_investment(&self) -> f64 {
        (self.invest_percent / 100.0) * self.monthly_savings()
    }

    pub fn monthly_rate(&self) -> f64 {
        (self.annual_return_percent / 100.0) / 12.0
    }
}

/// Unparsed form values, in the order the form presents them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProjectionInput {
    pub income: Option<String>,
    pub expenses: Option<String>,
    pub invest_percent: Option<String>,
    pub annual_return: Option<String>,
    pub years: Option<String>,
}

/// Totals at the end of one completed year, rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySnapshot {
    pub year: u32,
    pub total_invested: f64,
    pub corpus_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProjectionResult {
    snapshots: Vec<YearlySnapshot>,
}

impl ProjectionResult {
    pub(crate) fn from_snapshots(snapshots: Vec<YearlySnapshot>) -> Self {
        Self { snapshots }
    }

    pub fn snapshots(&self) -> &[YearlySnapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn last(&self) -> Option<&YearlySnapshot> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, YearlySnapshot> {
        self.snapshots.iter()
    }
}

impl<'a> IntoIterator for &'a ProjectionResult {
    type Item = &'a YearlySnapshot;
    type IntoIter = std::slice::Iter<'a, YearlySnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub year: u32,
    pub invested: String,
    pub corpus: String,
}

/// Parallel vectors, one point per year, for the invested and corpus lines.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub years: Vec<u32>,
    pub invested: Vec<f64>,
    pub corpus: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub monthly_savings: f64,
    pub monthly_investment: f64,
    pub monthly_rate: f64,
    pub completed_years: usize,
    pub final_invested: f64,
    pub final_corpus: f64,
    pub growth: f64,
}
