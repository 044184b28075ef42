mod engine;
mod error;
mod parse;
mod report;
mod types;

pub use engine::calculate;
pub use error::InvalidInputError;
pub use parse::parse_inputs;
pub use report::{chart_series, summarize, table_rows};
pub use types::{
    ChartSeries, ProjectionInput, ProjectionResult, ProjectionSummary, RawProjectionInput,
    TableRow, YearlySnapshot,
};
