use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::core::{
    ChartSeries, InvalidInputError, ProjectionInput, ProjectionResult, ProjectionSummary,
    RawProjectionInput, TableRow, YearlySnapshot, calculate, chart_series, parse_inputs,
    summarize, table_rows,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

/// Longest horizon accepted from the CLI or over HTTP.
pub const MAX_HORIZON_YEARS: f64 = 200.0;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", .0.user_message())]
    InvalidInput(#[from] InvalidInputError),

    #[error("years must be at most {max}, got {years}")]
    HorizonTooLong { years: f64, max: f64 },

    #[error("Malformed request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_)
            | ApiError::HorizonTooLong { .. }
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Process exit code for the command line: 2 for input the user can
    /// correct, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            ApiError::InvalidInput(_) | ApiError::HorizonTooLong { .. } => 2,
            ApiError::BadRequest(_) | ApiError::NotFound | ApiError::Serialization(_) => 1,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "projection request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "projection request rejected");
        }
        error_response(status, &self.to_string())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliOutputFormat {
    Table,
    Csv,
    Json,
}

/// Values are taken as text so the CLI reports the same parse errors as the
/// web form.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "projector",
    about = "Monthly-compounding savings projection (run `projector serve [port]` for the web form)"
)]
pub struct Cli {
    #[arg(long, allow_hyphen_values = true, help = "Monthly income")]
    pub income: String,
    #[arg(long, allow_hyphen_values = true, help = "Monthly expenses")]
    pub expenses: String,
    #[arg(long, allow_hyphen_values = true, help = "Share of monthly savings invested, in percent")]
    pub invest_percent: String,
    #[arg(long, allow_hyphen_values = true, help = "Expected annual return in percent")]
    pub annual_return: String,
    #[arg(long, allow_hyphen_values = true, help = "Investment horizon in years")]
    pub years: String,
    #[arg(long, value_enum, default_value_t = CliOutputFormat::Table)]
    pub format: CliOutputFormat,
}

impl From<&Cli> for RawProjectionInput {
    fn from(cli: &Cli) -> Self {
        RawProjectionInput {
            income: Some(cli.income.clone()),
            expenses: Some(cli.expenses.clone()),
            invest_percent: Some(cli.invest_percent.clone()),
            annual_return: Some(cli.annual_return.clone()),
            years: Some(cli.years.clone()),
        }
    }
}

/// A form field sent either as a JSON number or as the text typed into the
/// form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            FieldValue::Number(v) => v.to_string(),
            FieldValue::Text(s) => s,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    income: Option<FieldValue>,
    expenses: Option<FieldValue>,
    invest_percent: Option<FieldValue>,
    annual_return: Option<FieldValue>,
    years: Option<FieldValue>,
}

impl From<ProjectPayload> for RawProjectionInput {
    fn from(payload: ProjectPayload) -> Self {
        RawProjectionInput {
            income: payload.income.map(FieldValue::into_text),
            expenses: payload.expenses.map(FieldValue::into_text),
            invest_percent: payload.invest_percent.map(FieldValue::into_text),
            annual_return: payload.annual_return.map(FieldValue::into_text),
            years: payload.years.map(FieldValue::into_text),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    input: ProjectionInput,
    summary: ProjectionSummary,
    snapshots: Vec<YearlySnapshot>,
    table: Vec<TableRow>,
    chart: ChartSeries,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn check_horizon(input: &ProjectionInput) -> Result<(), ApiError> {
    if input.years > MAX_HORIZON_YEARS {
        return Err(ApiError::HorizonTooLong {
            years: input.years,
            max: MAX_HORIZON_YEARS,
        });
    }
    Ok(())
}

fn run_projection(
    raw: &RawProjectionInput,
) -> Result<(ProjectionInput, ProjectionResult), ApiError> {
    let input = parse_inputs(raw)?;
    check_horizon(&input)?;
    let result = calculate(&input)?;
    Ok((input, result))
}

fn build_project_response(input: ProjectionInput, result: &ProjectionResult) -> ProjectResponse {
    ProjectResponse {
        summary: summarize(&input, result),
        snapshots: result.snapshots().to_vec(),
        table: table_rows(result),
        chart: chart_series(result),
        input,
    }
}

fn render_table(input: &ProjectionInput, result: &ProjectionResult) -> String {
    let summary = summarize(input, result);
    let mut out = String::new();
    let _ = writeln!(out, "Monthly savings:    {:.2}", summary.monthly_savings);
    let _ = writeln!(out, "Monthly investment: {:.2}", summary.monthly_investment);
    let _ = writeln!(out);
    let _ = writeln!(out, "{:>5} {:>18} {:>18}", "Year", "Total Invested", "Corpus Value");
    let _ = writeln!(out, "{}", "-".repeat(43));
    for row in table_rows(result) {
        let _ = writeln!(out, "{:>5} {:>18} {:>18}", row.year, row.invested, row.corpus);
    }
    if result.is_empty() {
        let _ = writeln!(out, "(horizon shorter than one year)");
    } else {
        let _ = writeln!(out);
        let _ = writeln!(out, "Growth over horizon: {:.2}", summary.growth);
    }
    out
}

fn render_csv(result: &ProjectionResult) -> String {
    let mut out = String::from("year,total_invested,corpus_value\n");
    for row in table_rows(result) {
        let _ = writeln!(out, "{},{},{}", row.year, row.invested, row.corpus);
    }
    out
}

/// Runs one projection for the command line and renders it in the chosen
/// format.
pub fn run_cli(cli: &Cli) -> Result<String, ApiError> {
    let (input, result) = run_projection(&RawProjectionInput::from(cli))?;
    tracing::info!(
        years = input.years,
        snapshots = result.len(),
        "projection complete"
    );
    match cli.format {
        CliOutputFormat::Table => Ok(render_table(&input, &result)),
        CliOutputFormat::Csv => Ok(render_csv(&result)),
        CliOutputFormat::Json => {
            let response = build_project_response(input, &result);
            Ok(serde_json::to_string_pretty(&response)?)
        }
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Projection HTTP API listening on http://{addr}");
    tracing::info!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, router()).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    ApiError::NotFound.into_response()
}

async fn project_get_handler(
    payload: Result<Query<ProjectPayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => project_handler_impl(payload),
        Err(rejection) => ApiError::BadRequest(rejection.body_text()).into_response(),
    }
}

async fn project_post_handler(payload: Result<Json<ProjectPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => project_handler_impl(payload),
        Err(rejection) => ApiError::BadRequest(rejection.body_text()).into_response(),
    }
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    match run_projection(&payload.into()) {
        Ok((input, result)) => {
            tracing::info!(
                years = input.years,
                snapshots = result.len(),
                "projection served"
            );
            json_response(StatusCode::OK, build_project_response(input, &result))
        }
        Err(e) => e.into_response(),
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
