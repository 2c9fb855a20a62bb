//! Axum route handlers for the Salary API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::salary::advice::{build_verdict, Verdict};
use crate::salary::estimator::{compare_salary, Comparison, PercentileBucket};
use crate::salary::report::SalaryReport;
use crate::salary::validation::{suggest_job_titles, validate_check_request, SalaryCheckRequest};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub job_title: String,
    pub location: String,
    #[serde(default = "default_experience_level")]
    pub experience_level: String,
}

fn default_experience_level() -> String {
    "mid".to_string()
}

#[derive(Debug, Serialize)]
pub struct SalaryCheckResponse {
    pub is_underpaid: bool,
    pub percentile: PercentileBucket,
    pub current_salary: u64,
    pub job_title: String,
    pub location: String,
    pub experience_level: String,
    pub salary_data: SalaryReport,
    pub comparison: Comparison,
    pub verdict: Verdict,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<&'static str>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/salary/profile
///
/// Returns the wage distribution for a title, location and experience level.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<ProfileQuery>,
) -> Result<Json<SalaryReport>, AppError> {
    if params.job_title.trim().is_empty() {
        return Err(AppError::Validation("job_title cannot be empty".to_string()));
    }

    let report = state
        .estimator
        .estimate(&params.job_title, &params.location, &params.experience_level)
        .await;

    Ok(Json(report))
}

/// POST /api/v1/salary/check
///
/// Validates the form, builds the distribution and places the salary against it.
pub async fn handle_check_salary(
    State(state): State<AppState>,
    Json(request): Json<SalaryCheckRequest>,
) -> Result<Json<SalaryCheckResponse>, AppError> {
    let checked = validate_check_request(&request)?;

    let report = state
        .estimator
        .estimate(&checked.job_title, &checked.location, &checked.experience_level)
        .await;

    let result = compare_salary(checked.current_salary as f64, &report.profile);
    let verdict = build_verdict(&result, &checked.experience_level);

    info!(
        "Salary check: bucket={} underpaid={} estimate={}",
        result.percentile_bucket, result.is_underpaid, report.profile.is_estimate
    );

    Ok(Json(SalaryCheckResponse {
        is_underpaid: result.is_underpaid,
        percentile: result.percentile_bucket,
        current_salary: checked.current_salary,
        job_title: checked.job_title,
        location: checked.location,
        experience_level: checked.experience_level,
        salary_data: report,
        comparison: result.deltas,
        verdict,
    }))
}

/// GET /api/v1/salary/suggestions?q=
pub async fn handle_suggestions(Query(params): Query<SuggestionQuery>) -> Json<SuggestionResponse> {
    Json(SuggestionResponse {
        suggestions: suggest_job_titles(&params.q),
    })
}
