//! Wage Source: optional external supplier of a mean annual wage.
//!
//! The only backend is the BLS Occupational Employment Statistics time-series API.
//! Callers treat every error here as "source unavailable" and fall back to the
//! table model, so nothing in this module is ever surfaced to an end user.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::salary::lookup::{normalize_query, resolve, MatchStrategy, TITLE_STRATEGIES};

/// Provenance label for profiles backed by the external source.
pub const BLS_SOURCE: &str = "Bureau of Labor Statistics - Occupational Employment Statistics";

/// Area code used when a location matches neither a metro area nor a state.
pub const NATIONAL_AREA_CODE: &str = "0000000";

/// Standard Occupational Classification codes by job title.
const OCCUPATION_CODES: &[(&str, &str)] = &[
    ("software engineer", "15-1252"),
    ("software developer", "15-1252"),
    ("web developer", "15-1254"),
    ("data scientist", "15-2051"),
    ("data analyst", "15-2041"),
    ("teacher", "25-2031"),
    ("elementary teacher", "25-2021"),
    ("high school teacher", "25-2031"),
    ("nurse", "29-1141"),
    ("registered nurse", "29-1141"),
    ("accountant", "13-2011"),
    ("marketing manager", "11-2021"),
    ("project manager", "11-9199"),
    ("sales representative", "41-4012"),
    ("financial analyst", "13-2051"),
    ("human resources", "13-1071"),
    ("graphic designer", "27-1024"),
    ("mechanical engineer", "17-2141"),
    ("electrical engineer", "17-2071"),
    ("civil engineer", "17-2051"),
];

/// Metropolitan statistical area codes. Checked before states.
const METRO_AREA_CODES: &[(&str, &str)] = &[
    ("new york", "35620"),
    ("los angeles", "31080"),
    ("chicago", "16980"),
    ("dallas", "19100"),
    ("houston", "26420"),
    ("washington dc", "47900"),
    ("miami", "33100"),
    ("philadelphia", "37980"),
    ("atlanta", "12060"),
    ("boston", "14460"),
    ("san francisco", "41860"),
    ("phoenix", "38060"),
    ("riverside", "40140"),
    ("detroit", "19820"),
    ("seattle", "42660"),
];

/// FIPS state codes.
const STATE_CODES: &[(&str, &str)] = &[
    ("alabama", "01"),
    ("alaska", "02"),
    ("arizona", "04"),
    ("arkansas", "05"),
    ("california", "06"),
    ("colorado", "08"),
    ("connecticut", "09"),
    ("delaware", "10"),
    ("florida", "12"),
    ("georgia", "13"),
];

#[derive(Debug, Error)]
pub enum WageSourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Occupation code not found for: {0}")]
    OccupationNotFound(String),

    #[error("No data found in wage series {0}")]
    EmptySeries(String),

    #[error("Invalid wage value: {0}")]
    InvalidWage(String),
}

/// A single mean-wage observation from an external source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageSample {
    pub mean_annual_wage: f64,
    pub year: String,
    pub period: String,
    pub series_id: String,
    pub occupation_code: String,
    pub area_code: String,
}

/// A supplier of location-specific mean annual wages.
///
/// Carried in `SalaryEstimator` as `Arc<dyn WageSource>`.
#[async_trait]
pub trait WageSource: Send + Sync {
    async fn fetch_mean_wage(
        &self,
        job_title: &str,
        location: &str,
    ) -> Result<WageSample, WageSourceError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Code resolution
// ────────────────────────────────────────────────────────────────────────────

/// Resolves a job title into an SOC code with the same rules as the wage table.
pub fn find_occupation_code(job_title: &str) -> Option<&'static str> {
    resolve(OCCUPATION_CODES, &normalize_query(job_title), TITLE_STRATEGIES).map(|(_, code)| code)
}

/// Resolves a location into a BLS area code: metro, then state, then national.
pub fn find_area_code(location: &str) -> String {
    let query = normalize_query(location);
    let contains = &[MatchStrategy::QueryContainsKey];

    if let Some((_, code)) = resolve(METRO_AREA_CODES, &query, contains) {
        return code.to_string();
    }
    if let Some((_, code)) = resolve(STATE_CODES, &query, contains) {
        return format!("{code}0000");
    }
    NATIONAL_AREA_CODE.to_string()
}

/// Series id for the mean annual wage (data type 04) of an occupation in an area.
pub fn series_id(area_code: &str, occupation_code: &str) -> String {
    format!("OEUS{area_code}000000{occupation_code}04")
}

// ────────────────────────────────────────────────────────────────────────────
// BLS client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct BlsRequest<'a> {
    seriesid: Vec<&'a str>,
    startyear: &'a str,
    endyear: &'a str,
    registrationkey: &'a str,
}

#[derive(Debug, Deserialize)]
struct BlsResponse {
    #[serde(rename = "Results")]
    results: Option<BlsResults>,
}

#[derive(Debug, Deserialize)]
struct BlsResults {
    #[serde(default)]
    series: Vec<BlsSeries>,
}

#[derive(Debug, Deserialize)]
struct BlsSeries {
    #[serde(default)]
    data: Vec<BlsDataPoint>,
}

#[derive(Debug, Deserialize)]
struct BlsDataPoint {
    year: String,
    period: String,
    value: String,
}

/// Pulls the most recent data point of the first series out of a BLS response body.
fn parse_latest_wage(body: &str, series_id: &str) -> Result<(f64, String, String), WageSourceError> {
    let response: BlsResponse = serde_json::from_str(body)?;

    let point = response
        .results
        .and_then(|r| r.series.into_iter().next())
        .and_then(|s| s.data.into_iter().next())
        .ok_or_else(|| WageSourceError::EmptySeries(series_id.to_string()))?;

    let wage: f64 = point
        .value
        .trim()
        .parse()
        .map_err(|_| WageSourceError::InvalidWage(point.value.clone()))?;

    if !wage.is_finite() || wage < 0.0 {
        return Err(WageSourceError::InvalidWage(point.value));
    }

    Ok((wage, point.year, point.period))
}

/// Client for the BLS public time-series API.
#[derive(Clone)]
pub struct BlsWageSource {
    client: Client,
    base_url: String,
    api_key: String,
    start_year: String,
    end_year: String,
}

impl BlsWageSource {
    pub fn new(
        base_url: String,
        api_key: String,
        start_year: String,
        end_year: String,
        timeout: Duration,
    ) -> Result<Self, WageSourceError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
            api_key,
            start_year,
            end_year,
        })
    }

    /// Builds a client from config, or `None` when running on table data only.
    pub fn from_config(config: &Config) -> Result<Option<Self>, WageSourceError> {
        if config.use_mock_data() {
            return Ok(None);
        }
        let Some(api_key) = config.bls_api_key.clone() else {
            return Ok(None);
        };

        Self::new(
            config.bls_base_url.clone(),
            api_key,
            config.bls_start_year.clone(),
            config.bls_end_year.clone(),
            Duration::from_secs(config.bls_timeout_secs),
        )
        .map(Some)
    }
}

#[async_trait]
impl WageSource for BlsWageSource {
    async fn fetch_mean_wage(
        &self,
        job_title: &str,
        location: &str,
    ) -> Result<WageSample, WageSourceError> {
        let occupation_code = find_occupation_code(job_title)
            .ok_or_else(|| WageSourceError::OccupationNotFound(job_title.to_string()))?;
        let area_code = find_area_code(location);
        let series_id = series_id(&area_code, occupation_code);

        let request_body = BlsRequest {
            seriesid: vec![series_id.as_str()],
            startyear: &self.start_year,
            endyear: &self.end_year,
            registrationkey: &self.api_key,
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(WageSourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let (mean_annual_wage, year, period) = parse_latest_wage(&body, &series_id)?;
        debug!("BLS series {series_id}: mean wage {mean_annual_wage} ({year} {period})");

        Ok(WageSample {
            mean_annual_wage,
            year,
            period,
            series_id,
            occupation_code: occupation_code.to_string(),
            area_code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::Value;
    use tokio::net::TcpListener;

    type SeenBody = Arc<Mutex<Option<Value>>>;

    /// Serves one canned reply on a local port and records the last JSON body posted.
    async fn spawn_bls_stub(status: StatusCode, reply: &'static str) -> (String, SeenBody) {
        let seen: SeenBody = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        let app = Router::new().route(
            "/timeseries/data/",
            post(move |Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(body);
                    (status, reply)
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/timeseries/data/"), seen)
    }

    fn client(base_url: String) -> BlsWageSource {
        BlsWageSource::new(
            base_url,
            "test-key".to_string(),
            "2022".to_string(),
            "2023".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_occupation_code_exact() {
        assert_eq!(find_occupation_code("Registered Nurse"), Some("29-1141"));
        assert_eq!(find_occupation_code("civil engineer"), Some("17-2051"));
    }

    #[test]
    fn test_occupation_code_fuzzy() {
        assert_eq!(find_occupation_code("Lead Graphic Designer"), Some("27-1024"));
        assert_eq!(find_occupation_code("software architect"), Some("15-1252"));
    }

    #[test]
    fn test_occupation_code_missing() {
        assert_eq!(find_occupation_code("zookeeper"), None);
    }

    #[test]
    fn test_area_code_prefers_metro() {
        assert_eq!(find_area_code("Seattle"), "42660");
        assert_eq!(find_area_code("Washington DC"), "47900");
    }

    #[test]
    fn test_area_code_state() {
        assert_eq!(find_area_code("Tucson, Arizona"), "040000");
    }

    #[test]
    fn test_area_code_national_fallback() {
        assert_eq!(find_area_code("Nowhereville"), NATIONAL_AREA_CODE);
    }

    #[test]
    fn test_series_id_format() {
        assert_eq!(series_id("35620", "15-1252"), "OEUS3562000000015-125204");
    }

    #[test]
    fn test_parse_latest_wage() {
        let body = r#"{
            "status": "REQUEST_SUCCEEDED",
            "Results": {
                "series": [{
                    "seriesID": "OEUS",
                    "data": [
                        {"year": "2023", "period": "A01", "value": "132270"},
                        {"year": "2022", "period": "A01", "value": "127260"}
                    ]
                }]
            }
        }"#;
        let (wage, year, period) = parse_latest_wage(body, "OEUS").unwrap();
        assert_eq!(wage, 132_270.0);
        assert_eq!(year, "2023");
        assert_eq!(period, "A01");
    }

    #[test]
    fn test_parse_empty_series() {
        let body = r#"{"status": "REQUEST_NOT_PROCESSED", "Results": {"series": []}}"#;
        assert!(matches!(
            parse_latest_wage(body, "OEUS"),
            Err(WageSourceError::EmptySeries(_))
        ));

        let body = r#"{"status": "REQUEST_NOT_PROCESSED", "message": ["quota"]}"#;
        assert!(matches!(
            parse_latest_wage(body, "OEUS"),
            Err(WageSourceError::EmptySeries(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        let body = r#"{"Results": {"series": [{"data": [{"year": "2023", "period": "A01", "value": "-"}]}]}}"#;
        assert!(matches!(
            parse_latest_wage(body, "OEUS"),
            Err(WageSourceError::InvalidWage(_))
        ));

        let body = r#"{"Results": {"series": [{"data": [{"year": "2023", "period": "A01", "value": "-5"}]}]}}"#;
        assert!(matches!(
            parse_latest_wage(body, "OEUS"),
            Err(WageSourceError::InvalidWage(_))
        ));
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(matches!(
            parse_latest_wage("<html>", "OEUS"),
            Err(WageSourceError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_sends_series_request() {
        let reply = r#"{"status": "REQUEST_SUCCEEDED", "Results": {"series": [{"data": [{"year": "2023", "period": "A01", "value": "132270"}]}]}}"#;
        let (url, seen) = spawn_bls_stub(StatusCode::OK, reply).await;

        let sample = client(url)
            .fetch_mean_wage("Software Engineer", "New York")
            .await
            .unwrap();

        assert_eq!(sample.mean_annual_wage, 132_270.0);
        assert_eq!(sample.series_id, "OEUS3562000000015-125204");
        assert_eq!(sample.area_code, "35620");
        assert_eq!(sample.occupation_code, "15-1252");

        let body = seen.lock().unwrap().clone().unwrap();
        assert_eq!(body["seriesid"], serde_json::json!(["OEUS3562000000015-125204"]));
        assert_eq!(body["startyear"], "2022");
        assert_eq!(body["endyear"], "2023");
        assert_eq!(body["registrationkey"], "test-key");
    }

    #[tokio::test]
    async fn test_fetch_maps_error_status() {
        let (url, seen) = spawn_bls_stub(StatusCode::SERVICE_UNAVAILABLE, "maintenance").await;

        let err = client(url)
            .fetch_mean_wage("Registered Nurse", "Boston")
            .await
            .unwrap_err();

        match err {
            WageSourceError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected API error, got {other:?}"),
        }
        assert!(seen.lock().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_fetch_unknown_occupation_skips_request() {
        let (url, seen) = spawn_bls_stub(StatusCode::OK, "{}").await;

        let err = client(url).fetch_mean_wage("zookeeper", "Boston").await.unwrap_err();

        assert!(matches!(err, WageSourceError::OccupationNotFound(_)));
        assert!(seen.lock().unwrap().is_none());
    }
}
