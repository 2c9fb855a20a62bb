//! Salary Report: wraps the pure estimator with the optional external wage
//! source. Any source failure silently degrades to the table model.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::salary::estimator::{get_salary_profile, WageProfile};
use crate::salary::experience::experience_multiplier;
use crate::salary::wage_source::{WageSample, WageSource, BLS_SOURCE};

/// A wage profile plus the provenance needed to present it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryReport {
    #[serde(flatten)]
    pub profile: WageProfile,
    pub job_title: String,
    pub location: String,
    pub experience_level: String,
    pub experience_multiplier: f64,
    pub year: Option<String>,
    pub series_id: Option<String>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct SalaryEstimator {
    source: Option<Arc<dyn WageSource>>,
}

impl SalaryEstimator {
    pub fn new(source: Option<Arc<dyn WageSource>>) -> Self {
        Self { source }
    }

    /// Estimator backed by the fixed tables only.
    pub fn synthetic() -> Self {
        Self::default()
    }

    pub fn has_external_source(&self) -> bool {
        self.source.is_some()
    }

    /// Builds a report for the query. Never fails.
    pub async fn estimate(
        &self,
        job_title: &str,
        location: &str,
        experience_level: &str,
    ) -> SalaryReport {
        let multiplier = experience_multiplier(experience_level);

        let sample = match &self.source {
            Some(source) => match source.fetch_mean_wage(job_title, location).await {
                Ok(sample) => Some(sample),
                Err(e) => {
                    warn!("Wage source unavailable for {job_title:?} in {location:?}: {e}");
                    None
                }
            },
            None => None,
        };

        let (profile, year, series_id) = match sample {
            Some(WageSample {
                mean_annual_wage,
                year,
                series_id,
                ..
            }) => (
                // Source data is already location-specific; only seniority applies.
                WageProfile::from_adjusted_mean(mean_annual_wage * multiplier, BLS_SOURCE, false),
                Some(year),
                Some(series_id),
            ),
            None => (
                get_salary_profile(job_title, location, experience_level),
                None,
                None,
            ),
        };

        SalaryReport {
            profile,
            job_title: job_title.to_string(),
            location: location.to_string(),
            experience_level: experience_level.to_string(),
            experience_multiplier: multiplier,
            year,
            series_id,
            last_updated: Utc::now(),
        }
    }
}
