//! Estimator: turns a base wage and its multipliers into a synthetic wage
//! distribution, then places a candidate salary against it.
//!
//! Everything here is pure and synchronous. Percentile bands are fixed ratios of
//! the adjusted mean, each rounded on its own:
//!
//! | band | ratio |
//! |------|-------|
//! | p10  | 0.65  |
//! | p25  | 0.80  |
//! | p50  | 0.95  |
//! | p75  | 1.15  |
//! | p90  | 1.40  |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::salary::experience::experience_multiplier;
use crate::salary::lookup::{resolve_base_wage, resolve_location_multiplier};

/// Provenance label for profiles built from the fixed tables.
pub const SYNTHETIC_SOURCE: &str =
    "Based on Bureau of Labor Statistics salary patterns and government data";

const P10_RATIO: f64 = 0.65;
const P25_RATIO: f64 = 0.80;
const P50_RATIO: f64 = 0.95;
const P75_RATIO: f64 = 1.15;
const P90_RATIO: f64 = 1.40;

// ────────────────────────────────────────────────────────────────────────────
// Data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percentiles {
    pub p10: u64,
    pub p25: u64,
    pub p50: u64,
    pub p75: u64,
    pub p90: u64,
}

/// Synthetic salary distribution for one query. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageProfile {
    pub mean_annual_wage: u64,
    pub percentiles: Percentiles,
    pub source: String,
    pub is_estimate: bool,
}

impl WageProfile {
    /// Rounds `adjusted_mean` and derives the percentile bands from it.
    /// Negative or non-finite means collapse to 0; callers should reject them first.
    pub fn from_adjusted_mean(adjusted_mean: f64, source: impl Into<String>, is_estimate: bool) -> Self {
        let mean = round_wage(adjusted_mean);
        let band = |ratio: f64| round_wage(mean as f64 * ratio);

        Self {
            mean_annual_wage: mean,
            percentiles: Percentiles {
                p10: band(P10_RATIO),
                p25: band(P25_RATIO),
                p50: band(P50_RATIO),
                p75: band(P75_RATIO),
                p90: band(P90_RATIO),
            },
            source: source.into(),
            is_estimate,
        }
    }
}

fn round_wage(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// Coarse percentile class of a salary against a [`WageProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PercentileBucket {
    P10,
    P25,
    P50,
    P75,
    P90,
    P95,
}

impl PercentileBucket {
    pub fn value(self) -> u8 {
        match self {
            PercentileBucket::P10 => 10,
            PercentileBucket::P25 => 25,
            PercentileBucket::P50 => 50,
            PercentileBucket::P75 => 75,
            PercentileBucket::P90 => 90,
            PercentileBucket::P95 => 95,
        }
    }
}

impl From<PercentileBucket> for u8 {
    fn from(bucket: PercentileBucket) -> Self {
        bucket.value()
    }
}

impl TryFrom<u8> for PercentileBucket {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(PercentileBucket::P10),
            25 => Ok(PercentileBucket::P25),
            50 => Ok(PercentileBucket::P50),
            75 => Ok(PercentileBucket::P75),
            90 => Ok(PercentileBucket::P90),
            95 => Ok(PercentileBucket::P95),
            other => Err(format!("{other} is not a percentile bucket")),
        }
    }
}

impl fmt::Display for PercentileBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}th", self.value())
    }
}

/// Signed distance between a salary and one reference band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    pub amount: f64,
    pub is_higher: bool,
    /// `amount` as a whole percentage of the reference band; 0 when the band is 0.
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub vs_25th: Delta,
    pub vs_median: Delta,
    pub vs_75th: Delta,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub percentile_bucket: PercentileBucket,
    pub is_underpaid: bool,
    pub deltas: Comparison,
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// Table-derived profile: `round(base_wage × location × experience)`.
pub fn build_profile(job_title: &str, location: &str, experience_level: &str) -> WageProfile {
    let adjusted_mean = resolve_base_wage(job_title)
        * resolve_location_multiplier(location)
        * experience_multiplier(experience_level);
    WageProfile::from_adjusted_mean(adjusted_mean, SYNTHETIC_SOURCE, true)
}

/// Entry point for collaborators; no hidden state, identical inputs give identical output.
pub fn get_salary_profile(job_title: &str, location: &str, experience_level: &str) -> WageProfile {
    build_profile(job_title, location, experience_level)
}

/// Step function over the bands: each bucket includes its upper bound,
/// anything above p90 lands in 95.
pub fn bucket_percentile(salary: f64, profile: &WageProfile) -> PercentileBucket {
    let p = &profile.percentiles;
    let thresholds = [
        (p.p10, PercentileBucket::P10),
        (p.p25, PercentileBucket::P25),
        (p.p50, PercentileBucket::P50),
        (p.p75, PercentileBucket::P75),
        (p.p90, PercentileBucket::P90),
    ];

    thresholds
        .iter()
        .find(|(band, _)| salary <= *band as f64)
        .map(|(_, bucket)| *bucket)
        .unwrap_or(PercentileBucket::P95)
}

fn delta_against(salary: f64, reference: u64) -> Delta {
    let difference = salary - reference as f64;
    let amount = difference.abs();
    let percentage = if reference == 0 {
        0
    } else {
        (amount / reference as f64 * 100.0).round() as u32
    };

    Delta {
        amount,
        is_higher: difference > 0.0,
        percentage,
    }
}

/// Signed deltas against p25, p50 and p75.
pub fn compare(salary: f64, percentiles: &Percentiles) -> Comparison {
    Comparison {
        vs_25th: delta_against(salary, percentiles.p25),
        vs_median: delta_against(salary, percentiles.p50),
        vs_75th: delta_against(salary, percentiles.p75),
    }
}

/// Buckets and compares a candidate salary. The salary must already be a
/// positive, finite number.
pub fn compare_salary(candidate_salary: f64, profile: &WageProfile) -> ComparisonResult {
    let percentile_bucket = bucket_percentile(candidate_salary, profile);
    ComparisonResult {
        percentile_bucket,
        is_underpaid: percentile_bucket < PercentileBucket::P25,
        deltas: compare(candidate_salary, &profile.percentiles),
    }
}
