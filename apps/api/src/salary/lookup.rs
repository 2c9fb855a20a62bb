//! Lookup Tables: resolves free-text job titles and locations into a base wage
//! and a regional multiplier.
//!
//! Every resolver is total: input that matches nothing degrades to a documented
//! default instead of failing. Matching runs an ordered list of strategies
//! (exact, then substring) and the first strategy that hits wins.
//!
//! Known fuzziness: the job-title substring rule also accepts a table key that
//! contains the query's *first word*, so a one-word title can land on an unrelated
//! entry sharing that word ("software architect" resolves to "software engineer").

use tracing::debug;

/// Base wage returned when a job title matches no table entry.
pub const DEFAULT_BASE_WAGE: f64 = 70_000.0;

/// Location multiplier returned when a location matches no table entry.
pub const DEFAULT_LOCATION_MULTIPLIER: f64 = 1.0;

/// Mean annual wage by job title. Order matters: the substring strategy returns
/// the first entry that matches.
pub const BASE_WAGES: &[(&str, f64)] = &[
    ("software engineer", 95_000.0),
    ("software developer", 90_000.0),
    ("web developer", 75_000.0),
    ("data scientist", 110_000.0),
    ("data analyst", 70_000.0),
    ("teacher", 50_000.0),
    ("nurse", 75_000.0),
    ("accountant", 65_000.0),
    ("marketing manager", 80_000.0),
    ("project manager", 85_000.0),
    ("sales representative", 55_000.0),
    ("financial analyst", 75_000.0),
];

/// Regional cost-of-labor multipliers.
pub const LOCATION_MULTIPLIERS: &[(&str, f64)] = &[
    ("new york", 1.3),
    ("san francisco", 1.4),
    ("los angeles", 1.2),
    ("chicago", 1.1),
    ("austin", 1.05),
    ("seattle", 1.15),
    ("boston", 1.2),
    ("washington", 1.15),
    ("denver", 1.0),
    ("atlanta", 0.95),
    ("phoenix", 0.9),
    ("dallas", 0.95),
    ("miami", 0.95),
];

// ────────────────────────────────────────────────────────────────────────────
// Matcher strategies
// ────────────────────────────────────────────────────────────────────────────

/// One way of deciding whether a normalized query hits a table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Query equals the key.
    Exact,
    /// Query contains the key.
    QueryContainsKey,
    /// Query contains the key, or the key contains the query's first word.
    Bidirectional,
}

impl MatchStrategy {
    pub fn matches(self, query: &str, key: &str) -> bool {
        match self {
            MatchStrategy::Exact => query == key,
            MatchStrategy::QueryContainsKey => query.contains(key),
            MatchStrategy::Bidirectional => {
                let first_word = query.split(' ').next().unwrap_or_default();
                query.contains(key) || key.contains(first_word)
            }
        }
    }
}

/// Strategies used for job titles, in priority order.
pub const TITLE_STRATEGIES: &[MatchStrategy] = &[MatchStrategy::Exact, MatchStrategy::Bidirectional];

/// Strategies used for locations, in priority order.
pub const LOCATION_STRATEGIES: &[MatchStrategy] =
    &[MatchStrategy::Exact, MatchStrategy::QueryContainsKey];

/// Lowercases and trims free-text input before matching.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Runs `strategies` in order over `table` and returns the first hit.
/// Empty queries never match.
pub fn resolve<T: Copy>(
    table: &[(&'static str, T)],
    query: &str,
    strategies: &[MatchStrategy],
) -> Option<(&'static str, T)> {
    if query.is_empty() {
        return None;
    }
    strategies.iter().find_map(|strategy| {
        table
            .iter()
            .find(|(key, _)| strategy.matches(query, key))
            .copied()
    })
}

/// Resolves a free-text job title into a base annual wage.
pub fn resolve_base_wage(job_title: &str) -> f64 {
    let query = normalize_query(job_title);
    match resolve(BASE_WAGES, &query, TITLE_STRATEGIES) {
        Some((_, wage)) => wage,
        None => {
            debug!("No wage table entry for job title {query:?}, using default");
            DEFAULT_BASE_WAGE
        }
    }
}

/// Resolves a free-text location into a cost-of-labor multiplier.
pub fn resolve_location_multiplier(location: &str) -> f64 {
    let query = normalize_query(location);
    match resolve(LOCATION_MULTIPLIERS, &query, LOCATION_STRATEGIES) {
        Some((_, multiplier)) => multiplier,
        None => {
            debug!("No multiplier for location {query:?}, using default");
            DEFAULT_LOCATION_MULTIPLIER
        }
    }
}
