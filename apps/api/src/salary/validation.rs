//! Request validation and job-title suggestions for the salary form.

use serde::{Deserialize, Deserializer};

use crate::errors::AppError;

pub const MIN_SALARY: u64 = 1_000;
pub const MAX_SALARY: u64 = 9_999_999;
const MIN_TEXT_LEN: usize = 2;
const MAX_SUGGESTIONS: usize = 5;

const COMMON_JOB_TITLES: &[&str] = &[
    "Software Engineer",
    "Software Developer",
    "Web Developer",
    "Data Scientist",
    "Data Analyst",
    "Teacher",
    "Elementary Teacher",
    "High School Teacher",
    "Registered Nurse",
    "Nurse Practitioner",
    "Accountant",
    "Financial Analyst",
    "Marketing Manager",
    "Project Manager",
    "Sales Representative",
    "Sales Manager",
    "Human Resources Manager",
    "Graphic Designer",
    "Mechanical Engineer",
    "Electrical Engineer",
    "Civil Engineer",
    "Business Analyst",
    "Product Manager",
];

/// Salary as submitted: either a JSON number or a formatted string like "$75,000".
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SalaryInput {
    Number(f64),
    Text(String),
}

impl SalaryInput {
    /// Whole-dollar amount, or 0 when nothing usable was sent.
    pub fn amount(&self) -> u64 {
        match self {
            SalaryInput::Number(n) if n.is_finite() && *n > 0.0 => n.trunc() as u64,
            SalaryInput::Number(_) => 0,
            SalaryInput::Text(s) => parse_salary_input(s),
        }
    }
}

/// Raw form submission. Missing or null fields deserialize to empty values so the
/// form rules, not the JSON extractor, decide what to report.
#[derive(Debug, Clone, Deserialize)]
pub struct SalaryCheckRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub job_title: String,
    #[serde(default)]
    pub current_salary: Option<SalaryInput>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub experience_level: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A request that passed every form rule, with text fields trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCheck {
    pub job_title: String,
    pub current_salary: u64,
    pub location: String,
    pub experience_level: String,
}

/// Strips every non-digit and parses what is left. Empty or overflowing input is 0.
pub fn parse_salary_input(raw: &str) -> u64 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Applies the form rules in order and reports the first one that fails.
pub fn validate_check_request(request: &SalaryCheckRequest) -> Result<ValidatedCheck, AppError> {
    let job_title = request.job_title.trim();
    if job_title.chars().count() < MIN_TEXT_LEN {
        return Err(AppError::Validation(
            "Please enter a valid job title (at least 2 characters)".to_string(),
        ));
    }

    let current_salary = request
        .current_salary
        .as_ref()
        .map_or(0, SalaryInput::amount);
    if !(MIN_SALARY..=MAX_SALARY).contains(&current_salary) {
        return Err(AppError::Validation(
            "Please enter a valid salary between $1,000 and $9,999,999".to_string(),
        ));
    }

    let location = request.location.trim();
    if location.chars().count() < MIN_TEXT_LEN {
        return Err(AppError::Validation(
            "Please enter a valid location (city, state or ZIP code)".to_string(),
        ));
    }

    let experience_level = request.experience_level.trim();
    if experience_level.is_empty() {
        return Err(AppError::Validation(
            "Please select your experience level".to_string(),
        ));
    }

    Ok(ValidatedCheck {
        job_title: job_title.to_string(),
        current_salary,
        location: location.to_string(),
        experience_level: experience_level.to_string(),
    })
}

/// Up to five common titles containing `query`, case-insensitively.
pub fn suggest_job_titles(query: &str) -> Vec<&'static str> {
    let query = query.trim().to_lowercase();
    if query.chars().count() < MIN_TEXT_LEN {
        return vec![];
    }

    COMMON_JOB_TITLES
        .iter()
        .filter(|title| title.to_lowercase().contains(&query))
        .take(MAX_SUGGESTIONS)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(job_title: &str, salary: SalaryInput, location: &str, level: &str) -> SalaryCheckRequest {
        SalaryCheckRequest {
            job_title: job_title.to_string(),
            current_salary: Some(salary),
            location: location.to_string(),
            experience_level: level.to_string(),
        }
    }

    fn validation_message(result: Result<ValidatedCheck, AppError>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_salary_strips_formatting() {
        assert_eq!(parse_salary_input("$125,000"), 125_000);
        assert_eq!(parse_salary_input(" 75 000 "), 75_000);
        assert_eq!(parse_salary_input("abc"), 0);
        assert_eq!(parse_salary_input(""), 0);
    }

    #[test]
    fn test_parse_salary_overflow_is_zero() {
        assert_eq!(parse_salary_input("99999999999999999999999"), 0);
    }

    #[test]
    fn test_salary_input_from_json() {
        let number: SalaryInput = serde_json::from_str("82000").unwrap();
        assert_eq!(number.amount(), 82_000);
        let text: SalaryInput = serde_json::from_str(r#""82,000""#).unwrap();
        assert_eq!(text.amount(), 82_000);
        assert_eq!(SalaryInput::Number(-10.0).amount(), 0);
    }

    #[test]
    fn test_valid_request_is_trimmed() {
        let checked = validate_check_request(&request(
            "  Nurse ",
            SalaryInput::Text("$60,000".to_string()),
            " Boston ",
            "senior",
        ))
        .unwrap();
        assert_eq!(checked.job_title, "Nurse");
        assert_eq!(checked.location, "Boston");
        assert_eq!(checked.current_salary, 60_000);
    }

    #[test]
    fn test_short_job_title_rejected() {
        let msg = validation_message(validate_check_request(&request(
            "a",
            SalaryInput::Number(50_000.0),
            "Boston",
            "mid",
        )));
        assert!(msg.contains("job title"));
    }

    #[test]
    fn test_salary_range_enforced() {
        for salary in [999.0, 10_000_000.0, 0.0] {
            let msg = validation_message(validate_check_request(&request(
                "Nurse",
                SalaryInput::Number(salary),
                "Boston",
                "mid",
            )));
            assert!(msg.contains("salary"), "{salary}: {msg}");
        }
        assert!(validate_check_request(&request("Nurse", SalaryInput::Number(1_000.0), "Boston", "mid")).is_ok());
        assert!(validate_check_request(&request("Nurse", SalaryInput::Number(9_999_999.0), "Boston", "mid")).is_ok());
    }

    #[test]
    fn test_rules_apply_in_order() {
        // Bad salary and bad location: salary is reported first.
        let msg = validation_message(validate_check_request(&request(
            "Nurse",
            SalaryInput::Number(5.0),
            "",
            "",
        )));
        assert!(msg.contains("salary"));
    }

    #[test]
    fn test_short_location_rejected() {
        let msg = validation_message(validate_check_request(&request(
            "Nurse",
            SalaryInput::Number(50_000.0),
            " x ",
            "mid",
        )));
        assert!(msg.contains("location"));
    }

    #[test]
    fn test_missing_experience_level_rejected() {
        let msg = validation_message(validate_check_request(&request(
            "Nurse",
            SalaryInput::Number(50_000.0),
            "Boston",
            "  ",
        )));
        assert_eq!(msg, "Please select your experience level");
    }

    #[test]
    fn test_missing_fields_reach_form_rules() {
        let request: SalaryCheckRequest =
            serde_json::from_str(r#"{"job_title": "Nurse", "location": "Boston", "experience_level": "mid"}"#)
                .unwrap();
        assert!(request.current_salary.is_none());
        assert_eq!(
            validation_message(validate_check_request(&request)),
            "Please enter a valid salary between $1,000 and $9,999,999"
        );

        let request: SalaryCheckRequest = serde_json::from_str(
            r#"{"job_title": null, "current_salary": null, "location": null, "experience_level": null}"#,
        )
        .unwrap();
        assert_eq!(request.job_title, "");
        assert_eq!(
            validation_message(validate_check_request(&request)),
            "Please enter a valid job title (at least 2 characters)"
        );

        let request: SalaryCheckRequest = serde_json::from_str("{}").unwrap();
        assert!(request.experience_level.is_empty());
    }

    #[test]
    fn test_suggestions_are_capped() {
        let suggestions = suggest_job_titles("er");
        assert_eq!(suggestions.len(), 5);
        assert_eq!(suggestions[0], "Software Engineer");
    }

    #[test]
    fn test_suggestions_case_insensitive() {
        assert_eq!(
            suggest_job_titles("TEACH"),
            vec!["Teacher", "Elementary Teacher", "High School Teacher"]
        );
    }

    #[test]
    fn test_short_query_has_no_suggestions() {
        assert!(suggest_job_titles("a").is_empty());
        assert!(suggest_job_titles("zzz").is_empty());
    }
}
