use anyhow::{Context, Result};

const DEFAULT_BLS_BASE_URL: &str = "https://api.bls.gov/publicAPI/v2/timeseries/data/";

/// Application configuration loaded from environment variables.
/// Every variable is optional; without a BLS key the service runs on table data.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub bls_api_key: Option<String>,
    pub bls_base_url: String,
    pub bls_start_year: String,
    pub bls_end_year: String,
    pub bls_timeout_secs: u64,
    pub enable_mock_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            bls_api_key: None,
            bls_base_url: DEFAULT_BLS_BASE_URL.to_string(),
            bls_start_year: "2022".to_string(),
            bls_end_year: "2023".to_string(),
            bls_timeout_secs: 10,
            enable_mock_data: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: optional_env("PORT")
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("PORT must be a valid port number")?
                .unwrap_or(defaults.port),
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            bls_api_key: optional_env("BLS_API_KEY"),
            bls_base_url: optional_env("BLS_BASE_URL").unwrap_or(defaults.bls_base_url),
            bls_start_year: optional_env("BLS_START_YEAR").unwrap_or(defaults.bls_start_year),
            bls_end_year: optional_env("BLS_END_YEAR").unwrap_or(defaults.bls_end_year),
            bls_timeout_secs: optional_env("BLS_TIMEOUT_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("BLS_TIMEOUT_SECS must be a whole number of seconds")?
                .unwrap_or(defaults.bls_timeout_secs),
            enable_mock_data: optional_env("ENABLE_MOCK_DATA")
                .map(|v| parse_flag(&v))
                .transpose()
                .context("ENABLE_MOCK_DATA must be true or false")?
                .unwrap_or(defaults.enable_mock_data),
        })
    }

    /// Table data only: the flag is set or there is no key to call BLS with.
    pub fn use_mock_data(&self) -> bool {
        self.enable_mock_data || self.bls_api_key.is_none()
    }
}

/// Unset and blank variables both read as `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("'{other}' is not a boolean"),
    }
}
