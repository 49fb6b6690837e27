use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub use_mock_data: bool,
    pub mock_data_delay_ms: u64,
    pub max_retries: usize,
    pub error_retry_delay_ms: u64,
    pub api_keys: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080).context("PORT must be a number")?,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            use_mock_data: lookup("USE_MOCK_DATA")
                .is_some_and(|value| value.trim().eq_ignore_ascii_case("true")),
            mock_data_delay_ms: parse_or(&lookup, "MOCK_DATA_DELAY_MS", 500)
                .context("MOCK_DATA_DELAY_MS must be a number of milliseconds")?,
            max_retries: parse_or(&lookup, "MAX_RETRIES", 3)
                .context("MAX_RETRIES must be a number")?,
            error_retry_delay_ms: parse_or(&lookup, "ERROR_RETRY_DELAY_MS", 2000)
                .context("ERROR_RETRY_DELAY_MS must be a number of milliseconds")?,
            api_keys: lookup("API_KEYS").unwrap_or_default(),
        })
    }

    /// Mock data is served when forced or when no database is configured.
    pub fn mock_mode(&self) -> bool {
        self.use_mock_data || self.database_url.is_none()
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => Ok(value.trim().parse()?),
        None => Ok(default),
    }
}
