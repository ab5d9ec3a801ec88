use std::path::PathBuf;
use std::time::Duration;

use crate::error::{StoreError, StoreResult};

/// Store configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HR_USE_API | false | Fetch the employee directory from the backend |
/// | HR_API_URL | http://localhost:8001 | Backend base URL |
/// | HR_API_TIMEOUT_SECS | 10 | HTTP timeout (seconds) |
/// | HR_FETCH_LIMIT | 10000 | Page size of the startup fetch |
/// | HR_DATA_DIR | ./data | Directory of the file storage |
/// | HR_STORAGE_QUOTA_BYTES | 5242880 | Per-key storage quota |
/// | HR_SEED_EMPLOYEES | 10000 | Generated seed employees |
/// | HR_SEED_CREDENTIALS | 100 | Generated employees with a login |
/// | HR_NOTIFICATION_TTL_MS | 5000 | Notification lifetime (ms) |
/// | LOG_LEVEL | info | Log level |
/// | LOG_JSON | false | JSON log output |
/// | LOG_DIR | (unset) | Daily rolling log directory |
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Fetch employees from the remote backend at startup
    pub use_api: bool,
    pub api_url: String,
    pub api_timeout_secs: u64,
    /// `limit` of the single startup page request
    pub fetch_limit: u32,
    pub data_dir: PathBuf,
    /// `None` disables the quota
    pub storage_quota_bytes: Option<u64>,
    pub seed_employee_count: usize,
    pub seed_credential_count: usize,
    pub notification_ttl: Duration,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl StoreConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            use_api: std::env::var("HR_USE_API")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.use_api),
            api_url: std::env::var("HR_API_URL").unwrap_or(defaults.api_url),
            api_timeout_secs: std::env::var("HR_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.api_timeout_secs),
            fetch_limit: std::env::var("HR_FETCH_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fetch_limit),
            data_dir: std::env::var("HR_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            storage_quota_bytes: match std::env::var("HR_STORAGE_QUOTA_BYTES") {
                // 0 = unlimited
                Ok(v) => v.parse().ok().filter(|q| *q > 0),
                Err(_) => defaults.storage_quota_bytes,
            },
            seed_employee_count: std::env::var("HR_SEED_EMPLOYEES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.seed_employee_count),
            seed_credential_count: std::env::var("HR_SEED_CREDENTIALS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.seed_credential_count),
            notification_ttl: std::env::var("HR_NOTIFICATION_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.notification_ttl),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_json),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Point the file storage at another directory
    ///
    /// Mostly used by tests.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Enable the remote directory fetch against `api_url`
    pub fn with_api(mut self, api_url: impl Into<String>) -> Self {
        self.use_api = true;
        self.api_url = api_url.into();
        self
    }

    /// Shrink the generated seed population
    pub fn with_seed_size(mut self, employees: usize, credentials: usize) -> Self {
        self.seed_employee_count = employees;
        self.seed_credential_count = credentials;
        self
    }

    /// Reject values the store cannot run with
    pub fn validate(&self) -> StoreResult<()> {
        if self.use_api && self.api_url.trim().is_empty() {
            return Err(StoreError::Config("HR_API_URL is empty".into()));
        }
        if self.fetch_limit == 0 {
            return Err(StoreError::Config("HR_FETCH_LIMIT must be positive".into()));
        }
        if self.notification_ttl.is_zero() {
            return Err(StoreError::Config(
                "HR_NOTIFICATION_TTL_MS must be positive".into(),
            ));
        }
        if self.seed_credential_count > self.seed_employee_count {
            return Err(StoreError::Config(format!(
                "HR_SEED_CREDENTIALS ({}) exceeds HR_SEED_EMPLOYEES ({})",
                self.seed_credential_count, self.seed_employee_count
            )));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            use_api: false,
            api_url: hr_client::config::DEFAULT_BASE_URL.to_string(),
            api_timeout_secs: 10,
            fetch_limit: 10_000,
            data_dir: PathBuf::from("./data"),
            storage_quota_bytes: Some(5 * 1024 * 1024),
            seed_employee_count: crate::seed::DEFAULT_EMPLOYEE_COUNT,
            seed_credential_count: crate::seed::DEFAULT_CREDENTIAL_COUNT,
            notification_ttl: crate::notifications::DEFAULT_NOTIFICATION_TTL,
            log_level: "info".to_string(),
            log_json: false,
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = StoreConfig::default();
        assert!(!config.use_api);
        assert_eq!(config.fetch_limit, 10_000);
        assert_eq!(config.notification_ttl, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = StoreConfig::default().with_seed_size(10, 20);
        assert!(matches!(config.validate(), Err(StoreError::Config(_))));

        config = StoreConfig::default();
        config.fetch_limit = 0;
        assert!(config.validate().is_err());

        config = StoreConfig::default().with_api("  ");
        assert!(config.validate().is_err());
    }
}
