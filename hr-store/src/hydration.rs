//! Startup employee directory
//!
//! One paged fetch from the remote backend, mapped into local [`Employee`]
//! records and unioned with the login-capable seed profiles. Without a
//! source, or when the fetch fails, the seed directory is used.
//!
//! The fetch runs as its own task via [`spawn_hydration`] so the store stays
//! usable (logins included) until the result is applied.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use hr_client::{ClientResult, HttpClient, RemoteEmployee};
use shared::models::Employee;

use crate::config::StoreConfig;
use crate::seed::SeedData;

/// Salary assumed for remote records that carry none
pub const DEFAULT_REMOTE_SALARY: f64 = 110_000.0;

/// Paged read of the remote employee directory
#[async_trait]
pub trait EmployeeSource: Send + Sync {
    async fn fetch(&self, skip: u32, limit: u32) -> ClientResult<Vec<RemoteEmployee>>;
}

#[async_trait]
impl EmployeeSource for HttpClient {
    async fn fetch(&self, skip: u32, limit: u32) -> ClientResult<Vec<RemoteEmployee>> {
        self.get_employees(skip, limit).await
    }
}

/// HTTP source for `config`, `None` when the remote fetch is disabled or the
/// client cannot be built
pub fn remote_source(config: &StoreConfig) -> Option<Arc<dyn EmployeeSource>> {
    if !config.use_api {
        return None;
    }

    match hr_client::ClientConfig::new(&config.api_url)
        .with_timeout(config.api_timeout_secs)
        .build_http_client()
    {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            None
        }
    }
}

/// Map a remote record into the local shape
///
/// Fields the backend does not serve (ssn, manager) are left empty.
pub fn map_remote_employee(remote: RemoteEmployee) -> Employee {
    let hired_at: DateTime<Utc> = remote
        .hire_date
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_default();
    let created_at = remote.created_at.unwrap_or(hired_at);
    let updated_at = remote.updated_at.unwrap_or(created_at);

    Employee {
        id: remote.id.to_string(),
        employee_id: remote.employee_id,
        first_name: remote.first_name,
        last_name: remote.last_name,
        email: remote.email,
        phone: remote.phone.unwrap_or_default(),
        department: remote.department.unwrap_or_else(|| "Unknown".to_string()),
        position: remote.position.unwrap_or_else(|| "Employee".to_string()),
        hire_date: remote.hire_date,
        is_active: remote.is_active,
        address: remote.address.unwrap_or_default(),
        salary: remote.salary.unwrap_or(DEFAULT_REMOTE_SALARY),
        ssn: String::new(),
        manager_id: None,
        avatar_url: None,
        created_at,
        updated_at,
    }
}

/// Build the employee directory. Never fails and never returns an empty
/// list unless the seed itself is empty.
pub async fn load_directory(
    source: Option<&dyn EmployeeSource>,
    limit: u32,
    seed: &SeedData,
) -> Vec<Employee> {
    let Some(source) = source else {
        tracing::info!(count = seed.employees.len(), "Remote fetch disabled, using seed directory");
        return seed.employees.clone();
    };

    match source.fetch(0, limit).await {
        Ok(remote) => {
            let fetched = remote.len();
            let employees: Vec<Employee> = remote.into_iter().map(map_remote_employee).collect();
            let merged = seed.ensure_test_profiles(employees);
            tracing::info!(fetched, total = merged.len(), "Loaded employee directory from backend");
            merged
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch employees, using seed directory");
            seed.employees.clone()
        }
    }
}

/// Start [`load_directory`] on the runtime
///
/// Await the handle and pass the result to
/// [`HrStore::finish_hydration`](crate::HrStore::finish_hydration).
pub fn spawn_hydration(
    source: Option<Arc<dyn EmployeeSource>>,
    limit: u32,
    seed: Arc<SeedData>,
) -> JoinHandle<Vec<Employee>> {
    tokio::spawn(async move { load_directory(source.as_deref(), limit, &seed).await })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hr_client::ClientError;
    use shared::client::RemoteId;

    fn remote(n: i64) -> RemoteEmployee {
        RemoteEmployee {
            id: RemoteId::Int(n),
            employee_id: format!("EMP{:03}", n),
            first_name: "Remote".to_string(),
            last_name: format!("User{}", n),
            email: format!("remote.user{}@blackflag.hr", n),
            phone: None,
            department: None,
            position: None,
            hire_date: NaiveDate::from_ymd_opt(2022, 4, 1).unwrap(),
            is_active: true,
            address: None,
            salary: None,
            created_at: None,
            updated_at: None,
        }
    }

    struct Fixed(Vec<RemoteEmployee>);

    #[async_trait]
    impl EmployeeSource for Fixed {
        async fn fetch(&self, skip: u32, limit: u32) -> ClientResult<Vec<RemoteEmployee>> {
            Ok(self
                .0
                .iter()
                .skip(skip as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        }
    }

    struct Offline;

    #[async_trait]
    impl EmployeeSource for Offline {
        async fn fetch(&self, _skip: u32, _limit: u32) -> ClientResult<Vec<RemoteEmployee>> {
            Err(ClientError::Internal("backend down".to_string()))
        }
    }

    #[test]
    fn test_map_defaults() {
        let employee = map_remote_employee(remote(7));
        assert_eq!(employee.id, "7");
        assert_eq!(employee.phone, "");
        assert_eq!(employee.department, "Unknown");
        assert_eq!(employee.position, "Employee");
        assert_eq!(employee.salary, DEFAULT_REMOTE_SALARY);
        assert_eq!(employee.created_at.to_rfc3339(), "2022-04-01T00:00:00+00:00");
        assert_eq!(employee.updated_at, employee.created_at);
        assert!(employee.manager_id.is_none());
    }

    #[test]
    fn test_map_keeps_served_fields() {
        let mut r = remote(8);
        r.department = Some("Finance".to_string());
        r.salary = Some(0.0);
        let employee = map_remote_employee(r);
        assert_eq!(employee.department, "Finance");
        // A served zero is a number, not a missing value
        assert_eq!(employee.salary, 0.0);
    }

    #[tokio::test]
    async fn test_remote_directory_is_unioned_with_test_profiles() {
        let seed = SeedData::generate(4, 2);
        let source = Fixed((1..=3).map(remote).collect());

        let directory = load_directory(Some(&source), 10_000, &seed).await;
        // 3 remote + 2 admins + 2 generated logins
        assert_eq!(directory.len(), 7);
        assert!(directory.iter().any(|e| e.has_email("sarah.chen@blackflag.hr")));
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_to_seed() {
        let seed = SeedData::generate(4, 2);
        let directory = load_directory(Some(&Offline), 10_000, &seed).await;
        assert_eq!(directory, seed.employees);

        let disabled = load_directory(None, 10_000, &seed).await;
        assert_eq!(disabled.len(), seed.employees.len());
    }

    #[tokio::test]
    async fn test_spawned_hydration_uses_source() {
        let seed = Arc::new(SeedData::generate(0, 0));
        let source: Arc<dyn EmployeeSource> = Arc::new(Fixed((1..=3).map(remote).collect()));

        let directory = spawn_hydration(Some(source), 2, seed).await.unwrap();
        // Page of 2 + the two admins
        assert_eq!(directory.len(), 4);
        assert!(directory.iter().any(|e| e.has_email("remote.user2@blackflag.hr")));
        assert!(!directory.iter().any(|e| e.has_email("remote.user3@blackflag.hr")));
    }

    #[test]
    fn test_remote_source_disabled() {
        let config = StoreConfig {
            use_api: false,
            ..StoreConfig::default()
        };
        assert!(remote_source(&config).is_none());
    }
}
