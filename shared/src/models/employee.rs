//! Employee Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of the human-readable employee code (`EMP001`)
pub const EMPLOYEE_CODE_PREFIX: &str = "EMP";

/// Directory entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Opaque identifier (`emp-001`, or the remote id)
    pub id: String,
    /// Sequential human code (`EMP001`)
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub department: String,
    pub position: String,
    pub hire_date: NaiveDate,
    pub is_active: bool,
    #[serde(default)]
    pub address: String,
    pub salary: f64,
    /// Masked social security number
    #[serde(default)]
    pub ssn: String,
    /// Self reference to another employee's `id`
    pub manager_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Numeric part of `employee_id`, `None` when the code is not `EMP<digits>`.
    pub fn code_number(&self) -> Option<u64> {
        self.employee_id
            .strip_prefix(EMPLOYEE_CODE_PREFIX)
            .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|n| n.parse().ok())
    }

    /// Case-insensitive email comparison
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}

/// Format an employee code from its sequence number (`14` -> `EMP014`).
pub fn format_employee_code(number: u64) -> String {
    format!("{}{:03}", EMPLOYEE_CODE_PREFIX, number)
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub department: String,
    pub position: String,
    pub hire_date: NaiveDate,
    #[serde(default)]
    pub address: String,
    pub salary: f64,
    #[serde(default)]
    pub ssn: String,
    #[serde(default)]
    pub manager_id: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Update employee payload
///
/// Only the fields that are `Some` are merged into the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    pub address: Option<String>,
    pub salary: Option<f64>,
    pub ssn: Option<String>,
    /// `Some(None)` clears the manager
    pub manager_id: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
}

impl EmployeeUpdate {
    /// Merge the provided fields into `employee`. Timestamps are left to the caller.
    pub fn apply_to(self, employee: &mut Employee) {
        if let Some(v) = self.first_name {
            employee.first_name = v;
        }
        if let Some(v) = self.last_name {
            employee.last_name = v;
        }
        if let Some(v) = self.email {
            employee.email = v;
        }
        if let Some(v) = self.phone {
            employee.phone = v;
        }
        if let Some(v) = self.department {
            employee.department = v;
        }
        if let Some(v) = self.position {
            employee.position = v;
        }
        if let Some(v) = self.hire_date {
            employee.hire_date = v;
        }
        if let Some(v) = self.is_active {
            employee.is_active = v;
        }
        if let Some(v) = self.address {
            employee.address = v;
        }
        if let Some(v) = self.salary {
            employee.salary = v;
        }
        if let Some(v) = self.ssn {
            employee.ssn = v;
        }
        if let Some(v) = self.manager_id {
            employee.manager_id = v;
        }
        if let Some(v) = self.avatar_url {
            employee.avatar_url = v;
        }
    }
}
