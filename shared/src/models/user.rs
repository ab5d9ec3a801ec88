//! Session User Model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::employee::Employee;

/// Role granted by the credential table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    HrAdmin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Employee => write!(f, "employee"),
            Self::HrAdmin => write!(f, "hr_admin"),
        }
    }
}

/// Signed-in user
///
/// Built from a directory entry at login; the role always comes from the
/// credential, never from the employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub employee_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl User {
    pub fn from_employee(employee: &Employee, role: Role) -> Self {
        Self {
            id: employee.id.clone(),
            employee_id: employee.employee_id.clone(),
            email: employee.email.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            role,
            avatar_url: employee.avatar_url.clone(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_hr_admin(&self) -> bool {
        self.role == Role::HrAdmin
    }

    /// Whether `employee_id` refers to this user, by opaque id or by code
    /// (case-insensitive, since remote and seeded ids differ in shape).
    pub fn owns(&self, employee_id: &str) -> bool {
        self.id.eq_ignore_ascii_case(employee_id) || self.employee_id.eq_ignore_ascii_case(employee_id)
    }
}
