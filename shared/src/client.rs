//! Client-related types shared between the HR backend API and the store
//!
//! Request/response shapes of the remote HR service. The backend returns
//! bare JSON bodies (no response envelope).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub user: Option<RemoteUser>,
}

/// User information returned by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteUser {
    pub email: String,
    pub name: String,
    pub role: String,
}

/// Generic acknowledgement (`{"success": true, "message": "..."}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// Employee API DTOs
// =============================================================================

/// Remote primary key; the backend uses integers, fixtures use strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Text(v) => write!(f, "{}", v),
        }
    }
}

/// Employee record as served by `/api/v1/employees`
///
/// Optional fields are defaulted when mapped into the local shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEmployee {
    pub id: RemoteId,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    pub hire_date: NaiveDate,
    pub is_active: bool,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create employee request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEmployeeCreate {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub hire_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_employee_accepts_sparse_records() {
        let json = r#"{
            "id": 42,
            "employee_id": "EMP042",
            "first_name": "Georgi",
            "last_name": "Facello",
            "email": "georgi.facello@blackflag.hr",
            "hire_date": "2023-06-01",
            "is_active": true
        }"#;
        let emp: RemoteEmployee = serde_json::from_str(json).unwrap();
        assert_eq!(emp.id.to_string(), "42");
        assert!(emp.department.is_none());
        assert!(emp.salary.is_none());
        assert!(emp.created_at.is_none());
    }

    #[test]
    fn test_remote_id_text() {
        let id: RemoteId = serde_json::from_str("\"emp-001\"").unwrap();
        assert_eq!(id, RemoteId::Text("emp-001".to_string()));
    }
}
