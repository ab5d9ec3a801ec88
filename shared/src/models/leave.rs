//! Leave Models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hours in one leave day. Requests are filed in hours, balances track days.
pub const HOURS_PER_DAY: f64 = 8.0;

/// Leave category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Vacation,
    Sick,
    Personal,
    Bereavement,
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vacation => write!(f, "vacation"),
            Self::Sick => write!(f, "sick"),
            Self::Personal => write!(f, "personal"),
            Self::Bereavement => write!(f, "bereavement"),
        }
    }
}

/// Leave request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Yearly leave balance, one row per (employee, leave type, year).
///
/// All amounts are in days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    pub id: String,
    pub employee_id: String,
    pub leave_type: LeaveType,
    pub year: i32,
    pub accrued: f64,
    pub used: f64,
    pub carried_over: f64,
}

impl LeaveBalance {
    /// `accrued + carried_over - used`, not clamped: an overdrawn balance
    /// reports a negative number of days.
    pub fn available(&self) -> f64 {
        self.accrued + self.carried_over - self.used
    }

    pub fn matches(&self, employee_id: &str, leave_type: LeaveType) -> bool {
        self.employee_id == employee_id && self.leave_type == leave_type
    }
}

/// Leave request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: String,
    pub employee_id: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Requested time in hours
    pub hours: f64,
    pub status: LeaveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub approved_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Requested time converted to balance days (`hours / 8`)
    pub fn days(&self) -> f64 {
        self.hours / HOURS_PER_DAY
    }
}

/// Create leave request payload
///
/// Carries no status or approver: new requests always start pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLeaveRequest {
    pub employee_id: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hours: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Resubmitting an existing request keeps its content and drops its workflow state.
impl From<LeaveRequest> for NewLeaveRequest {
    fn from(request: LeaveRequest) -> Self {
        Self {
            employee_id: request.employee_id,
            leave_type: request.leave_type,
            start_date: request.start_date,
            end_date: request.end_date,
            hours: request.hours,
            notes: request.notes,
        }
    }
}
