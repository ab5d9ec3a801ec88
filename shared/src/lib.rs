//! Shared types for the Blackflag HR workspace
//!
//! Domain models held by the client-resident store, DTOs exchanged with the
//! HR backend, and small id/time utilities used by every crate.

pub mod client;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Document, DocumentType, Employee, EmployeeCreate, EmployeeUpdate, LeaveBalance, LeaveRequest,
    LeaveStatus, LeaveType, Message, NewDocument, NewLeaveRequest, Notification,
    NotificationKind, Role, User,
};
