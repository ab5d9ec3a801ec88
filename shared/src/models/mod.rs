//! Data models
//!
//! Held in memory by the HR store. Every model serializes with snake_case
//! field names; dates are `YYYY-MM-DD`, timestamps RFC 3339 in UTC.
//! References between models are plain string ids and are never enforced,
//! so readers must tolerate dangling references.

pub mod document;
pub mod employee;
pub mod leave;
pub mod message;
pub mod notification;
pub mod user;

// Re-exports
pub use document::*;
pub use employee::*;
pub use leave::*;
pub use message::*;
pub use notification::*;
pub use user::*;
