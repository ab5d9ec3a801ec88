//! HR Client - HTTP client for the HR backend
//!
//! Provides network-based calls to the HR service API: health checks,
//! mock authentication and the employee directory.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::client::{Ack, LoginResponse, RemoteEmployee, RemoteEmployeeCreate, RemoteUser};
