//! HR Store - client-resident domain store
//!
//! Holds the in-memory copy of the HR directory, leave, documents, messages
//! and the signed-in user, and exposes the operations the UI calls into.
//!
//! # Components
//!
//! - [`identity`] - credential table and login resolution
//! - [`store`] - the [`HrStore`] with every mutation and derived view
//! - [`persistence`] - selective snapshot to a [`storage::KeyValueStorage`]
//! - [`hydration`] - startup employee directory (remote or seed)
//! - [`notifications`] - self-expiring user-facing notifications
//!
//! ```ignore
//! let config = StoreConfig::from_env();
//! let mut store = HrStore::bootstrap(&config).await?;
//! if store.login("sarah.chen@blackflag.hr", "Admin123!") {
//!     let stats = store.dashboard_stats(chrono::Utc::now().date_naive());
//! }
//! ```

pub mod config;
pub mod error;
pub mod hydration;
pub mod identity;
pub mod logger;
pub mod notifications;
pub mod persistence;
pub mod seed;
pub mod stats;
pub mod storage;
pub mod store;

pub use config::StoreConfig;
pub use error::{StorageError, StorageResult, StoreError, StoreResult};
pub use hydration::EmployeeSource;
pub use identity::{Credential, CredentialTable, IdentityResolver};
pub use notifications::NotificationQueue;
pub use persistence::{PersistedState, Persistence};
pub use seed::SeedData;
pub use stats::{DashboardStats, PersonalSummary};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::HrStore;

// Re-export shared models for convenience
pub use shared::models::*;
