//! HR Store
//!
//! The owned state of one interactive session: the employee directory, leave
//! balances and requests, documents, messages, the signed-in user and the
//! live notifications. Every mutator is synchronous. Mutations of the
//! persisted collections are written through [`Persistence`] right away.
//!
//! # Module structure
//!
//! - `employees` - directory CRUD and lookups
//! - `leave` - leave requests and balance debits
//! - `documents` - document metadata
//! - `messages` - direct messages, conversations and unread counts

mod documents;
mod employees;
mod leave;
mod messages;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::task::JoinHandle;

use shared::models::{
    Document, Employee, LeaveBalance, LeaveRequest, Message, Notification, NotificationKind, User,
};

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::hydration::{self, EmployeeSource};
use crate::identity::{CredentialTable, IdentityResolver};
use crate::notifications::NotificationQueue;
use crate::persistence::{PersistedState, Persistence, StoredData};
use crate::seed::{FALLBACK_USER_ID, SeedData};
use crate::stats::{DashboardStats, PersonalSummary};
use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage};

/// Client-resident HR domain store
#[derive(Debug)]
pub struct HrStore {
    seed: Arc<SeedData>,
    identity: IdentityResolver,
    persistence: Persistence,
    notifications: NotificationQueue,

    employees: Vec<Employee>,
    leave_balances: Vec<LeaveBalance>,
    leave_requests: Vec<LeaveRequest>,
    documents: Vec<Document>,
    messages: Vec<Message>,
    is_authenticated: bool,
    user: Option<User>,
}

impl HrStore {
    /// Build a store over `storage`, restoring the persisted collections
    ///
    /// The employee directory starts empty until [`HrStore::apply_directory`]
    /// (or [`HrStore::finish_hydration`]) runs; logins before that resolve
    /// against the seed dataset.
    pub fn new(
        seed: impl Into<Arc<SeedData>>,
        storage: Arc<dyn KeyValueStorage>,
        notification_ttl: Duration,
    ) -> Self {
        let seed = seed.into();
        let persistence = Persistence::new(storage);
        let PersistedState {
            leave_balances,
            leave_requests,
            documents,
            messages,
            is_authenticated,
            user,
        } = persistence.load(&seed);

        Self {
            identity: IdentityResolver::new(CredentialTable::from(&*seed)),
            seed,
            persistence,
            notifications: NotificationQueue::new(notification_ttl),
            employees: Vec::new(),
            leave_balances,
            leave_requests,
            documents,
            messages,
            is_authenticated,
            user,
        }
    }

    /// Store with in-memory storage and the seed directory already applied
    pub fn in_memory(seed: SeedData) -> Self {
        let directory = seed.employees.clone();
        let mut store = Self::new(
            seed,
            Arc::new(MemoryStorage::new()),
            crate::notifications::DEFAULT_NOTIFICATION_TTL,
        );
        store.apply_directory(directory);
        store
    }

    /// Build a store from configuration, without the employee directory
    ///
    /// Only an invalid configuration is an error. A storage directory that
    /// cannot be opened degrades to memory storage.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        config.validate()?;

        let seed = SeedData::generate(config.seed_employee_count, config.seed_credential_count);
        let storage: Arc<dyn KeyValueStorage> =
            match FileStorage::open(config.data_dir.clone(), config.storage_quota_bytes) {
                Ok(files) => Arc::new(files),
                Err(e) => {
                    tracing::error!(
                        dir = %config.data_dir.display(),
                        error = %e,
                        "Failed to open storage directory, state will not survive restart"
                    );
                    Arc::new(MemoryStorage::new())
                }
            };

        Ok(Self::new(seed, storage, config.notification_ttl))
    }

    /// Build and hydrate a store from configuration
    ///
    /// An unusable backend degrades to the seed directory.
    pub async fn bootstrap(config: &StoreConfig) -> StoreResult<Self> {
        let mut store = Self::open(config)?;
        let pending = hydration::spawn_hydration(
            hydration::remote_source(config),
            config.fetch_limit,
            store.seed_handle(),
        );
        store.finish_hydration(pending).await;

        tracing::info!(
            employees = store.employees.len(),
            balances = store.leave_balances.len(),
            requests = store.leave_requests.len(),
            documents = store.documents.len(),
            authenticated = store.is_authenticated,
            "HR store ready"
        );
        Ok(store)
    }

    /// Fetch the employee directory and apply it, holding the store meanwhile
    pub async fn hydrate(&mut self, source: Option<&dyn EmployeeSource>, limit: u32) {
        let directory = hydration::load_directory(source, limit, &self.seed).await;
        self.apply_directory(directory);
    }

    /// Apply the result of [`hydration::spawn_hydration`]
    ///
    /// A fetch task that died falls back to the seed directory.
    pub async fn finish_hydration(&mut self, pending: JoinHandle<Vec<Employee>>) {
        let directory = match pending.await {
            Ok(directory) => directory,
            Err(e) => {
                tracing::error!(error = %e, "Directory fetch task failed, using seed directory");
                self.seed.employees.clone()
            }
        };
        self.apply_directory(directory);
    }

    /// Replace the employee directory
    ///
    /// Entries a login appended from the seed are kept when the new directory
    /// lacks them, everything else is replaced.
    pub fn apply_directory(&mut self, directory: Vec<Employee>) {
        let credentials = self.identity.credentials();
        let carried: Vec<Employee> = self
            .employees
            .drain(..)
            .filter(|e| credentials.contains(&e.email))
            .filter(|e| !directory.iter().any(|d| d.has_email(&e.email)))
            .collect();
        if !carried.is_empty() {
            tracing::debug!(count = carried.len(), "Kept signed-in profiles missing from directory");
        }
        self.employees = directory;
        self.employees.extend(carried);
    }

    /// Shared handle to the seed dataset, for work that outlives a borrow
    /// of the store
    pub fn seed_handle(&self) -> Arc<SeedData> {
        Arc::clone(&self.seed)
    }

    pub fn seed(&self) -> &SeedData {
        &self.seed
    }

    // ========== Session ==========

    /// Sign in. On failure the session is left untouched and an error
    /// notification is posted.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        let resolved = self
            .identity
            .resolve(email, password, &mut self.employees, &self.seed);

        let Some(user) = resolved else {
            tracing::warn!(email = %email, "Login failed");
            self.notify("Invalid email or password", NotificationKind::Error);
            return false;
        };

        tracing::info!(user_id = %user.id, role = %user.role, "User signed in");
        self.notify(
            format!("Welcome back, {}!", user.first_name),
            NotificationKind::Success,
        );
        self.user = Some(user);
        self.is_authenticated = true;
        self.persist();
        true
    }

    pub fn logout(&mut self) {
        if let Some(user) = &self.user {
            tracing::info!(user_id = %user.id, "User signed out");
        }
        self.user = None;
        self.is_authenticated = false;
        self.persist();
        self.notify("You have been signed out.", NotificationKind::Info);
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Id recorded as author of uploads and messages
    fn acting_user_id(&self) -> String {
        self.user
            .as_ref()
            .map(|u| u.id.clone())
            .unwrap_or_else(|| FALLBACK_USER_ID.to_string())
    }

    // ========== Notifications ==========

    /// Live notifications, oldest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.list()
    }

    pub fn add_notification(
        &self,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Notification {
        self.notifications.push(message, kind)
    }

    /// Dismiss a notification. Unknown ids are ignored.
    pub fn clear_notification(&self, id: &str) {
        self.notifications.clear(id);
    }

    fn notify(&self, message: impl Into<String>, kind: NotificationKind) {
        self.notifications.push(message, kind);
    }

    // ========== Derived views ==========

    pub fn dashboard_stats(&self, today: NaiveDate) -> DashboardStats {
        DashboardStats::compute(&self.employees, &self.leave_requests, today)
    }

    /// Summary for the signed-in user, `None` when signed out
    pub fn personal_summary(&self) -> Option<PersonalSummary> {
        let user = self.user.as_ref()?;
        Some(PersonalSummary::compute(
            user,
            &self.leave_balances,
            &self.leave_requests,
            &self.documents,
        ))
    }

    // ========== Persistence ==========

    fn persist(&self) {
        self.persistence.save(&StoredData {
            leave_balances: &self.leave_balances,
            leave_requests: &self.leave_requests,
            documents: &self.documents,
            messages: &self.messages,
            is_authenticated: self.is_authenticated,
            user: self.user.as_ref(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_before_hydration_uses_seed() {
        let seed = SeedData::generate(3, 1);
        let mut store = HrStore::new(seed, Arc::new(MemoryStorage::new()), Duration::from_secs(5));
        assert!(store.employees().is_empty());

        assert!(store.login("hr.manager@blackflag.hr", "HRPass123!"));
        assert_eq!(store.employees().len(), 1);

        // The later directory does not lose or duplicate the inserted entry
        let directory = store.seed().employees.clone();
        store.apply_directory(directory);
        assert_eq!(store.employees().len(), 5);
    }

    #[test]
    fn test_directory_replaces_all_but_signed_in_profiles() {
        // emp-001 and emp-013 are the admins, emp-014 the generated login
        let seed = SeedData::generate(3, 1);
        let mut store = HrStore::new(seed, Arc::new(MemoryStorage::new()), Duration::from_secs(5));
        store.apply_directory(store.seed().employees[3..].to_vec());
        assert!(store.login("sarah.chen@blackflag.hr", "Admin123!"));
        assert_eq!(store.employees().len(), 3);

        store.apply_directory(store.seed().employees[2..3].to_vec());
        let ids: Vec<&str> = store.employees().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["emp-014", "emp-001"]);
    }

    #[test]
    fn test_login_notifications() {
        let mut store = HrStore::in_memory(SeedData::generate(0, 0));

        assert!(!store.login("sarah.chen@blackflag.hr", "nope"));
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());

        assert!(store.login("Sarah.Chen@blackflag.hr", "Admin123!"));
        store.logout();

        let messages: Vec<(String, NotificationKind)> = store
            .notifications()
            .into_iter()
            .map(|n| (n.message, n.kind))
            .collect();
        assert_eq!(
            messages,
            vec![
                ("Invalid email or password".to_string(), NotificationKind::Error),
                ("Welcome back, Sarah!".to_string(), NotificationKind::Success),
                ("You have been signed out.".to_string(), NotificationKind::Info),
            ]
        );
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_clear_notification_is_idempotent() {
        let store = HrStore::in_memory(SeedData::generate(0, 0));
        let n = store.add_notification("hello", NotificationKind::Info);
        store.clear_notification(&n.id);
        store.clear_notification(&n.id);
        assert!(store.notifications().is_empty());
    }
}
