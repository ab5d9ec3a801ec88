//! Selective state persistence
//!
//! A single storage key holds `{leaveBalances, leaveRequests, documents,
//! messages, isAuthenticated, user}`. The employee directory is never
//! written. Loading is a field-by-field merge against the seed values, and
//! every failure is logged and replaced by a default.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use shared::models::{Document, LeaveBalance, LeaveRequest, Message, User};

use crate::seed::SeedData;
use crate::storage::KeyValueStorage;

/// Current storage key
pub const STORAGE_KEY: &str = "blackflag-hr-data-v3";

/// Pre-migration keys; deleted on sight, content never read
pub const LEGACY_STORAGE_KEYS: [&str; 2] = ["blackflag-hr-data", "blackflag-hr-data-v2"];

/// Durable part of the store state
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedState {
    pub leave_balances: Vec<LeaveBalance>,
    pub leave_requests: Vec<LeaveRequest>,
    pub documents: Vec<Document>,
    /// Always empty after a load
    pub messages: Vec<Message>,
    pub is_authenticated: bool,
    pub user: Option<User>,
}

impl PersistedState {
    /// Compiled-in defaults: seed records, empty inbox, signed out
    pub fn from_seed(seed: &SeedData) -> Self {
        Self {
            leave_balances: seed.leave_balances.clone(),
            leave_requests: seed.leave_requests.clone(),
            documents: seed.documents.clone(),
            messages: Vec::new(),
            is_authenticated: false,
            user: None,
        }
    }

    pub fn as_stored(&self) -> StoredData<'_> {
        StoredData {
            leave_balances: &self.leave_balances,
            leave_requests: &self.leave_requests,
            documents: &self.documents,
            messages: &self.messages,
            is_authenticated: self.is_authenticated,
            user: self.user.as_ref(),
        }
    }
}

/// Borrowed view written to storage
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredData<'a> {
    pub leave_balances: &'a [LeaveBalance],
    pub leave_requests: &'a [LeaveRequest],
    pub documents: &'a [Document],
    pub messages: &'a [Message],
    pub is_authenticated: bool,
    pub user: Option<&'a User>,
}

/// Reads and writes [`PersistedState`] through a [`KeyValueStorage`]
#[derive(Clone)]
pub struct Persistence {
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("key", &STORAGE_KEY)
            .finish_non_exhaustive()
    }
}

impl Persistence {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<dyn KeyValueStorage> {
        &self.storage
    }

    /// Load the persisted state, never failing
    pub fn load(&self, seed: &SeedData) -> PersistedState {
        let raw = match self.storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.drop_legacy_keys();
                return PersistedState::from_seed(seed);
            }
            Err(e) => {
                tracing::warn!(key = STORAGE_KEY, error = %e, "Failed to read stored data, using defaults");
                return PersistedState::from_seed(seed);
            }
        };

        let map = match serde_json::from_str::<Map<String, Value>>(&raw) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(key = STORAGE_KEY, error = %e, "Stored data is not a JSON object, using defaults");
                return PersistedState::from_seed(seed);
            }
        };

        let state = PersistedState {
            leave_balances: field(&map, "leaveBalances")
                .unwrap_or_else(|| seed.leave_balances.clone()),
            leave_requests: field(&map, "leaveRequests")
                .unwrap_or_else(|| seed.leave_requests.clone()),
            documents: field(&map, "documents").unwrap_or_else(|| seed.documents.clone()),
            // The inbox always starts empty, stored messages are ignored
            messages: Vec::new(),
            is_authenticated: field(&map, "isAuthenticated").unwrap_or(false),
            user: field::<Option<User>>(&map, "user").flatten(),
        };

        tracing::debug!(
            balances = state.leave_balances.len(),
            requests = state.leave_requests.len(),
            documents = state.documents.len(),
            authenticated = state.is_authenticated,
            "Loaded stored data"
        );
        state
    }

    /// Write the state. Failures (quota, IO) are logged and reported as `false`.
    pub fn save(&self, data: &StoredData<'_>) -> bool {
        let json = match serde_json::to_string(data) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize stored data");
                return false;
            }
        };
        match self.storage.set(STORAGE_KEY, &json) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(key = STORAGE_KEY, error = %e, "Failed to save stored data");
                false
            }
        }
    }

    fn drop_legacy_keys(&self) {
        for key in LEGACY_STORAGE_KEYS {
            match self.storage.get(key) {
                Ok(Some(_)) => match self.storage.remove(key) {
                    Ok(()) => tracing::info!(key, "Removed legacy stored data"),
                    Err(e) => tracing::warn!(key, error = %e, "Failed to remove legacy stored data"),
                },
                Ok(None) => {}
                Err(e) => tracing::warn!(key, error = %e, "Failed to read legacy stored data"),
            }
        }
    }
}

/// Decode one top-level field. Missing, `null` or malformed fields yield `None`.
fn field<T: DeserializeOwned>(map: &Map<String, Value>, name: &str) -> Option<T> {
    let value = map.get(name).filter(|v| !v.is_null())?;
    match serde_json::from_value(value.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(field = name, error = %e, "Ignoring malformed stored field");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn setup() -> (Arc<MemoryStorage>, Persistence, SeedData) {
        let storage = Arc::new(MemoryStorage::new());
        let persistence = Persistence::new(storage.clone());
        (storage, persistence, SeedData::generate(3, 1))
    }

    #[test]
    fn test_empty_storage_yields_seed() {
        let (_, persistence, seed) = setup();
        assert_eq!(persistence.load(&seed), PersistedState::from_seed(&seed));
    }

    #[test]
    fn test_legacy_keys_are_deleted_not_read() {
        let (storage, persistence, seed) = setup();
        storage.set("blackflag-hr-data", "{\"isAuthenticated\":true}").unwrap();
        storage.set("blackflag-hr-data-v2", "garbage").unwrap();

        let state = persistence.load(&seed);
        assert!(!state.is_authenticated);
        assert!(!storage.contains("blackflag-hr-data"));
        assert!(!storage.contains("blackflag-hr-data-v2"));
    }

    #[test]
    fn test_legacy_keys_kept_while_current_key_exists() {
        let (storage, persistence, seed) = setup();
        storage.set(STORAGE_KEY, "{}").unwrap();
        storage.set("blackflag-hr-data", "{}").unwrap();

        persistence.load(&seed);
        assert!(storage.contains("blackflag-hr-data"));
    }

    #[test]
    fn test_partial_blob_merges_with_seed() {
        let (storage, persistence, seed) = setup();
        let blob = json!({
            "leaveBalances": [],
            "documents": "not a list",
            "messages": [{
                "id": "msg-1", "from_id": "emp-001", "to_id": "emp-013",
                "content": "hi", "read": false, "created_at": "2025-01-01T00:00:00Z"
            }],
            "isAuthenticated": true
        });
        storage.set(STORAGE_KEY, &blob.to_string()).unwrap();

        let state = persistence.load(&seed);
        assert!(state.leave_balances.is_empty());
        assert_eq!(state.leave_requests, seed.leave_requests);
        assert_eq!(state.documents, seed.documents);
        assert!(state.messages.is_empty());
        assert!(state.is_authenticated);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_corrupt_blob_yields_seed() {
        let (storage, persistence, seed) = setup();
        storage.set(STORAGE_KEY, "{not json").unwrap();
        assert_eq!(persistence.load(&seed), PersistedState::from_seed(&seed));
    }

    #[test]
    fn test_save_writes_camel_case_without_employees() {
        let (storage, persistence, seed) = setup();
        let state = PersistedState::from_seed(&seed);
        assert!(persistence.save(&state.as_stored()));

        let raw = storage.get(STORAGE_KEY).unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["documents", "isAuthenticated", "leaveBalances", "leaveRequests", "messages", "user"]
        );
    }

    #[test]
    fn test_save_over_quota_is_reported_not_raised() {
        let storage = Arc::new(MemoryStorage::with_quota(16));
        let persistence = Persistence::new(storage.clone());
        let seed = SeedData::generate(0, 0);

        assert!(!persistence.save(&PersistedState::from_seed(&seed).as_stored()));
        assert!(!storage.contains(STORAGE_KEY));
    }
}
