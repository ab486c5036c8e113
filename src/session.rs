//! Session storage
//!
//! Persisted client-side session: the access/refresh credential pair plus the
//! cached role, all cleared together on logout. The store is an injected
//! dependency (trait object) so the client and the route guard can be tested
//! against an in-memory double.
//!
//! Readers always re-read current values instead of caching them across
//! calls; a refresh that lands between two requests is picked up by the next
//! request automatically.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Coarse authorization tag gating which views a user may reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Staff,
    Customer,
}

impl Role {
    /// Canonical home route for the role, used when a user lands on a view
    /// their role does not permit
    pub fn home_route(&self) -> &'static str {
        match self {
            Role::Staff => "/dashboard",
            Role::Customer => "/customer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Staff => write!(f, "staff"),
            Role::Customer => write!(f, "customer"),
        }
    }
}

/// Storage for the authenticated session
///
/// Mutated by login, refresh success and logout; read by the outbound
/// request path and the route guard.
pub trait SessionStore: Send + Sync {
    /// Short-lived bearer credential, if a session exists
    fn access_token(&self) -> Option<String>;

    /// Longer-lived credential used solely to obtain a new access token
    fn refresh_token(&self) -> Option<String>;

    /// Role cached from the last successful identity resolution
    fn role(&self) -> Option<Role>;

    /// Store a freshly issued credential pair (login)
    fn set_tokens(&self, access: &str, refresh: &str);

    /// Replace only the access credential (refresh)
    fn set_access_token(&self, access: &str);

    /// Cache the resolved role for the rest of the session
    fn set_role(&self, role: Role);

    /// Drop credentials and cached role together (logout / invalid session)
    fn clear(&self);
}

/// Serialized session record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionRecord {
    access_token: Option<String>,
    refresh_token: Option<String>,
    role: Option<Role>,
}

/// In-memory session store, used in tests and short-lived tools
#[derive(Default)]
pub struct MemorySessionStore {
    record: RwLock<SessionRecord>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn access_token(&self) -> Option<String> {
        self.record.read().access_token.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.record.read().refresh_token.clone()
    }

    fn role(&self) -> Option<Role> {
        self.record.read().role
    }

    fn set_tokens(&self, access: &str, refresh: &str) {
        let mut record = self.record.write();
        record.access_token = Some(access.to_string());
        record.refresh_token = Some(refresh.to_string());
    }

    fn set_access_token(&self, access: &str) {
        self.record.write().access_token = Some(access.to_string());
    }

    fn set_role(&self, role: Role) {
        self.record.write().role = Some(role);
    }

    fn clear(&self) {
        *self.record.write() = SessionRecord::default();
    }
}

/// File-backed session store, persisted as JSON so the session survives
/// process restarts
pub struct FileSessionStore {
    path: PathBuf,
    record: RwLock<SessionRecord>,
}

impl FileSessionStore {
    /// Open the store at `path`, loading an existing session if one is
    /// present. A missing or corrupt file starts an empty session.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let record = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!("Discarding corrupt session file {}: {}", path.display(), e);
                SessionRecord::default()
            }),
            Err(_) => SessionRecord::default(),
        };

        Self {
            path,
            record: RwLock::new(record),
        }
    }

    /// Persist the current record; failures are logged, not fatal, since the
    /// in-memory session stays valid for this process
    fn save(&self, record: &SessionRecord) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Failed to create session dir {}: {}", parent.display(), e);
                return;
            }
        }

        match serde_json::to_string_pretty(record) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    warn!("Failed to persist session to {}: {}", self.path.display(), e);
                }
            }
            Err(e) => warn!("Failed to serialize session: {}", e),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn access_token(&self) -> Option<String> {
        self.record.read().access_token.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.record.read().refresh_token.clone()
    }

    fn role(&self) -> Option<Role> {
        self.record.read().role
    }

    fn set_tokens(&self, access: &str, refresh: &str) {
        let mut record = self.record.write();
        record.access_token = Some(access.to_string());
        record.refresh_token = Some(refresh.to_string());
        self.save(&record);
    }

    fn set_access_token(&self, access: &str) {
        let mut record = self.record.write();
        record.access_token = Some(access.to_string());
        self.save(&record);
    }

    fn set_role(&self, role: Role) {
        let mut record = self.record.write();
        record.role = Some(role);
        self.save(&record);
    }

    fn clear(&self) {
        let mut record = self.record.write();
        *record = SessionRecord::default();
        self.save(&record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::new();
        assert!(store.access_token().is_none());

        store.set_tokens("acc-1", "ref-1");
        store.set_role(Role::Staff);

        assert_eq!(store.access_token().as_deref(), Some("acc-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("ref-1"));
        assert_eq!(store.role(), Some(Role::Staff));
    }

    #[test]
    fn test_clear_drops_everything_together() {
        let store = MemorySessionStore::new();
        store.set_tokens("acc-1", "ref-1");
        store.set_role(Role::Customer);

        store.clear();

        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
        assert!(store.role().is_none());
    }

    #[test]
    fn test_refresh_replaces_only_access_token() {
        let store = MemorySessionStore::new();
        store.set_tokens("acc-1", "ref-1");

        store.set_access_token("acc-2");

        assert_eq!(store.access_token().as_deref(), Some("acc-2"));
        assert_eq!(store.refresh_token().as_deref(), Some("ref-1"));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session.json");

        let store = FileSessionStore::open(&path);
        store.set_tokens("acc-1", "ref-1");
        store.set_role(Role::Staff);
        drop(store);

        let reopened = FileSessionStore::open(&path);
        assert_eq!(reopened.access_token().as_deref(), Some("acc-1"));
        assert_eq!(reopened.refresh_token().as_deref(), Some("ref-1"));
        assert_eq!(reopened.role(), Some(Role::Staff));
    }

    #[test]
    fn test_file_store_corrupt_file_starts_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileSessionStore::open(&path);
        assert!(store.access_token().is_none());
        assert!(store.role().is_none());
    }

    #[test]
    fn test_role_home_routes() {
        assert_eq!(Role::Staff.home_route(), "/dashboard");
        assert_eq!(Role::Customer.home_route(), "/customer");
    }
}
