use std::fs;
use std::path::PathBuf;
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::config::constants::{CONFIG_DIR_NAME, SESSION_DIR_NAME};
use crate::errors::{SecureAiError, SecureAiResult};

/// Session-scoped key/value store handing state between lifecycle steps.
///
/// One JSON file per key under the session directory. Reads never fail:
/// a missing or corrupt entry behaves as absent, and callers treat absence
/// as "no prior scan". Writes go through serde, so only JSON-serializable
/// values are accepted.
#[derive(Debug, Clone)]
pub struct SessionStateStore {
    dir: PathBuf,
}

impl SessionStateStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn open_default() -> SecureAiResult<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            SecureAiError::system_error("session store", "Could not determine home directory")
        })?;
        Ok(Self::new(home.join(CONFIG_DIR_NAME).join(SESSION_DIR_NAME)))
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> SecureAiResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            SecureAiError::session_error(key, "set", &e.to_string())
        })?;

        let serialized = serde_json::to_string_pretty(value).map_err(|e| {
            SecureAiError::session_error(key, "set", &e.to_string())
        })?;

        fs::write(self.entry_path(key), serialized).map_err(|e| {
            SecureAiError::session_error(key, "set", &e.to_string())
        })
    }

    /// Returns the stored value, or `None` when the key is missing or its
    /// content cannot be deserialized. Corrupt content is logged and then
    /// treated exactly like an absent key.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.entry_path(key);
        let content = fs::read_to_string(&path).ok()?;

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("⚠️ Discarding corrupt session entry '{}': {}", key, e);
                None
            }
        }
    }

    pub fn remove(&self, key: &str) -> SecureAiResult<()> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                SecureAiError::session_error(key, "remove", &e.to_string())
            })?;
        }
        Ok(())
    }

    /// Tears the whole session down. Safe to call when no session exists.
    pub fn clear(&self) -> SecureAiResult<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir).map_err(|e| {
                SecureAiError::session_error("*", "clear", &e.to_string())
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, SessionStateStore) {
        let dir = TempDir::new().unwrap();
        let store = SessionStateStore::new(dir.path().join("session"));
        (dir, store)
    }

    #[test]
    fn set_then_get_round_trips() {
        let (_dir, store) = store();
        store.set("repositoryUrl", &"https://github.com/acme/app".to_string()).unwrap();

        let url: Option<String> = store.get("repositoryUrl");
        assert_eq!(url.as_deref(), Some("https://github.com/acme/app"));
    }

    #[test]
    fn missing_key_behaves_as_absent() {
        let (_dir, store) = store();
        let value: Option<String> = store.get("repositoryUrl");
        assert!(value.is_none());
    }

    #[test]
    fn corrupt_entry_behaves_as_absent() {
        let (_dir, store) = store();
        store.set("vulnerabilities", &serde_json::json!({"issues": []})).unwrap();
        std::fs::write(store.entry_path("vulnerabilities"), "{not json").unwrap();

        let value: Option<serde_json::Value> = store.get("vulnerabilities");
        assert!(value.is_none());
    }

    #[test]
    fn clear_removes_all_keys() {
        let (_dir, store) = store();
        store.set("repositoryUrl", &"https://github.com/acme/app").unwrap();
        store.set("malware", &Vec::<serde_json::Value>::new()).unwrap();

        store.clear().unwrap();

        assert!(store.get::<String>("repositoryUrl").is_none());
        assert!(store.get::<Vec<serde_json::Value>>("malware").is_none());
    }

    #[test]
    fn clear_on_empty_store_is_ok() {
        let (_dir, store) = store();
        assert!(store.clear().is_ok());
    }

    #[test]
    fn remove_deletes_single_key() {
        let (_dir, store) = store();
        store.set("repositoryUrl", &"https://github.com/acme/app").unwrap();
        store.set("malware", &Vec::<serde_json::Value>::new()).unwrap();

        store.remove("repositoryUrl").unwrap();

        assert!(store.get::<String>("repositoryUrl").is_none());
        assert!(store.get::<Vec<serde_json::Value>>("malware").is_some());
    }
}
