//! # Preference Storage for the Rust SDK
//!
//! Persists the preferences read by the session layer, such as the selected
//! account, in a sled database.

use std::path::Path;

use log::debug;
use oclink_core::storage::{PreferencesProvider, StorageError, StorageResult};

/// A preference store using the sled database.
#[derive(Debug)]
pub struct SledPreferences {
    db: sled::Db,
}

impl SledPreferences {
    /// Opens the preference database at the given path, creating it when missing.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the database directory
    ///
    /// # Returns
    ///
    /// * `StorageResult<Self>` - The opened store, or an error if the database cannot be opened
    pub fn new<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let db = sled::open(path).map_err(|e| {
            StorageError::StorageUnavailable(format!("Failed to open sled database: {}", e))
        })?;
        Ok(Self { db })
    }

    fn flush(&self) -> StorageResult<()> {
        self.db.flush().map_err(|e| {
            StorageError::OperationFailed(format!("Failed to flush database: {}", e))
        })?;
        Ok(())
    }
}

impl PreferencesProvider for SledPreferences {
    fn get_string(&self, key: &str) -> StorageResult<Option<String>> {
        let Some(value) = self
            .db
            .get(key.as_bytes())
            .map_err(|e| StorageError::OperationFailed(format!("Failed to get value: {}", e)))?
        else {
            return Ok(None);
        };

        String::from_utf8(value.to_vec())
            .map(Some)
            .map_err(|_| StorageError::InvalidValue(key.to_string()))
    }

    fn put_string(&self, key: &str, value: &str) -> StorageResult<()> {
        self.db
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| StorageError::OperationFailed(format!("Failed to put value: {}", e)))?;
        debug!("Stored preference {}", key);
        self.flush()
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.db
            .remove(key.as_bytes())
            .map_err(|e| StorageError::OperationFailed(format!("Failed to remove value: {}", e)))?;
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oclink_core::storage::SELECTED_ACCOUNT;
    use tempfile::tempdir;

    #[test]
    fn test_sled_preferences_basic_operations() {
        // Create a temporary directory for the database
        let dir = tempdir().unwrap();
        let preferences = SledPreferences::new(dir.path()).unwrap();

        // Missing key
        assert_eq!(preferences.get_string(SELECTED_ACCOUNT).unwrap(), None);

        // Put and get
        preferences.put_string(SELECTED_ACCOUNT, "admin@cloud.example.com").unwrap();
        assert_eq!(
            preferences.get_string(SELECTED_ACCOUNT).unwrap().as_deref(),
            Some("admin@cloud.example.com")
        );

        // Remove
        preferences.remove(SELECTED_ACCOUNT).unwrap();
        assert_eq!(preferences.get_string(SELECTED_ACCOUNT).unwrap(), None);
    }

    #[test]
    fn test_sled_preferences_survive_reopen() {
        let dir = tempdir().unwrap();
        {
            let preferences = SledPreferences::new(dir.path()).unwrap();
            preferences.put_string("theme", "dark").unwrap();
        }

        let reopened = SledPreferences::new(dir.path()).unwrap();

        assert_eq!(reopened.get_string("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_sled_preferences_invalid_utf8_value() {
        let dir = tempdir().unwrap();
        let preferences = SledPreferences::new(dir.path()).unwrap();
        preferences.db.insert("broken", &[0xff, 0xfe][..]).unwrap();

        match preferences.get_string("broken") {
            Err(StorageError::InvalidValue(key)) => assert_eq!(key, "broken"),
            other => panic!("Expected InvalidValue error, got {:?}", other),
        }
    }
}
