use super::*;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferencesProvider for MemoryPreferences {
    fn get_string(&self, key: &str) -> StorageResult<Option<String>> {
        let values = self.values.read().map_err(|e| {
            StorageError::OperationFailed(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(values.get(key).cloned())
    }

    fn put_string(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut values = self.values.write().map_err(|e| {
            StorageError::OperationFailed(format!("Failed to acquire write lock: {}", e))
        })?;

        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut values = self.values.write().map_err(|e| {
            StorageError::OperationFailed(format!("Failed to acquire write lock: {}", e))
        })?;

        values.remove(key);
        Ok(())
    }
}
