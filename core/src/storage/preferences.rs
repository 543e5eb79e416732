use std::fmt::Debug;
use crate::storage::StorageResult;

/// Preference key holding the name of the account the user selected last.
pub const SELECTED_ACCOUNT: &str = "select_oc_account";

/// Trait defining the interface for persisted string preferences.
///
/// This trait provides methods for basic preference operations:
/// - `get_string`: Retrieve a value by key
/// - `put_string`: Store a key-value pair
/// - `remove`: Remove a key-value pair
///
/// Implementations of this trait can use different storage backends depending on the environment.
pub trait PreferencesProvider: Send + Sync + Debug {
    /// Retrieves a value by key.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to retrieve
    ///
    /// # Returns
    ///
    /// * `StorageResult<Option<String>>` - The value if present, `None` if the key was never
    ///   written,
    ///   or an error if retrieval fails
    fn get_string(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores a key-value pair.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to store
    /// * `value` - The value to store
    ///
    /// # Returns
    ///
    /// * `StorageResult<()>` - Success or an error if storage fails
    fn put_string(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes a key-value pair.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to remove
    ///
    /// # Returns
    ///
    /// * `StorageResult<()>` - Success or an error if removal fails
    fn remove(&self, key: &str) -> StorageResult<()>;
}
