//! Key-value preferences read by the session layer.

mod error;
mod preferences;
mod memory_preferences;

pub use error::StorageError;
pub use preferences::{PreferencesProvider, SELECTED_ACCOUNT};
pub use memory_preferences::MemoryPreferences;

pub type StorageResult<T> = Result<T, StorageError>;
