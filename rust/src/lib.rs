//! Native backends for the traits of `oclink-core`.

mod storage;

pub use storage::SledPreferences;
