//! Watermark persistence
//!
//! Keeps the last notified level/time per pipeline so restarts do not
//! re-send alerts that already went out.

mod file;
mod memory;
mod types;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use types::{StateError, TrendNotificationState, VolatilityNotificationState};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage key of the volatility pipeline watermark
pub const VOLATILITY_KEY: &str = "volatility";
/// Storage key of the trend pipeline watermark
pub const TREND_KEY: &str = "trend";

/// Durable keyed storage for small records
pub trait StateStore: Send + Sync {
    /// Raw contents stored under `key`, `None` if nothing was stored yet
    fn load(&self, key: &str) -> Result<Option<String>, StateError>;
    /// Replace the contents stored under `key`
    fn save(&self, key: &str, contents: &str) -> Result<(), StateError>;
}

/// Load and decode a JSON record
pub fn load_record<T: DeserializeOwned>(
    store: &dyn StateStore,
    key: &str,
) -> Result<Option<T>, StateError> {
    match store.load(key)? {
        Some(contents) => serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StateError::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Encode and store a JSON record
pub fn save_record<T: Serialize>(
    store: &dyn StateStore,
    key: &str,
    record: &T,
) -> Result<(), StateError> {
    let contents = serde_json::to_string(record).map_err(|source| StateError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.save(key, &contents)
}
