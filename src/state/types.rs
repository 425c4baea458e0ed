//! Persisted watermark records

use crate::volatility::AlertLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Last classification of the volatility pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolatilityNotificationState {
    pub level: AlertLevel,
    pub time: DateTime<Utc>,
}

/// Time of the most recently notified trend cross
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendNotificationState {
    pub last_notified_time: DateTime<Utc>,
}

/// State store failures
#[derive(Debug, Error)]
pub enum StateError {
    /// Storage could not be read
    #[error("failed to read state '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },
    /// Stored contents are not a valid record
    #[error("corrupt state '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// Record could not be serialized
    #[error("failed to encode state '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// Storage could not be written
    #[error("failed to write state '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}
