//! Notification deduplication
//!
//! Decides whether a new classification or cross is worth a message by
//! comparing it against the persisted watermark.

use crate::state::{TrendNotificationState, VolatilityNotificationState};
use crate::trend::Cross;
use crate::volatility::AlertLevel;
use chrono::{DateTime, Utc};

/// Volatility gate: notify on first run, or on a level change carried by newer data
///
/// The strictly-greater timestamp check keeps a replayed candle from
/// re-notifying even if its level differs from the stored one.
pub fn should_notify_level(
    level: AlertLevel,
    timestamp: DateTime<Utc>,
    state: Option<&VolatilityNotificationState>,
) -> bool {
    match state {
        None => true,
        Some(state) => level != state.level && timestamp > state.time,
    }
}

/// Trend gate: notify on first run, or for crosses newer than the watermark
pub fn should_notify_cross(cross: &Cross, state: Option<&TrendNotificationState>) -> bool {
    match state {
        None => true,
        Some(state) => cross.time > state.last_notified_time,
    }
}

/// Volatility watermark to persist after a cycle, notified or not
///
/// The stored time never moves backwards: a reading older than the
/// watermark keeps the previous time.
pub fn next_volatility_state(
    level: AlertLevel,
    timestamp: DateTime<Utc>,
    state: Option<&VolatilityNotificationState>,
) -> VolatilityNotificationState {
    let time = match state {
        Some(state) if state.time > timestamp => state.time,
        _ => timestamp,
    };
    VolatilityNotificationState { level, time }
}

/// Crosses that pass the trend gate, each paired with the watermark it advances to
///
/// Crosses are gated in order against a watermark that moves after every
/// accepted cross, so each accepted time is strictly newer than the last.
pub fn gate_crosses(
    crosses: Vec<Cross>,
    state: Option<&TrendNotificationState>,
) -> Vec<(Cross, TrendNotificationState)> {
    let mut watermark = state.copied();
    let mut accepted = Vec::new();

    for cross in crosses {
        if should_notify_cross(&cross, watermark.as_ref()) {
            let next = TrendNotificationState {
                last_notified_time: cross.time,
            };
            watermark = Some(next);
            accepted.push((cross, next));
        }
    }

    accepted
}
