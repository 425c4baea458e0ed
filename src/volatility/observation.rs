//! Building a volatility reading from fetched candles

use super::Observation;
use crate::config::MarketHours;
use crate::feed::Candle;
use chrono::{DateTime, Datelike, Utc, Weekday};

/// Turn an ascending candle series into the current reading
///
/// Returns `None` for an empty series. While the market is open the latest
/// candle is still forming, so the latest close comes from its predecessor.
pub fn observe(candles: &[Candle], now: DateTime<Utc>, hours: &MarketHours) -> Option<Observation> {
    let latest = candles.last()?;
    let is_market_closed = is_market_closed(now, hours);

    let completed = if is_market_closed || candles.len() < 2 {
        latest
    } else {
        &candles[candles.len() - 2]
    };

    Some(Observation {
        value: latest.close,
        latest_close: completed.close,
        timestamp: latest.time,
        is_market_closed,
    })
}

/// Weekend or outside the regular session
pub fn is_market_closed(now: DateTime<Utc>, hours: &MarketHours) -> bool {
    if matches!(now.weekday(), Weekday::Sat | Weekday::Sun) {
        return true;
    }
    let time = now.time();
    time < hours.open || time >= hours.close
}
