//! Alert message composition (Telegram Markdown)

use crate::trend::{Cross, CrossType};
use crate::volatility::{AlertLevel, DualAlert, Observation, ThresholdConfig};
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

const HEADER: &str = "❗*Stock Alert*❗";

/// How a watched series is named in messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesLabel {
    /// Short ticker, e.g. `^VIX`
    pub ticker: String,
    /// Long name, e.g. `CBOE Volatility Index (^VIX)`
    pub display_name: String,
    pub chart_url: String,
}

impl SeriesLabel {
    pub fn new(symbol: &str, display_name: &str, chart_url: &str) -> Self {
        Self {
            ticker: format!("^{}", symbol),
            display_name: display_name.to_string(),
            chart_url: chart_url.to_string(),
        }
    }

    fn chart_link(&self) -> String {
        format!("[Open {} Chart]({})", self.ticker, self.chart_url)
    }
}

/// Fixed-point rendering, rounding half away from zero
pub fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// Shortest plain rendering, `26.40000` -> `26.4`
fn plain(value: Decimal) -> Decimal {
    value.normalize()
}

fn format_time(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn format_date(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d").to_string()
}

/// Human-readable description of an alert level and its threshold
pub fn level_description(level: AlertLevel, thresholds: &ThresholdConfig, ticker: &str) -> String {
    match level {
        AlertLevel::NoAlert => format!(
            "{} returned to normal levels (>= {}% and < {}%). No alert.",
            ticker,
            plain(thresholds.low),
            plain(thresholds.high)
        ),
        AlertLevel::ExtremeLow => format!(
            "Extreme low limit threshold ({}%) of {} has been reached.",
            plain(thresholds.extreme_low), ticker
        ),
        AlertLevel::Low => format!(
            "Low limit threshold ({}%) of {} has been reached.",
            plain(thresholds.low), ticker
        ),
        AlertLevel::High => format!(
            "High limit threshold ({}%) of {} has been reached.",
            plain(thresholds.high), ticker
        ),
        AlertLevel::VeryHigh => format!(
            "Very high limit threshold ({}%) of {} has been reached.",
            plain(thresholds.very_high), ticker
        ),
        AlertLevel::ExtremeHigh => format!(
            "Extreme high limit threshold ({}%) of {} has been reached.",
            plain(thresholds.extreme_high), ticker
        ),
    }
}

/// Level change message; alert levels carry the reading details and a chart link
pub fn volatility_message(
    label: &SeriesLabel,
    level: AlertLevel,
    observation: &Observation,
    thresholds: &ThresholdConfig,
) -> String {
    let mut message = format!(
        "{}\n{} ticker changed alert level: {}",
        HEADER,
        label.ticker,
        level_description(level, thresholds, &label.ticker)
    );

    if level.is_alert() {
        message.push_str(&format!(
            "\n\n{}: *{}%*. Latest close: {}. Latest date: {}.",
            label.display_name,
            plain(observation.value),
            plain(observation.latest_close),
            format_time(observation.timestamp)
        ));
        if observation.is_market_closed {
            message.push_str(" _Market is closed now._");
        }
        message.push_str("\n\n");
        message.push_str(&label.chart_link());
    }

    message
}

/// Second alert when two bands were hit within one day
pub fn dual_alert_message(label: &SeriesLabel, dual: &DualAlert, thresholds: &ThresholdConfig) -> String {
    format!(
        "{}\n{} ticker changed twice the alert level within a day: {}!\n{}: *{}%*",
        HEADER,
        label.ticker,
        level_description(dual.level, thresholds, &label.ticker),
        label.display_name,
        plain(dual.value)
    )
}

/// Trend reversal message for one cross
pub fn cross_message(label: &SeriesLabel, cross: &Cross) -> String {
    let direction = match cross.cross_type {
        CrossType::Bearish => "towards a bearish trend 🌧.",
        CrossType::Bullish => "towards a bullish trend 🔆!",
    };

    format!(
        "{}\n{} changed in market trend: {}\n\nHistogram: {}% (before: {}%). High: {}. Low: {}. Close: {}. MACD cross date: {}.\n\n{}",
        HEADER,
        label.display_name,
        direction,
        fixed(cross.histogram, 4),
        fixed(cross.prev_histogram, 4),
        fixed(cross.high, 1),
        fixed(cross.low, 1),
        fixed(cross.close, 1),
        format_date(cross.time),
        label.chart_link()
    )
}
