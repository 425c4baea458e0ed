//! Volatility pipeline cycles against a real state directory

use crate::support::{candle, day, volatility_config, FakeSource, ReadOnlyStore, RecordingNotifier};
use market_alert::notify::HealthStatus;
use market_alert::pipeline::{Pipeline, VolatilityPipeline};
use market_alert::state::{
    load_record, JsonFileStore, StateStore, VolatilityNotificationState, VOLATILITY_KEY,
};
use market_alert::volatility::AlertLevel;
use rust_decimal_macros::dec;
use std::sync::Arc;

struct Harness {
    source: Arc<FakeSource>,
    notifier: Arc<RecordingNotifier>,
    store: Arc<JsonFileStore>,
    health: HealthStatus,
    pipeline: VolatilityPipeline,
    _dir: tempfile::TempDir,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path()));
    build(dir, store)
}

fn build(dir: tempfile::TempDir, store: Arc<JsonFileStore>) -> Harness {
    let source = Arc::new(FakeSource::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let health = HealthStatus::new();
    let pipeline = VolatilityPipeline::new(
        &volatility_config(),
        source.clone(),
        store.clone(),
        notifier.clone(),
        health.clone(),
    );
    Harness {
        source,
        notifier,
        store,
        health,
        pipeline,
        _dir: dir,
    }
}

fn stored(store: &JsonFileStore) -> Option<VolatilityNotificationState> {
    load_record(store, VOLATILITY_KEY).unwrap()
}

#[tokio::test]
async fn test_first_run_always_notifies() {
    let h = harness();
    h.source.set(vec![candle(day(4, 0), dec!(14)), candle(day(5, 0), dec!(15))]);

    let report = h.pipeline.run_cycle_at(day(5, 22)).await.unwrap();

    assert_eq!(report.delivered, 1);
    assert!(h.notifier.messages()[0].contains("returned to normal levels"));
    assert_eq!(
        stored(&h.store),
        Some(VolatilityNotificationState {
            level: AlertLevel::NoAlert,
            time: day(5, 0),
        })
    );
}

#[tokio::test]
async fn test_replayed_candle_does_not_renotify() {
    let h = harness();
    h.source.set(vec![candle(day(4, 0), dec!(20)), candle(day(5, 0), dec!(30))]);

    h.pipeline.run_cycle_at(day(5, 22)).await.unwrap();
    let report = h.pipeline.run_cycle_at(day(5, 23)).await.unwrap();

    assert_eq!(report.notified(), 0);
    assert_eq!(h.notifier.messages().len(), 1);
}

#[tokio::test]
async fn test_restart_keeps_watermark() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path()));
    let candles = vec![candle(day(4, 0), dec!(20)), candle(day(5, 0), dec!(30))];

    let first = build(dir, store.clone());
    first.source.set(candles.clone());
    first.pipeline.run_cycle_at(day(5, 22)).await.unwrap();
    assert_eq!(first.notifier.messages().len(), 1);

    // Same directory, fresh process
    let restarted = build(tempfile::tempdir().unwrap(), store);
    restarted.source.set(candles);
    let report = restarted.pipeline.run_cycle_at(day(5, 23)).await.unwrap();
    assert_eq!(report.notified(), 0);
    assert!(restarted.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_level_change_on_new_data_notifies_with_details() {
    let h = harness();
    h.source.set(vec![candle(day(4, 0), dec!(20)), candle(day(5, 0), dec!(20))]);
    h.pipeline.run_cycle_at(day(5, 22)).await.unwrap();

    h.source.set(vec![candle(day(5, 0), dec!(20)), candle(day(6, 0), dec!(26.4))]);
    let report = h.pipeline.run_cycle_at(day(6, 15)).await.unwrap();

    assert_eq!(report.delivered, 1);
    let message = &h.notifier.messages()[1];
    assert!(message.contains("High limit threshold (25%)"));
    assert!(message.contains("*26.4%*. Latest close: 20."));
    assert!(!message.contains("Market is closed"));
    assert_eq!(stored(&h.store).unwrap().level, AlertLevel::High);
}

#[tokio::test]
async fn test_same_day_escalation_sends_dual_alert() {
    let h = harness();
    h.source.set(vec![candle(day(4, 0), dec!(20)), candle(day(5, 15), dec!(27))]);
    h.pipeline.run_cycle_at(day(5, 15)).await.unwrap();

    h.source.set(vec![candle(day(5, 15), dec!(27)), candle(day(5, 18), dec!(38))]);
    let report = h.pipeline.run_cycle_at(day(5, 18)).await.unwrap();

    assert_eq!(report.delivered, 2);
    let messages = h.notifier.messages();
    assert!(messages[1].contains("Very high limit threshold (35%)"));
    assert!(messages[2].contains("changed twice the alert level within a day"));
}

#[tokio::test]
async fn test_escalation_next_day_has_no_dual_alert() {
    let h = harness();
    h.source.set(vec![candle(day(4, 0), dec!(20)), candle(day(5, 15), dec!(27))]);
    h.pipeline.run_cycle_at(day(5, 15)).await.unwrap();

    h.source.set(vec![candle(day(5, 15), dec!(27)), candle(day(6, 15), dec!(38))]);
    let report = h.pipeline.run_cycle_at(day(6, 15)).await.unwrap();

    assert_eq!(report.delivered, 1);
}

#[tokio::test]
async fn test_corrupt_state_behaves_like_first_run() {
    let h = harness();
    h.store.save(VOLATILITY_KEY, "\u{0}\u{1}not json").unwrap();
    h.source.set(vec![candle(day(4, 0), dec!(14)), candle(day(5, 0), dec!(30))]);

    let report = h.pipeline.run_cycle_at(day(5, 22)).await.unwrap();

    assert_eq!(report.delivered, 1);
    assert_eq!(stored(&h.store).unwrap().level, AlertLevel::High);
}

#[tokio::test]
async fn test_upstream_failure_leaves_state_untouched() {
    let h = harness();
    h.source.set(vec![candle(day(4, 0), dec!(14)), candle(day(5, 0), dec!(30))]);
    h.pipeline.run_cycle_at(day(5, 22)).await.unwrap();
    let before = h.store.load(VOLATILITY_KEY).unwrap();

    h.source.fail();
    assert!(h.pipeline.run_cycle_at(day(6, 22)).await.is_err());
    assert!(h.pipeline.run_cycle().await.is_none());

    assert_eq!(h.store.load(VOLATILITY_KEY).unwrap(), before);
    assert_eq!(h.notifier.messages().len(), 1);
}

#[tokio::test]
async fn test_empty_series_aborts() {
    let h = harness();
    h.source.set(vec![]);
    assert!(h.pipeline.run_cycle_at(day(5, 22)).await.is_err());
    assert!(stored(&h.store).is_none());
}

#[tokio::test]
async fn test_delivery_failure_degrades_health_and_still_saves() {
    let h = harness();
    h.notifier.set_reject(true);
    h.source.set(vec![candle(day(4, 0), dec!(14)), candle(day(5, 0), dec!(50))]);

    let report = h.pipeline.run_cycle_at(day(5, 22)).await.unwrap();

    assert_eq!(report.delivery_failures, 1);
    assert!(report.state_saved);
    assert!(!h.health.is_healthy());
    assert_eq!(stored(&h.store).unwrap().level, AlertLevel::ExtremeHigh);
}

#[tokio::test]
async fn test_overlapping_cycles_notify_once() {
    let h = harness();
    h.source.set(vec![candle(day(4, 0), dec!(20)), candle(day(5, 0), dec!(30))]);

    let (first, second) = tokio::join!(
        h.pipeline.run_cycle_at(day(5, 22)),
        h.pipeline.run_cycle_at(day(5, 22)),
    );

    assert_eq!(first.unwrap().notified() + second.unwrap().notified(), 1);
    assert_eq!(h.notifier.messages().len(), 1);
}

#[tokio::test]
async fn test_failed_state_write_still_delivers() {
    let source = Arc::new(FakeSource::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let health = HealthStatus::new();
    let pipeline = VolatilityPipeline::new(
        &volatility_config(),
        source.clone(),
        Arc::new(ReadOnlyStore),
        notifier.clone(),
        health.clone(),
    );
    source.set(vec![candle(day(4, 0), dec!(20)), candle(day(5, 0), dec!(30))]);

    let report = pipeline.run_cycle_at(day(5, 22)).await.unwrap();

    assert_eq!(report.delivered, 1);
    assert!(!report.state_saved);
    assert!(health.is_healthy());

    // Watermark never advanced, so the same reading goes out again
    let report = pipeline.run_cycle_at(day(5, 23)).await.unwrap();
    assert_eq!(report.delivered, 1);
    assert_eq!(notifier.messages().len(), 2);
}
