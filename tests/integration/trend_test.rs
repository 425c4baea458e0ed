//! Trend pipeline cycles against a real state directory

use crate::support::{swing_series, trend_config, FakeSource, ReadOnlyStore, RecordingNotifier};
use market_alert::indicator::PpoHistogram;
use market_alert::notify::HealthStatus;
use market_alert::pipeline::{Pipeline, TrendPipeline};
use market_alert::state::{load_record, JsonFileStore, StateStore, TrendNotificationState, TREND_KEY};
use market_alert::trend::{detect_crosses, CrossType};
use std::sync::Arc;

struct Harness {
    source: Arc<FakeSource>,
    notifier: Arc<RecordingNotifier>,
    store: Arc<JsonFileStore>,
    pipeline: TrendPipeline,
    _dir: tempfile::TempDir,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path()));
    let source = Arc::new(FakeSource::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let pipeline = TrendPipeline::new(
        &trend_config(),
        source.clone(),
        store.clone(),
        notifier.clone(),
        HealthStatus::new(),
    );
    Harness {
        source,
        notifier,
        store,
        pipeline,
        _dir: dir,
    }
}

fn expected_crosses(weeks: usize) -> Vec<market_alert::trend::Cross> {
    let config = trend_config();
    let producer = PpoHistogram::new(config.ppo, config.warmup_period, config.data_period);
    detect_crosses(&producer.samples(&swing_series(weeks)).unwrap())
}

fn stored(store: &JsonFileStore) -> Option<TrendNotificationState> {
    load_record(store, TREND_KEY).unwrap()
}

#[tokio::test]
async fn test_first_run_notifies_each_cross() {
    let h = harness();
    let expected = expected_crosses(30);
    assert!(!expected.is_empty());
    assert_eq!(expected[0].cross_type, CrossType::Bullish);

    h.source.set(swing_series(30));
    let report = h.pipeline.try_cycle().await.unwrap();

    assert_eq!(report.delivered, expected.len());
    assert!(h.notifier.messages()[0].contains("towards a bullish trend"));
    assert_eq!(
        stored(&h.store).unwrap().last_notified_time,
        expected.last().unwrap().time
    );
}

#[tokio::test]
async fn test_same_batch_twice_is_silent() {
    let h = harness();
    h.source.set(swing_series(30));
    h.pipeline.try_cycle().await.unwrap();
    let sent = h.notifier.messages().len();

    let report = h.pipeline.try_cycle().await.unwrap();
    assert_eq!(report.notified(), 0);
    assert_eq!(h.notifier.messages().len(), sent);
}

#[tokio::test]
async fn test_only_new_crosses_after_more_data() {
    let h = harness();
    h.source.set(swing_series(15));
    h.pipeline.try_cycle().await.unwrap();
    let first = h.notifier.messages().len();
    assert_eq!(first, expected_crosses(15).len());

    h.source.set(swing_series(30));
    h.pipeline.try_cycle().await.unwrap();

    let watermark = expected_crosses(15).last().map(|c| c.time);
    let new = expected_crosses(30)
        .into_iter()
        .filter(|c| watermark.map_or(true, |w| c.time > w))
        .count();
    assert_eq!(h.notifier.messages().len(), first + new);
}

#[tokio::test]
async fn test_flat_market_has_no_phantom_crosses() {
    let h = harness();
    h.source.set(swing_series(10));

    let report = h.pipeline.try_cycle().await.unwrap();

    assert_eq!(report.notified(), 0);
    assert!(stored(&h.store).is_none());
}

#[tokio::test]
async fn test_too_few_candles_aborts() {
    let h = harness();
    h.source.set(swing_series(3));
    assert!(h.pipeline.try_cycle().await.is_err());
    assert!(h.pipeline.run_cycle().await.is_none());
}

#[tokio::test]
async fn test_corrupt_state_treated_as_absent() {
    let h = harness();
    h.store.save(TREND_KEY, "[1, 2").unwrap();
    h.source.set(swing_series(30));

    let report = h.pipeline.try_cycle().await.unwrap();
    assert_eq!(report.delivered, expected_crosses(30).len());
}

#[tokio::test]
async fn test_failed_state_write_still_delivers_every_cross() {
    let source = Arc::new(FakeSource::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let pipeline = TrendPipeline::new(
        &trend_config(),
        source.clone(),
        Arc::new(ReadOnlyStore),
        notifier.clone(),
        HealthStatus::new(),
    );
    let expected = expected_crosses(30);
    assert!(!expected.is_empty());
    source.set(swing_series(30));

    let report = pipeline.try_cycle().await.unwrap();

    assert_eq!(report.delivered, expected.len());
    assert_eq!(report.delivery_failures, 0);
    assert!(!report.state_saved);
    assert_eq!(notifier.messages().len(), expected.len());
}
