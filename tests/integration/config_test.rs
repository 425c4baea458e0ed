//! Configuration loading end to end

use market_alert::config::{Config, ConfigError, NotifierMode, EXAMPLE_CONFIG};

#[test]
fn test_example_config_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, EXAMPLE_CONFIG).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.notifier.mode, NotifierMode::Log);
    assert_eq!(config.volatility.params.symbol, "VIX");
    assert_eq!(config.trend.params.interval, "1week");
    assert!(config.validate().is_ok());
}

#[test]
fn test_misordered_thresholds_are_fatal() {
    let broken = EXAMPLE_CONFIG.replace("very_high = 35", "very_high = 50");
    let config: Config = toml::from_str(&broken).unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::ThresholdOrder(_))));
}

fn write_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_malformed_threshold_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, &EXAMPLE_CONFIG.replace("high = 25", "high = \"25%\""));

    assert!(Config::load(&path).is_err());
    assert!(Config::load_or_example(&path).is_err());
}

#[test]
fn test_existing_file_is_not_replaced_by_example() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, &EXAMPLE_CONFIG.replace("extreme_high = 45", "extreme_high = 60"));

    let (config, from_example) = Config::load_or_example(&path).unwrap();
    assert!(!from_example);
    assert_eq!(config.volatility.alerts.extreme_high, rust_decimal::Decimal::from(60));
}

#[test]
fn test_missing_file_uses_example() {
    let dir = tempfile::tempdir().unwrap();
    let (config, from_example) = Config::load_or_example(dir.path().join("absent.toml")).unwrap();
    assert!(from_example);
    assert!(config.validate().is_ok());
}
