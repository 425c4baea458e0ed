//! Integration tests driving whole pipeline cycles

mod config_test;
mod trend_test;
mod volatility_test;
