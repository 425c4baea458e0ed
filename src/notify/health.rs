//! Process health flag

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared degraded-health flag, set once any delivery fails
#[derive(Debug, Clone, Default)]
pub struct HealthStatus {
    degraded: Arc<AtomicBool>,
}

impl HealthStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_degraded(&self) {
        self.degraded.store(true, Ordering::Relaxed);
    }

    pub fn is_healthy(&self) -> bool {
        !self.degraded.load(Ordering::Relaxed)
    }
}
