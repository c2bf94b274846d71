//! Process-wide slow request threshold.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

static SLOW_REQUEST_THRESHOLD_MS: AtomicU64 = AtomicU64::new(1_000);

pub(crate) fn set_slow_request_threshold(threshold: Duration) {
    let millis = u64::try_from(threshold.as_millis()).unwrap_or(u64::MAX);

    SLOW_REQUEST_THRESHOLD_MS.store(millis, Ordering::Relaxed);
}

pub(super) fn slow_request_threshold() -> Duration {
    Duration::from_millis(SLOW_REQUEST_THRESHOLD_MS.load(Ordering::Relaxed))
}
