use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Window {
    started_at: Instant,
    suppressed: u64,
}

static WINDOWS: OnceLock<Mutex<HashMap<&'static str, Window>>> = OnceLock::new();

/// Returns `Some(suppressed_count)` when a log for `key` should be emitted,
/// otherwise `None` and the event is counted as suppressed for the active window.
pub fn should_emit(key: &'static str, interval: Duration) -> Option<u64> {
    let mut windows = WINDOWS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let now = Instant::now();

    let mut fresh = false;
    let window = windows.entry(key).or_insert_with(|| {
        fresh = true;
        Window {
            started_at: now,
            suppressed: 0,
        }
    });
    if fresh {
        return Some(0);
    }
    if now.duration_since(window.started_at) >= interval {
        let suppressed = window.suppressed;
        window.started_at = now;
        window.suppressed = 0;
        Some(suppressed)
    } else {
        window.suppressed += 1;
        None
    }
}
