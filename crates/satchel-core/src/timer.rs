//! Checkpoint timing for long-running steps

use std::time::{Duration, Instant};

use tracing::info;

/// Logs elapsed time at named checkpoints, and once more when dropped.
///
/// ```
/// use satchel_core::PerformanceTimer;
///
/// let mut timer = PerformanceTimer::new("load");
/// timer.checkpoint("read file");
/// timer.checkpoint("parsed");
/// ```
#[derive(Debug)]
pub struct PerformanceTimer {
    name: String,
    started: Instant,
    last: Instant,
    checkpoints: usize,
}

impl PerformanceTimer {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Instant::now();
        Self {
            name: name.into(),
            started: now,
            last: now,
            checkpoints: 0,
        }
    }

    /// Log the time since start and since the previous checkpoint
    pub fn checkpoint(&mut self, label: &str) -> Duration {
        let now = Instant::now();
        let since_last = now.duration_since(self.last);
        self.last = now;
        self.checkpoints += 1;

        info!(
            timer = %self.name,
            total_ms = self.elapsed().as_millis() as u64,
            since_last_ms = since_last.as_millis() as u64,
            "{label}"
        );
        since_last
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn checkpoints(&self) -> usize {
        self.checkpoints
    }
}

impl Drop for PerformanceTimer {
    fn drop(&mut self) {
        self.checkpoint("Finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoints_are_monotonic() {
        let mut timer = PerformanceTimer::new("test");
        std::thread::sleep(Duration::from_millis(5));
        let first = timer.checkpoint("one");
        let second = timer.checkpoint("two");

        assert!(first >= Duration::from_millis(5));
        assert!(timer.elapsed() >= first + second);
        assert_eq!(timer.checkpoints(), 2);
    }
}
