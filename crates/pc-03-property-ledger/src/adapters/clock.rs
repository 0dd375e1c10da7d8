use crate::ports::outbound::TimeSource;
use shared_types::LogicalTime;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter clock: every `now()` returns the next tick.
///
/// Deterministic, so replicas replaying the same operations produce the
/// same timestamps and therefore the same event hashes.
#[derive(Debug, Default)]
pub struct LogicalClock {
    tick: AtomicU64,
}

impl LogicalClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting after `tick`.
    pub fn starting_at(tick: LogicalTime) -> Self {
        Self {
            tick: AtomicU64::new(tick),
        }
    }

    /// Skip ahead without issuing timestamps.
    pub fn advance(&self, ticks: LogicalTime) {
        self.tick.fetch_add(ticks, Ordering::SeqCst);
    }

    /// Last issued tick.
    pub fn current(&self) -> LogicalTime {
        self.tick.load(Ordering::SeqCst)
    }
}

impl TimeSource for LogicalClock {
    fn now(&self) -> LogicalTime {
        self.tick.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Wall-clock seconds since the Unix epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> LogicalTime {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn now(&self) -> LogicalTime {
        (**self).now()
    }
}
