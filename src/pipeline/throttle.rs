use std::time::{Duration, Instant};

/// Gates how often a frame may be handed to detection.
///
/// The timestamp advances exactly when a scan is authorized, not when it
/// completes, so spacing is measured dispatch-start to dispatch-start.
#[derive(Debug)]
pub struct ScanThrottle {
    interval: Duration,
    last_scan: Option<Instant>,
}

impl ScanThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_scan: None,
        }
    }

    /// Returns true and records `now` if a new scan may start. Two
    /// authorizations are never closer together than the interval; exactly
    /// the interval apart is allowed.
    pub fn try_authorize(&mut self, now: Instant) -> bool {
        let authorized = match self.last_scan {
            None => true,
            Some(last) => now.duration_since(last) >= self.interval,
        };
        if authorized {
            self.last_scan = Some(now);
        }
        authorized
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
