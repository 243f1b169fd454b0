use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Admits at most one pipeline run at a time. Frames arriving while a run is
/// active are dropped, never queued.
#[derive(Debug, Default)]
pub struct ScanGuard {
    active: Arc<AtomicBool>,
}

impl ScanGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the guard. Returns `None` while a run is in flight. The permit
    /// releases the guard when dropped, so every exit path of a run releases
    /// it, including panics and aborts.
    pub fn try_start(&self) -> Option<ScanPermit> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| ScanPermit {
                active: Arc::clone(&self.active),
            })
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Witness of an in-flight run.
#[derive(Debug)]
pub struct ScanPermit {
    active: Arc<AtomicBool>,
}

impl Drop for ScanPermit {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}
