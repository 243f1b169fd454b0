pub mod guard;
pub mod ledger;
pub mod placement;
pub mod scan_area;
pub mod throttle;

pub use guard::{ScanGuard, ScanPermit};
pub use ledger::AnchorLedger;
pub use placement::PlacementOutcome;
pub use scan_area::{ScanAreaFilter, ScanCandidate};
pub use throttle::ScanThrottle;
