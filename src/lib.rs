//! Scan-and-anchor coordination for live AR feeds: watches a frame stream
//! for machine-readable codes and pins an overlay to the physical surface
//! each newly found code sits on.

pub mod common;
pub mod config;
pub mod coordinator;
pub mod detect;
pub mod error;
mod events;
pub mod overlay;
pub mod pipeline;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use common::{rotation_compensation, BoundingBox, CameraImage, Detection, ImageRotation};
pub use config::ScanConfig;
pub use coordinator::{CoordinatorNode, ScanCoordinator, ScanCoordinatorBuilder};
pub use detect::BarcodeDetector;
pub use error::{FrameError, ScanError};
pub use overlay::{AnchorNode, ModelProvider, OffsetNode, RenderableLeaf};
pub use pipeline::PlacementOutcome;
pub use session::{CoordinateSpace, FrameAnchor, HitResult, TrackingFrame};
