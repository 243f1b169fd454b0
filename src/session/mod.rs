//! Contracts against the camera/tracking session. The session owns frame
//! delivery, hit-testing and coordinate projection; this crate only consumes
//! them per run and never retains a frame past the run that produced it.

use nalgebra::{Isometry3, Point2};

use crate::common::CameraImage;
use crate::error::FrameError;

/// Coordinate spaces understood by the frame's 2-D transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSpace {
    /// Pixels of the camera image, as reported by the detector.
    ImagePixels,
    /// The view space hit-testing operates in.
    View,
}

/// One candidate surface pose returned by a hit test.
pub trait HitResult: Send {
    type Anchor: Send + 'static;

    /// Pose of the struck surface in world space.
    fn pose(&self) -> Isometry3<f32>;

    /// Creates a tracked anchor at the hit pose. Sessions that can fail to
    /// anchor a hit should omit it from the hit-test result instead.
    fn create_anchor(&self) -> Self::Anchor;
}

/// One camera/tracking sample. Valid for the duration of a single pipeline
/// run.
pub trait TrackingFrame: Send + 'static {
    type Hit: HitResult;

    /// Fallible image acquisition. `FrameError::ImageNotYetAvailable` is an
    /// expected transient condition, any other error is a real failure.
    fn acquire_camera_image(&self) -> Result<CameraImage, FrameError>;

    /// Maps a 2-D point between coordinate spaces. Projection math lives in
    /// the session, not here.
    fn transform_point(
        &self,
        point: Point2<f32>,
        from: CoordinateSpace,
        to: CoordinateSpace,
    ) -> Point2<f32>;

    /// Queries tracked geometry at a view-space point, nearest hit first.
    fn hit_test(&self, point: Point2<f32>) -> Vec<Self::Hit>;
}

/// Anchor handle type produced by a frame's hit results.
pub type FrameAnchor<F> = <<F as TrackingFrame>::Hit as HitResult>::Anchor;
