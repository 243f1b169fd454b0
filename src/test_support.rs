use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use image::{DynamicImage, ImageBuffer, Rgb};
use nalgebra::{Isometry3, Point2, Vector2};
use uuid::Uuid;

use crate::common::{CameraImage, Detection, ImageRotation};
use crate::detect::BarcodeDetector;
use crate::error::{FrameError, ScanError};
use crate::overlay::ModelProvider;
use crate::session::{CoordinateSpace, HitResult, TrackingFrame};

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub(crate) fn test_image(width: u32, height: u32) -> CameraImage {
    CameraImage::new(DynamicImage::ImageRgb8(
        ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(width, height, Rgb([0, 0, 0])),
    ))
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TestAnchor {
    pub id: Uuid,
    pub pose: Isometry3<f32>,
}

pub(crate) struct TestHit {
    pub pose: Isometry3<f32>,
}

impl HitResult for TestHit {
    type Anchor = TestAnchor;

    fn pose(&self) -> Isometry3<f32> {
        self.pose
    }

    fn create_anchor(&self) -> TestAnchor {
        TestAnchor {
            id: Uuid::new_v4(),
            pose: self.pose,
        }
    }
}

enum ImageSource {
    Ready(CameraImage),
    NotYetAvailable,
    Failed(String),
}

/// Scripted tracking frame: configurable image availability, a fixed list of
/// hit poses, an image-to-view translation, and a record of every hit-test
/// point.
pub(crate) struct TestFrame {
    image: ImageSource,
    hits: Vec<Isometry3<f32>>,
    view_offset: Vector2<f32>,
    hit_points: Arc<StdMutex<Vec<Point2<f32>>>>,
}

impl TestFrame {
    pub fn with_image(image: CameraImage) -> Self {
        Self {
            image: ImageSource::Ready(image),
            hits: vec![Isometry3::identity()],
            view_offset: Vector2::zeros(),
            hit_points: Arc::default(),
        }
    }

    pub fn not_yet_available() -> Self {
        Self {
            image: ImageSource::NotYetAvailable,
            hits: Vec::new(),
            view_offset: Vector2::zeros(),
            hit_points: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            image: ImageSource::Failed(message.to_string()),
            hits: Vec::new(),
            view_offset: Vector2::zeros(),
            hit_points: Arc::default(),
        }
    }

    pub fn no_hits(mut self) -> Self {
        self.hits.clear();
        self
    }

    pub fn with_view_offset(mut self, offset: Vector2<f32>) -> Self {
        self.view_offset = offset;
        self
    }

    /// Handle onto the recorded hit-test points, usable after the frame has
    /// been consumed by a run.
    pub fn hit_points(&self) -> Arc<StdMutex<Vec<Point2<f32>>>> {
        Arc::clone(&self.hit_points)
    }
}

impl TrackingFrame for TestFrame {
    type Hit = TestHit;

    fn acquire_camera_image(&self) -> Result<CameraImage, FrameError> {
        match &self.image {
            ImageSource::Ready(image) => Ok(image.clone()),
            ImageSource::NotYetAvailable => Err(FrameError::ImageNotYetAvailable),
            ImageSource::Failed(message) => Err(FrameError::ImageAcquisition(message.clone())),
        }
    }

    fn transform_point(
        &self,
        point: Point2<f32>,
        _from: CoordinateSpace,
        _to: CoordinateSpace,
    ) -> Point2<f32> {
        point + self.view_offset
    }

    fn hit_test(&self, point: Point2<f32>) -> Vec<TestHit> {
        self.hit_points.lock().unwrap().push(point);
        self.hits.iter().map(|pose| TestHit { pose: *pose }).collect()
    }
}

/// Detector returning a fixed script on every call, optionally delayed to
/// keep a run in flight.
pub(crate) struct ScriptedDetector {
    detections: Vec<Detection>,
    error: Option<String>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedDetector {
    pub fn always(detections: Vec<Detection>) -> Self {
        Self {
            detections,
            error: None,
            delay: None,
            calls: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            detections: Vec::new(),
            error: Some(message.to_string()),
            delay: None,
            calls: Arc::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl BarcodeDetector for ScriptedDetector {
    async fn detect(
        &self,
        _image: &CameraImage,
        _rotation: ImageRotation,
    ) -> Result<Vec<Detection>, ScanError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.error {
            Some(message) => Err(ScanError::detector(message.clone())),
            None => Ok(self.detections.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TestRenderable(pub &'static str);

pub(crate) struct ReadyModelProvider;

#[async_trait]
impl ModelProvider for ReadyModelProvider {
    type Renderable = TestRenderable;

    async fn construct_overlay_model(&self) -> TestRenderable {
        TestRenderable("overlay")
    }
}

/// Provider whose construction never completes, for exercising runs that
/// race ahead of the overlay model.
pub(crate) struct NeverReadyModelProvider;

#[async_trait]
impl ModelProvider for NeverReadyModelProvider {
    type Renderable = TestRenderable;

    async fn construct_overlay_model(&self) -> TestRenderable {
        futures::future::pending::<()>().await;
        TestRenderable("unreachable")
    }
}
