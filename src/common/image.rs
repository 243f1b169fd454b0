use std::sync::Arc;

use chrono::{DateTime, Utc};
use image::{DynamicImage, GenericImageView};
use uuid::Uuid;

/// One camera sample handed to the detector.
///
/// The pixel buffer is shared, so cloning is cheap and a pipeline run never
/// copies image data.
#[derive(Clone)]
pub struct CameraImage {
    image: Arc<DynamicImage>,
    frame_id: Uuid,
    captured_at: DateTime<Utc>,
}

impl CameraImage {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image: Arc::new(image),
            frame_id: Uuid::new_v4(),
            captured_at: Utc::now(),
        }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.image.dimensions().1
    }

    pub fn frame_id(&self) -> Uuid {
        self.frame_id
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

impl std::fmt::Debug for CameraImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraImage")
            .field("frame_id", &self.frame_id)
            .field("width", &self.width())
            .field("height", &self.height())
            .field("captured_at", &self.captured_at)
            .finish()
    }
}
