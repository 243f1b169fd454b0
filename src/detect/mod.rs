use async_trait::async_trait;

use crate::common::{CameraImage, Detection, ImageRotation};
use crate::error::ScanError;

/// Inference backend that decodes machine-readable codes out of one camera
/// image.
///
/// Implementations wrap whatever engine actually runs the model; the pipeline
/// only awaits the result. Detection order is preserved downstream, so
/// backends should report their best candidate first.
#[async_trait]
pub trait BarcodeDetector: Send + Sync + 'static {
    async fn detect(
        &self,
        image: &CameraImage,
        rotation: ImageRotation,
    ) -> Result<Vec<Detection>, ScanError>;
}
