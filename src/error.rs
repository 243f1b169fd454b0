use thiserror::Error;

// Main scan pipeline error type

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Frame Error: {0}")]
    Frame(#[from] FrameError),
    #[error("Detector Error: {0}")]
    Detector(String),
    #[error("Configuration Error: {0}")]
    Configuration(String),
}

impl ScanError {
    pub fn detector(message: impl Into<String>) -> Self {
        ScanError::Detector(message.into())
    }
}

// Camera image acquisition error type
//
// `ImageNotYetAvailable` is an expected transient condition: the session has
// not delivered pixel data for this frame yet. The pipeline retries on the
// next frame instead of treating it as a failure.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("camera image not yet available")]
    ImageNotYetAvailable,
    #[error("failed to acquire camera image: {0}")]
    ImageAcquisition(String),
}
