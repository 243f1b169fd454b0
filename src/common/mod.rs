pub mod detection;
pub mod image;
pub mod rotation;

pub use detection::{BoundingBox, Detection};
pub use image::CameraImage;
pub use rotation::{rotation_compensation, ImageRotation};
