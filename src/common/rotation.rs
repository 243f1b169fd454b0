/// Quarter-turn rotation applied to a camera image before detection, derived
/// from device and sensor orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageRotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl ImageRotation {
    pub fn degrees(self) -> u32 {
        match self {
            ImageRotation::Deg0 => 0,
            ImageRotation::Deg90 => 90,
            ImageRotation::Deg180 => 180,
            ImageRotation::Deg270 => 270,
        }
    }

    /// Accepts any multiple of 90, normalized modulo 360.
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees % 360 {
            0 => Some(ImageRotation::Deg0),
            90 => Some(ImageRotation::Deg90),
            180 => Some(ImageRotation::Deg180),
            270 => Some(ImageRotation::Deg270),
            _ => None,
        }
    }
}

/// Angle by which an image must be rotated to compensate for the device's
/// current rotation, given the camera sensor's mounting orientation.
pub fn rotation_compensation(
    display: ImageRotation,
    sensor: ImageRotation,
    front_facing: bool,
) -> ImageRotation {
    let display = display.degrees();
    let sensor = sensor.degrees();
    let degrees = if front_facing {
        (sensor + display) % 360
    } else {
        (sensor + 360 - display) % 360
    };
    match degrees {
        0 => ImageRotation::Deg0,
        90 => ImageRotation::Deg90,
        180 => ImageRotation::Deg180,
        _ => ImageRotation::Deg270,
    }
}
