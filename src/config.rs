use std::time::Duration;

use nalgebra::{UnitQuaternion, Vector3};

/// Minimum wall-clock spacing between two detection dispatches.
pub const SCAN_INTERVAL: Duration = Duration::from_millis(300);

/// Horizontal scan band, as fractions of the image width. Detections outside
/// the band are never anchored.
pub const SCAN_AREA_WIDTH_START: f32 = 0.35;
pub const SCAN_AREA_WIDTH_END: f32 = 0.65;

/// Local offset of the overlay relative to its anchor, in meters. Moves the
/// marker beside the detected surface rather than inside it.
pub const OVERLAY_NODE_OFFSET: [f32; 3] = [-0.02, -0.02, 0.0];

/// Orientation correction applied at the anchor root and again one level
/// down: a half turn about the vertical axis.
pub const OVERLAY_ROTATION_DEGREES: f32 = 180.0;

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub scan_interval: Duration,
    pub scan_area_start: f32,
    pub scan_area_end: f32,
    pub overlay_offset: Vector3<f32>,
    pub overlay_rotation: UnitQuaternion<f32>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            scan_interval: SCAN_INTERVAL,
            scan_area_start: SCAN_AREA_WIDTH_START,
            scan_area_end: SCAN_AREA_WIDTH_END,
            overlay_offset: Vector3::new(
                OVERLAY_NODE_OFFSET[0],
                OVERLAY_NODE_OFFSET[1],
                OVERLAY_NODE_OFFSET[2],
            ),
            overlay_rotation: UnitQuaternion::from_axis_angle(
                &Vector3::y_axis(),
                OVERLAY_ROTATION_DEGREES.to_radians(),
            ),
        }
    }
}
