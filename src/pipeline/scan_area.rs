use crate::common::{BoundingBox, Detection};
use crate::config::ScanConfig;

/// Restricts anchoring to a central horizontal band of the image. Codes at
/// the frame edges are never candidates.
#[derive(Debug, Clone, Copy)]
pub struct ScanAreaFilter {
    start_fraction: f32,
    end_fraction: f32,
}

/// A detection that passed the scan-area gate, with its validated box.
#[derive(Debug, Clone)]
pub struct ScanCandidate {
    pub identity: Option<String>,
    pub bounds: BoundingBox,
}

impl ScanCandidate {
    pub fn identity_key(&self) -> String {
        self.identity.clone().unwrap_or_default()
    }
}

impl ScanAreaFilter {
    pub fn new(start_fraction: f32, end_fraction: f32) -> Self {
        Self {
            start_fraction,
            end_fraction,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.scan_area_start, config.scan_area_end)
    }

    /// Picks the first detection, in detector output order, whose box lies
    /// fully inside the band. The band spans the full image height.
    /// Detections with absent or degenerate boxes never match, and nothing
    /// outside the band is ever selected.
    pub fn select(
        &self,
        detections: &[Detection],
        width: u32,
        height: u32,
    ) -> Option<ScanCandidate> {
        let band_start = width as f32 * self.start_fraction;
        let band_end = width as f32 * self.end_fraction;
        detections.iter().find_map(|detection| {
            let bounds = detection.bounds?;
            if bounds.is_degenerate() {
                return None;
            }
            let in_band = bounds.left >= band_start
                && bounds.right <= band_end
                && bounds.top >= 0.0
                && bounds.bottom <= height as f32;
            in_band.then(|| ScanCandidate {
                identity: detection.identity.clone(),
                bounds,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SCAN_AREA_WIDTH_END, SCAN_AREA_WIDTH_START};

    fn filter() -> ScanAreaFilter {
        ScanAreaFilter::new(SCAN_AREA_WIDTH_START, SCAN_AREA_WIDTH_END)
    }

    fn centered_box(center_x: f32) -> BoundingBox {
        // 100px-wide image: band is [35, 65].
        BoundingBox::new(center_x - 5.0, 40.0, center_x + 5.0, 60.0)
    }

    #[test]
    fn detection_centered_in_band_is_selected() {
        let detections = vec![Detection::new("X", centered_box(50.0))];
        let candidate = filter().select(&detections, 100, 100).unwrap();
        assert_eq!(candidate.identity.as_deref(), Some("X"));
    }

    #[test]
    fn detection_outside_band_is_never_selected() {
        // Centered at 10% of the width, well outside [35, 65].
        let detections = vec![Detection::new("X", centered_box(10.0))];
        assert!(filter().select(&detections, 100, 100).is_none());
    }

    #[test]
    fn box_straddling_band_edge_is_rejected() {
        let detections = vec![Detection::new("X", BoundingBox::new(30.0, 40.0, 50.0, 60.0))];
        assert!(filter().select(&detections, 100, 100).is_none());
    }

    #[test]
    fn first_in_band_detection_wins_by_detector_order() {
        let detections = vec![
            Detection::new("edge", centered_box(90.0)),
            Detection::new("first", centered_box(45.0)),
            Detection::new("second", centered_box(55.0)),
        ];
        let candidate = filter().select(&detections, 100, 100).unwrap();
        assert_eq!(candidate.identity.as_deref(), Some("first"));
    }

    #[test]
    fn absent_or_degenerate_boxes_never_match() {
        let detections = vec![
            Detection {
                identity: Some("no-box".into()),
                bounds: None,
            },
            Detection::new("flat", BoundingBox::new(45.0, 50.0, 55.0, 50.0)),
        ];
        assert!(filter().select(&detections, 100, 100).is_none());
    }

    #[test]
    fn box_taller_than_the_image_is_rejected() {
        let detections = vec![Detection::new("X", BoundingBox::new(45.0, -10.0, 55.0, 120.0))];
        assert!(filter().select(&detections, 100, 100).is_none());
    }
}
