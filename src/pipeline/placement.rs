use std::sync::{Arc, OnceLock};

use nalgebra::Point2;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::common::{BoundingBox, ImageRotation};
use crate::config::ScanConfig;
use crate::detect::BarcodeDetector;
use crate::error::{FrameError, ScanError};
use crate::events::ScanEventSender;
use crate::overlay::{construct_node, AnchorNode};
use crate::pipeline::ledger::AnchorLedger;
use crate::pipeline::scan_area::ScanAreaFilter;
use crate::session::{CoordinateSpace, FrameAnchor, HitResult, TrackingFrame};

/// Terminal state of one pipeline run. Everything except `Anchored` is a
/// quiet termination: invisible to the user, retried for free on a later
/// frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Anchored { identity: String },
    ImageNotReady,
    NoDetection,
    OutsideScanArea,
    AlreadyAnchored { identity: String },
    NoHit,
    ModelNotReady,
}

/// A freshly created anchor with the overlay node built on top of it. Lives
/// only until handed to the event channels.
pub(crate) struct PlacementResult<A, R> {
    pub(crate) identity: String,
    pub(crate) node: AnchorNode<A, R>,
}

/// Maps a detection's box center from image-pixel space into the view space
/// hit-testing operates in. Pure; the projection itself belongs to the
/// session.
pub(crate) fn detection_view_point<F: TrackingFrame>(
    frame: &F,
    bounds: &BoundingBox,
) -> Point2<f32> {
    frame.transform_point(
        bounds.center(),
        CoordinateSpace::ImagePixels,
        CoordinateSpace::View,
    )
}

/// One full scan-and-anchor run over a single frame.
///
/// Strictly sequential: image acquisition, detection, scan-area filtering,
/// dedup check, coordinate mapping, hit test, anchor creation, node
/// construction, event emission. Any negative intermediate result ends the
/// run with the matching quiet outcome. The caller holds the scan permit for
/// the duration of this future.
pub(crate) async fn run_placement<F, D, R>(
    frame: F,
    rotation: ImageRotation,
    detector: Arc<D>,
    ledger: Arc<Mutex<AnchorLedger>>,
    overlay_model: Arc<OnceLock<R>>,
    config: ScanConfig,
    events: ScanEventSender<FrameAnchor<F>, R>,
) -> Result<PlacementOutcome, ScanError>
where
    F: TrackingFrame,
    D: BarcodeDetector,
    R: Clone + Send + Sync + 'static,
{
    let image = match frame.acquire_camera_image() {
        Ok(image) => image,
        Err(FrameError::ImageNotYetAvailable) => {
            trace!("camera image not yet available, skipping frame");
            return Ok(PlacementOutcome::ImageNotReady);
        }
        Err(e) => return Err(e.into()),
    };

    debug!("dispatching detection for frame {}", image.frame_id());
    let detections = detector.detect(&image, rotation).await?;
    if detections.is_empty() {
        return Ok(PlacementOutcome::NoDetection);
    }

    let filter = ScanAreaFilter::from_config(&config);
    let Some(candidate) = filter.select(&detections, image.width(), image.height()) else {
        trace!("no detection inside the scan area");
        return Ok(PlacementOutcome::OutsideScanArea);
    };

    let identity = candidate.identity_key();
    if !ledger.lock().await.is_new(&identity) {
        trace!("\"{}\" is already anchored", identity);
        return Ok(PlacementOutcome::AlreadyAnchored { identity });
    }

    let view_point = detection_view_point(&frame, &candidate.bounds);
    let Some(hit) = frame.hit_test(view_point).into_iter().next() else {
        trace!("hit test found no surface at the detection");
        return Ok(PlacementOutcome::NoHit);
    };

    let Some(renderable) = overlay_model.get() else {
        trace!("overlay model not constructed yet");
        return Ok(PlacementOutcome::ModelNotReady);
    };

    ledger.lock().await.commit(identity.clone());
    let anchor = hit.create_anchor();
    let node = construct_node(anchor, renderable.clone(), &config);
    events.emit(PlacementResult {
        identity: identity.clone(),
        node,
    });

    Ok(PlacementOutcome::Anchored { identity })
}
