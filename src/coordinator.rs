use std::sync::{Arc, OnceLock};
use std::time::Instant;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use crate::common::ImageRotation;
use crate::config::ScanConfig;
use crate::detect::BarcodeDetector;
use crate::error::ScanError;
use crate::events::ScanEventSender;
use crate::overlay::{AnchorNode, ModelProvider};
use crate::pipeline::guard::ScanGuard;
use crate::pipeline::ledger::AnchorLedger;
use crate::pipeline::placement::{run_placement, PlacementOutcome};
use crate::pipeline::throttle::ScanThrottle;
use crate::session::{FrameAnchor, TrackingFrame};

/// Overlay node type emitted by a coordinator over frame `F` and model
/// provider `P`.
pub type CoordinatorNode<F, P> = AnchorNode<FrameAnchor<F>, <P as ModelProvider>::Renderable>;

/// Drives the scan-and-anchor pipeline off a live frame feed.
///
/// Each tick hands a frame to [`ScanCoordinator::on_new_frame`]. The
/// coordinator throttles detection, keeps at most one run in flight (frames
/// arriving meanwhile are dropped, not queued), anchors every code identity
/// at most once, and emits a notification plus an overlay node for every
/// successful placement.
///
/// Construction spawns the overlay-model task, so a coordinator must be
/// built inside a tokio runtime.
pub struct ScanCoordinator<F, D, P>
where
    F: TrackingFrame,
    D: BarcodeDetector,
    P: ModelProvider,
{
    config: ScanConfig,
    throttle: ScanThrottle,
    guard: ScanGuard,
    ledger: Arc<Mutex<AnchorLedger>>,
    detector: Arc<D>,
    overlay_model: Arc<OnceLock<P::Renderable>>,
    model_task: Option<JoinHandle<()>>,
    scan_job: Option<JoinHandle<()>>,
    events: ScanEventSender<FrameAnchor<F>, P::Renderable>,
    message_rx: Option<UnboundedReceiver<String>>,
    overlay_rx: Option<UnboundedReceiver<CoordinatorNode<F, P>>>,
    cancel_token: CancellationToken,
}

impl<F, D, P> ScanCoordinator<F, D, P>
where
    F: TrackingFrame,
    D: BarcodeDetector,
    P: ModelProvider,
{
    fn new(config: ScanConfig, detector: D, model_provider: P) -> Self {
        let cancel_token = CancellationToken::new();
        let overlay_model = Arc::new(OnceLock::new());
        let model_task = Self::spawn_model_task(
            model_provider,
            Arc::clone(&overlay_model),
            cancel_token.clone(),
        );
        let (events, message_rx, overlay_rx) = ScanEventSender::channel();
        Self {
            throttle: ScanThrottle::new(config.scan_interval),
            guard: ScanGuard::new(),
            ledger: Arc::new(Mutex::new(AnchorLedger::new())),
            detector: Arc::new(detector),
            overlay_model,
            model_task: Some(model_task),
            scan_job: None,
            events,
            message_rx: Some(message_rx),
            overlay_rx: Some(overlay_rx),
            cancel_token,
            config,
        }
    }

    fn spawn_model_task(
        model_provider: P,
        slot: Arc<OnceLock<P::Renderable>>,
        cancel_token: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel_token.cancelled() => {}
                renderable = model_provider.construct_overlay_model() => {
                    let _ = slot.set(renderable);
                    debug!("overlay model constructed");
                }
            }
        })
    }

    /// Feeds one frame tick into the pipeline. Returns immediately; the run,
    /// if one starts, proceeds on its own task.
    pub fn on_new_frame(&mut self, frame: F, rotation: ImageRotation) {
        if !self.throttle.try_authorize(Instant::now()) {
            return;
        }
        self.perform_scan(frame, rotation);
    }

    fn perform_scan(&mut self, frame: F, rotation: ImageRotation) {
        let Some(permit) = self.guard.try_start() else {
            trace!("scan still in flight, dropping frame");
            return;
        };
        let detector = Arc::clone(&self.detector);
        let ledger = Arc::clone(&self.ledger);
        let overlay_model = Arc::clone(&self.overlay_model);
        let events = self.events.clone();
        let config = self.config.clone();
        let cancel_token = self.cancel_token.clone();
        self.scan_job = Some(tokio::spawn(async move {
            let _permit = permit;
            tokio::select! {
                _ = cancel_token.cancelled() => {}
                result = run_placement(
                    frame,
                    rotation,
                    detector,
                    ledger,
                    overlay_model,
                    config,
                    events,
                ) => {
                    match result {
                        Ok(PlacementOutcome::Anchored { identity }) => {
                            debug!("anchored \"{}\"", identity);
                        }
                        Ok(outcome) => trace!("scan ended: {:?}", outcome),
                        Err(e) => error!("Scan pipeline error: {}", e),
                    }
                }
            }
        }));
    }

    /// Notification stream: one identity string per successful placement.
    /// Yields the receiving half once.
    pub fn take_message_events(&mut self) -> Option<UnboundedReceiverStream<String>> {
        self.message_rx.take().map(UnboundedReceiverStream::new)
    }

    /// Overlay stream: one constructed node per successful placement,
    /// awaiting scene attachment. Yields the receiving half once.
    pub fn take_overlay_events(
        &mut self,
    ) -> Option<UnboundedReceiverStream<CoordinatorNode<F, P>>> {
        self.overlay_rx.take().map(UnboundedReceiverStream::new)
    }

    pub fn is_scanning(&self) -> bool {
        self.guard.is_active()
    }

    pub async fn anchored_count(&self) -> usize {
        self.ledger.lock().await.len()
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Waits until the overlay model finished constructing.
    pub async fn await_overlay_model(&mut self) {
        if let Some(task) = self.model_task.take() {
            if let Err(e) = task.await {
                if e.is_panic() {
                    error!("overlay model task panicked: {}", e);
                }
            }
        }
    }

    /// Drains the in-flight run, if any. Useful for orderly shutdown;
    /// ongoing scans are otherwise abandoned by [`ScanCoordinator::stop`].
    pub async fn await_active_scan(&mut self) {
        if let Some(job) = self.scan_job.take() {
            if let Err(e) = job.await {
                if e.is_panic() {
                    error!("scan task panicked: {}", e);
                }
            }
        }
    }

    pub fn stop(&self) {
        self.cancel_token.cancel();
        if let Some(job) = &self.scan_job {
            job.abort();
        }
        if let Some(task) = &self.model_task {
            task.abort();
        }
    }
}

impl<F, D, P> Drop for ScanCoordinator<F, D, P>
where
    F: TrackingFrame,
    D: BarcodeDetector,
    P: ModelProvider,
{
    fn drop(&mut self) {
        self.stop();
    }
}

pub struct ScanCoordinatorBuilder<D, P> {
    config: ScanConfig,
    detector: Option<D>,
    model_provider: Option<P>,
}

impl<D, P> ScanCoordinatorBuilder<D, P>
where
    D: BarcodeDetector,
    P: ModelProvider,
{
    pub fn new() -> Self {
        Self {
            config: ScanConfig::default(),
            detector: None,
            model_provider: None,
        }
    }

    // Replaces the whole configuration, overriding any earlier setting.
    pub fn config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    // Adjusts the detection dispatch spacing, this will override the default
    // configuration.
    pub fn scan_interval(mut self, interval: std::time::Duration) -> Self {
        self.config.scan_interval = interval;
        self
    }

    // Adjusts the horizontal scan band, as fractions of the image width.
    pub fn scan_area(mut self, start_fraction: f32, end_fraction: f32) -> Self {
        self.config.scan_area_start = start_fraction;
        self.config.scan_area_end = end_fraction;
        self
    }

    pub fn detector(mut self, detector: D) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn model_provider(mut self, model_provider: P) -> Self {
        self.model_provider = Some(model_provider);
        self
    }

    pub fn build<F: TrackingFrame>(self) -> Result<ScanCoordinator<F, D, P>, ScanError> {
        let detector = self
            .detector
            .ok_or(ScanError::Configuration("detector not set".to_string()))?;
        let model_provider = self.model_provider.ok_or(ScanError::Configuration(
            "model provider not set".to_string(),
        ))?;
        let band = self.config.scan_area_start..self.config.scan_area_end;
        if band.is_empty() || band.start < 0.0 || band.end > 1.0 {
            return Err(ScanError::Configuration(format!(
                "invalid scan area band [{}, {}]",
                self.config.scan_area_start, self.config.scan_area_end
            )));
        }
        Ok(ScanCoordinator::new(self.config, detector, model_provider))
    }
}

impl<D, P> Default for ScanCoordinatorBuilder<D, P>
where
    D: BarcodeDetector,
    P: ModelProvider,
{
    fn default() -> Self {
        Self::new()
    }
}
