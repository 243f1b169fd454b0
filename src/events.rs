use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::overlay::AnchorNode;
use crate::pipeline::placement::PlacementResult;

/// Sending half of the two outbound event channels: user-facing notification
/// text and constructed overlay nodes awaiting scene attachment. Both are
/// unbounded and order-preserving.
pub(crate) struct ScanEventSender<A, R> {
    message_tx: UnboundedSender<String>,
    overlay_tx: UnboundedSender<AnchorNode<A, R>>,
}

impl<A, R> ScanEventSender<A, R> {
    pub(crate) fn channel() -> (
        Self,
        UnboundedReceiver<String>,
        UnboundedReceiver<AnchorNode<A, R>>,
    ) {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let (overlay_tx, overlay_rx) = mpsc::unbounded_channel();
        (
            Self {
                message_tx,
                overlay_tx,
            },
            message_rx,
            overlay_rx,
        )
    }

    /// Hands one successful placement to both channels. A dropped receiver
    /// only loses that consumer's events, it never fails the run.
    pub(crate) fn emit(&self, placement: PlacementResult<A, R>) {
        let PlacementResult { identity, node } = placement;
        debug!("emitting placement events for \"{}\"", identity);
        if self.overlay_tx.send(node).is_err() {
            warn!("overlay event receiver dropped, discarding node");
        }
        if self.message_tx.send(identity).is_err() {
            warn!("message event receiver dropped, discarding notification");
        }
    }
}

impl<A, R> Clone for ScanEventSender<A, R> {
    fn clone(&self) -> Self {
        Self {
            message_tx: self.message_tx.clone(),
            overlay_tx: self.overlay_tx.clone(),
        }
    }
}
