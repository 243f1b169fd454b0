pub mod node;

pub use node::{construct_node, AnchorNode, OffsetNode, RenderableLeaf};

use async_trait::async_trait;

/// Builds the renderable every placed overlay attaches. Construction is
/// asynchronous and may still be in flight when the first codes are found;
/// the pipeline refuses to anchor until the model exists.
#[async_trait]
pub trait ModelProvider: Send + Sync + 'static {
    type Renderable: Clone + Send + Sync + 'static;

    async fn construct_overlay_model(&self) -> Self::Renderable;
}
