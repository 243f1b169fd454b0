use nalgebra::{UnitQuaternion, Vector3};

use crate::config::ScanConfig;

/// Root of a placed overlay. Ignores the anchor's native orientation and
/// applies its own local rotation instead.
#[derive(Debug, Clone)]
pub struct AnchorNode<A, R> {
    pub anchor: A,
    pub local_rotation: UnitQuaternion<f32>,
    pub child: OffsetNode<R>,
}

/// Intermediate node carrying the second orientation correction and the
/// positional offset that moves the marker beside the detected surface.
#[derive(Debug, Clone)]
pub struct OffsetNode<R> {
    pub local_rotation: UnitQuaternion<f32>,
    pub local_position: Vector3<f32>,
    pub child: RenderableLeaf<R>,
}

/// Leaf holding the renderable itself. Overlays neither cast nor receive
/// shadows.
#[derive(Debug, Clone)]
pub struct RenderableLeaf<R> {
    pub renderable: R,
    pub shadow_caster: bool,
    pub shadow_receiver: bool,
}

/// Assembles the fixed node hierarchy for one placement. The shape is a
/// geometric constant of the overlay, nothing in it is computed per frame.
pub fn construct_node<A, R>(anchor: A, renderable: R, config: &ScanConfig) -> AnchorNode<A, R> {
    AnchorNode {
        anchor,
        local_rotation: config.overlay_rotation,
        child: OffsetNode {
            local_rotation: config.overlay_rotation,
            local_position: config.overlay_offset,
            child: RenderableLeaf {
                renderable,
                shadow_caster: false,
                shadow_receiver: false,
            },
        },
    }
}
