use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// One decoded code reported by the detector for a single frame.
///
/// Both the identity and the bounding box are optional: a detector may decode
/// a payload without localizing it, or localize a code it could not decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub identity: Option<String>,
    pub bounds: Option<BoundingBox>,
}

impl Detection {
    pub fn new(identity: impl Into<String>, bounds: BoundingBox) -> Self {
        Self {
            identity: Some(identity.into()),
            bounds: Some(bounds),
        }
    }

    /// The key this detection is deduplicated and announced under. An absent
    /// identity normalizes to the empty string and deduplicates like any
    /// other key.
    pub fn identity_key(&self) -> &str {
        self.identity.as_deref().unwrap_or("")
    }
}

/// Axis-aligned box in image-pixel space, left-top-right-bottom corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> Point2<f32> {
        Point2::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// A box with non-positive extent or a non-finite corner carries no
    /// usable position.
    pub fn is_degenerate(&self) -> bool {
        let finite = self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite();
        !finite || self.width() <= 0.0 || self.height() <= 0.0
    }
}
