pub mod hit_testing;
mod matrix;
mod point;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

pub use matrix::MatrixObject;
pub use point::{PointAlignment, PointId, PointShape, PointStore};

bitflags! {
    /// State flags shared by shapes and points
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ShapeState: u32 {
        const VISIBLE = 1 << 0;
        const PRINTABLE = 1 << 1;
        const LOCKED = 1 << 2;
        /// Point drawn and hit-tested on its own, not only through an owner
        const STANDALONE = 1 << 3;
        /// Junction point, moved only through its owning shape
        const CONNECTOR = 1 << 4;
        const INPUT = 1 << 5;
        const OUTPUT = 1 << 6;
    }
}

impl Default for ShapeState {
    fn default() -> Self {
        ShapeState::VISIBLE | ShapeState::PRINTABLE
    }
}

/// Width and height of an arc segment's ellipse
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSize {
    pub width: f64,
    pub height: f64,
}

impl PathSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size spanned between two corners, always non-negative
    pub fn between(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new((x1 - x0).abs(), (y1 - y0).abs())
    }
}
