use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};

/// 2D affine transform attached to every shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatrixObject {
    pub m11: f64,
    pub m12: f64,
    pub m21: f64,
    pub m22: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for MatrixObject {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl MatrixObject {
    pub const IDENTITY: MatrixObject = MatrixObject {
        m11: 1.0,
        m12: 0.0,
        m21: 0.0,
        m22: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            offset_x: dx,
            offset_y: dy,
            ..Self::IDENTITY
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn to_affine(&self) -> Affine {
        Affine::new([
            self.m11,
            self.m12,
            self.m21,
            self.m22,
            self.offset_x,
            self.offset_y,
        ])
    }

    pub fn transform_point(&self, point: Point) -> Point {
        self.to_affine() * point
    }
}
