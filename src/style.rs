use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgbColor {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ArgbColor {
    pub const BLACK: ArgbColor = ArgbColor::new(255, 0, 0, 0);
    pub const TRANSPARENT: ArgbColor = ArgbColor::new(0, 0, 0, 0);

    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }
}

/// Stroke and fill settings shared by shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub name: String,
    pub stroke: ArgbColor,
    pub fill: ArgbColor,
    pub thickness: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            stroke: ArgbColor::BLACK,
            fill: ArgbColor::TRANSPARENT,
            thickness: 2.0,
        }
    }
}

impl ShapeStyle {
    /// Thin style used for helper-layer decorations
    pub fn helper() -> Self {
        Self {
            name: "Helper".to_string(),
            stroke: ArgbColor::new(255, 0, 191, 255),
            fill: ArgbColor::TRANSPARENT,
            thickness: 1.0,
        }
    }
}
