use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::hit_testing::DEFAULT_HIT_THRESHOLD;
use crate::path::FillRule;
use crate::style::ShapeStyle;

/// What a selection drag translates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveMode {
    /// Translate the distinct selected points
    #[default]
    Point,
    /// Call each selected shape's move
    Shape,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EllipseMode {
    /// Free bounding box from the first click to the cursor
    #[default]
    Rectangle,
    /// First click is the center; the bounding box is kept square
    Circle,
}

/// Editor-wide settings consumed by the tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    pub snap_to_grid: bool,
    pub snap_x: f64,
    pub snap_y: f64,
    /// Radius used when looking for points and shapes under the cursor
    pub hit_threshold: f64,
    /// Reuse existing points under the cursor instead of creating new ones
    pub try_to_connect: bool,
    pub move_mode: MoveMode,
    pub ellipse_mode: EllipseMode,
    pub default_is_stroked: bool,
    pub default_is_filled: bool,
    pub default_is_closed: bool,
    pub default_fill_rule: FillRule,
    pub default_text: String,
    pub shape_style: ShapeStyle,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            snap_to_grid: true,
            snap_x: 15.0,
            snap_y: 15.0,
            hit_threshold: DEFAULT_HIT_THRESHOLD,
            try_to_connect: true,
            move_mode: MoveMode::Point,
            ellipse_mode: EllipseMode::Rectangle,
            default_is_stroked: true,
            default_is_filled: false,
            default_is_closed: false,
            default_fill_rule: FillRule::EvenOdd,
            default_text: "Text".to_string(),
            shape_style: ShapeStyle::default(),
        }
    }
}

impl EditorOptions {
    /// Parse options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: EditorOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.snap_to_grid && (self.snap_x <= 0.0 || self.snap_y <= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "grid step must be positive, got ({}, {})",
                self.snap_x, self.snap_y
            )));
        }
        if self.hit_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "hit threshold must not be negative, got {}",
                self.hit_threshold
            )));
        }
        Ok(())
    }

    /// Apply the grid-snap policy to a raw pointer position
    pub fn snap(&self, x: f64, y: f64) -> (f64, f64) {
        if self.snap_to_grid {
            (snap(x, self.snap_x), snap(y, self.snap_y))
        } else {
            (x, y)
        }
    }
}

fn snap(value: f64, step: f64) -> f64 {
    if step > 0.0 {
        (value / step).round() * step
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = EditorOptions::from_json(r#"{ "snap_x": 10.0, "ellipse_mode": "Circle" }"#)
            .unwrap();
        assert_eq!(options.snap_x, 10.0);
        assert_eq!(options.snap_y, 15.0);
        assert_eq!(options.ellipse_mode, EllipseMode::Circle);
        assert!(options.try_to_connect);
        assert_eq!(options.hit_threshold, DEFAULT_HIT_THRESHOLD);
    }

    #[test]
    fn test_rejects_zero_grid() {
        let result = EditorOptions::from_json(r#"{ "snap_x": 0.0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = EditorOptions::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_snap_rounds_to_grid() {
        let options = EditorOptions::default();
        assert_eq!(options.snap(7.0, 8.0), (0.0, 15.0));
        assert_eq!(options.snap(22.4, -8.0), (15.0, -15.0));

        let free = EditorOptions {
            snap_to_grid: false,
            ..EditorOptions::default()
        };
        assert_eq!(free.snap(7.0, 8.0), (7.0, 8.0));
    }
}
