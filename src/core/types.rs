use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Axis-aligned simulation rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub bottom_left: Vec2,
    pub top_right: Vec2,
}

impl Bounds {
    /// Builds bounds, rejecting rectangles that are empty or inverted on either axis.
    pub fn new(bottom_left: Vec2, top_right: Vec2) -> Result<Self> {
        let ordered = bottom_left.x < top_right.x && bottom_left.y < top_right.y;
        if !ordered || !bottom_left.is_finite() || !top_right.is_finite() {
            return Err(SimError::InvalidBounds {
                min: bottom_left,
                max: top_right,
            });
        }
        Ok(Self {
            bottom_left,
            top_right,
        })
    }

    pub fn min(&self) -> Vec2 {
        self.bottom_left
    }

    pub fn max(&self) -> Vec2 {
        self.top_right
    }

    /// Top-left corner, where bulk grids and streams start.
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.bottom_left.x, self.top_right.y)
    }

    pub fn width(&self) -> f32 {
        self.top_right.x - self.bottom_left.x
    }

    pub fn height(&self) -> f32 {
        self.top_right.y - self.bottom_left.y
    }

    pub fn center(&self) -> Vec2 {
        (self.bottom_left + self.top_right) * 0.5
    }

    /// Whether `point` lies inside the bounds shrunk by `margin` on every side.
    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        point.x >= self.bottom_left.x + margin
            && point.x <= self.top_right.x - margin
            && point.y >= self.bottom_left.y + margin
            && point.y <= self.top_right.y - margin
    }
}
