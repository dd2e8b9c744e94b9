//! Plain pixel geometry shared by the layout and drag code.
//!
//! These are renderer-agnostic value types; the host converts to and from its
//! own toolkit types at the boundary.

use serde::{Deserialize, Serialize};

/// A pointer position in global (calendar surface) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Returns true if `y` lies within `[top, bottom)`.
    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom()
    }

    /// Returns true if `x` lies within `[left, right)`.
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left && x < self.right()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.contains_x(point.x) && self.contains_y(point.y)
    }
}
