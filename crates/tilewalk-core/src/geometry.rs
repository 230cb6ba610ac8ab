//! Axis-aligned rectangles in zoomed pixel space.
//!
//! Every movable entity owns exactly one `Rect`; movement systems mutate
//! it in place. Collision checks only ever need the plain intersection
//! test and the hypothetical-position variant.

use serde::{Deserialize, Serialize};

/// Integer-pixel bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict overlap test. Rects that merely share an edge do not
    /// intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.would_intersect_at(self.x, self.y, other)
    }

    /// Overlap test as if this rect were at `(x, y)`, without moving it.
    pub fn would_intersect_at(&self, x: i32, y: i32, other: &Rect) -> bool {
        x < other.x + other.width
            && x + self.width > other.x
            && y < other.y + other.height
            && y + self.height > other.y
    }
}
