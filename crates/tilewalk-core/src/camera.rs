//! Render-camera surface the player controller recenters.
//!
//! The camera is owned by the renderer in a full game; the movement core
//! only ever requests recentering, so a rect is all it needs to know.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub rect: Rect,
}

impl Camera {
    /// Camera covering a `width` × `height` viewport anchored at origin.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            rect: Rect::new(0, 0, width, height),
        }
    }

    /// Center the viewport horizontally on pixel `x`.
    pub fn center_x_on(&mut self, x: i32) {
        self.rect.x = x - self.rect.width / 2;
    }

    /// Center the viewport vertically on pixel `y`.
    pub fn center_y_on(&mut self, y: i32) {
        self.rect.y = y - self.rect.height / 2;
    }
}
