//! Frame bookkeeping for animated sprites.
//!
//! This is the whole animation surface the movement core drives: a frame
//! window selected by direction, advanced while moving, reset while
//! idle. Entities without the component fall back to plain-rectangle
//! rendering and skip these calls entirely.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimatedSprite {
    start: u32,
    end: u32,
    current: u32,
    counter: u32,
    ticks_per_frame: u32,
}

impl AnimatedSprite {
    pub fn new(ticks_per_frame: u32) -> Self {
        Self {
            start: 0,
            end: 0,
            current: 0,
            counter: 0,
            ticks_per_frame: ticks_per_frame.max(1),
        }
    }

    /// Select the inclusive frame window and restart it.
    pub fn set_animation_range(&mut self, start: u32, end: u32) {
        self.start = start;
        self.end = end.max(start);
        self.current = start;
        self.counter = 0;
    }

    /// Advance one tick, wrapping within the active window.
    pub fn update(&mut self) {
        self.counter += 1;
        if self.counter >= self.ticks_per_frame {
            self.counter = 0;
            self.current = if self.current >= self.end {
                self.start
            } else {
                self.current + 1
            };
        }
    }

    /// Snap back to the window's first frame.
    pub fn reset(&mut self) {
        self.current = self.start;
        self.counter = 0;
    }

    pub fn frame(&self) -> u32 {
        self.current
    }

    pub fn range(&self) -> (u32, u32) {
        (self.start, self.end)
    }
}
