//! Components attached to movable entities.
//!
//! Pure data; all behavior lives in the systems. Everything derives
//! serde so save files can snapshot entities component by component.

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::geometry::Rect;
use crate::route::Route;

/// Physical footprint: the bounding box the entity exclusively owns and
/// the tile layer it collides against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub rect: Rect,
    pub layer: usize,
}

impl Body {
    pub fn new(rect: Rect, layer: usize) -> Self {
        Self { rect, layer }
    }
}

/// Movement state: facing, per-tick speed, the route-step cooldown and
/// the map the entity currently lives on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motion {
    pub direction: Direction,
    /// Pixels per tick; constant per entity type.
    pub speed: i32,
    /// Ticks until the next route step may be consumed. Decremented
    /// unconditionally each tick and may go negative; only `< 1`
    /// matters.
    pub moving_ticks: i32,
    /// Name of the map this entity is on. Changing it is the sole
    /// logical effect of a portal crossing.
    pub map: String,
}

impl Motion {
    pub fn new(direction: Direction, speed: i32, map: impl Into<String>) -> Self {
        Self {
            direction,
            speed,
            moving_ticks: 0,
            map: map.into(),
        }
    }
}

/// Marker: this entity is driven by the input provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerControlled;

/// Autonomous decision state. The route is transient: it is recomputed
/// from the world on demand and never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NpcBrain {
    #[serde(skip)]
    pub route: Route,
}

impl NpcBrain {
    pub fn new() -> Self {
        Self::default()
    }
}
