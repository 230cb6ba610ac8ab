//! Game-space constants — tile metrics, entity speeds, camera margins.
//!
//! Plain integer constants with no engine dependency. Both the core
//! systems and the native simtest harness use these.

/// Base tile edge in source pixels, before zoom.
pub const TILE_SIZE: i32 = 16;

/// Integer render scale. All positions in this crate are in zoomed
/// (screen) pixel space.
pub const ZOOM: i32 = 2;

/// Tile edge in zoomed pixels — the unit of one route step.
pub const TILE_PX: i32 = TILE_SIZE * ZOOM;

/// Player movement speed in pixels per tick. Constant per entity type.
pub const PLAYER_SPEED: i32 = 5;

/// NPC movement speed in pixels per tick. One route step spans
/// `ROUTE_STEP_TICKS * NPC_SPEED` pixels, exactly one tile cell.
pub const NPC_SPEED: i32 = 2;

/// Ticks between consecutive route-step consumptions. Keeps NPC motion
/// reading as discrete per-tile steps.
pub const ROUTE_STEP_TICKS: i32 = 16;

/// Horizontal camera-follow margin from the map's trailing edge.
pub const CAMERA_MARGIN_X: i32 = 64;

/// Vertical camera-follow margin from the map's trailing edge.
pub const CAMERA_MARGIN_Y: i32 = 96;

/// Tile layer that walking entities collide against.
pub const WALK_LAYER: usize = 1;

/// How often the engine runs the idle-wandering pass, in ticks.
pub const WANDER_INTERVAL_TICKS: u64 = 8;

pub mod maps {
    /// The central map NPCs return to when stranded elsewhere.
    pub const CENTRAL: &str = "main";
}
