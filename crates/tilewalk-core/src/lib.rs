//! Movement and map-travel core for a tile-based 2D world.
//!
//! This crate contains the simulation logic that is independent of any
//! renderer or windowing stack. Systems take plain data — maps, rects,
//! input flags — and mutate ECS components, making them unit-testable
//! and portable to any frontend that can draw a rect and a sprite frame.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`animation`] | Direction-windowed sprite frame bookkeeping |
//! | [`camera`] | Viewport rect the player controller recenters |
//! | [`components`] | ECS components: body, motion, brains, markers |
//! | [`constants`] | Tile geometry, speeds, cooldowns, map names |
//! | [`direction`] | Cardinal facing plus `Stay`, with sheet indices |
//! | [`engine`] | Tick orchestrator and deferred map transitions |
//! | [`geometry`] | Integer rects and AABB intersection |
//! | [`input`] | Input abstraction the player controller polls |
//! | [`map`] | Layered tile maps, portals, and the map registry |
//! | [`navigation`] | Straight-line routes and hops toward the center |
//! | [`persistence`] | Versioned binary save files |
//! | [`route`] | Consumable directional step queues |
//! | [`systems`] | Player, NPC, and wandering movement systems |
//!
//! One `GameEngine::update` call is one tick. Entities move in pixels,
//! collide against their own tile layer, and cross portals by true
//! intersection; crossings are applied between ticks, never during one.

pub mod animation;
pub mod camera;
pub mod components;
pub mod constants;
pub mod direction;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod map;
pub mod navigation;
pub mod persistence;
pub mod route;
pub mod systems;

pub use animation::AnimatedSprite;
pub use camera::Camera;
pub use components::{Body, Motion, NpcBrain, PlayerControlled};
pub use direction::Direction;
pub use engine::GameEngine;
pub use geometry::Rect;
pub use input::{InputSource, KeyState};
pub use map::{GameMap, MapError, MapRegistry, MapTile, Portal};
pub use persistence::SaveError;
pub use route::Route;
pub use systems::Transition;
