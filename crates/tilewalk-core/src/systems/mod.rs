//! Per-tick movement systems and the deferred transition queue.
//!
//! Systems only read the entity's current map; an entity that crosses a
//! portal raises a [`Transition`] instead of swapping maps mid-tick. The
//! orchestrator drains the queue after every system has run, so within a
//! single tick all collision and boundary checks see one consistent map
//! per entity.

pub mod npc;
pub mod player;
pub mod walking;
pub mod wandering;

pub use npc::npc_movement_system;
pub use player::player_movement_system;
pub use wandering::wandering_system;

use hecs::Entity;

/// A map change requested during a tick and applied after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The player crossed a portal; the active map changes.
    LoadMap { entity: Entity, destination: String },
    /// An NPC crossed a portal; only that entity relocates.
    MoveNpc { entity: Entity, destination: String },
}

impl Transition {
    pub fn entity(&self) -> Entity {
        match self {
            Transition::LoadMap { entity, .. } | Transition::MoveNpc { entity, .. } => *entity,
        }
    }

    pub fn destination(&self) -> &str {
        match self {
            Transition::LoadMap { destination, .. }
            | Transition::MoveNpc { destination, .. } => destination,
        }
    }
}
