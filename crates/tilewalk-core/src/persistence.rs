//! Binary save files for the engine's dynamic state.
//!
//! Maps are not persisted; they are static data reloaded from the map
//! set. A save carries the tick counter, the camera, and a component
//! snapshot per entity. Routes are deliberately skipped: an NPC restored
//! mid-journey replans from its position on the next tick.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::animation::AnimatedSprite;
use crate::camera::Camera;
use crate::components::{Body, Motion, NpcBrain, PlayerControlled};

const SAVE_VERSION: u32 = 1;

#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(bincode::Error),
    VersionMismatch { found: u32, expected: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<bincode::Error> for SaveError {
    fn from(e: bincode::Error) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { found, expected } => {
                write!(f, "Save version {} (expected {})", found, expected)
            }
        }
    }
}

impl std::error::Error for SaveError {}

/// One entity's persisted components. Optional components round-trip as
/// options; the route inside `NpcBrain` is skipped by its own serde
/// attributes.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SerializableEntity {
    body: Option<Body>,
    motion: Option<Motion>,
    player: Option<PlayerControlled>,
    npc: Option<NpcBrain>,
    sprite: Option<AnimatedSprite>,
}

#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    tick: u64,
    camera: Camera,
    entities: Vec<SerializableEntity>,
}

/// World state restored from a save file.
pub struct LoadedGame {
    pub world: hecs::World,
    pub tick: u64,
    pub camera: Camera,
}

impl std::fmt::Debug for LoadedGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedGame")
            .field("tick", &self.tick)
            .field("camera", &self.camera)
            .finish_non_exhaustive()
    }
}

pub fn save_game<W: Write>(
    writer: W,
    world: &hecs::World,
    tick: u64,
    camera: &Camera,
) -> Result<(), SaveError> {
    let mut entities = Vec::new();
    for entity_ref in world.iter() {
        entities.push(SerializableEntity {
            body: entity_ref.get::<&Body>().map(|c| *c),
            motion: entity_ref.get::<&Motion>().map(|c| (*c).clone()),
            player: entity_ref.get::<&PlayerControlled>().map(|c| *c),
            npc: entity_ref.get::<&NpcBrain>().map(|c| (*c).clone()),
            sprite: entity_ref.get::<&AnimatedSprite>().map(|c| (*c).clone()),
        });
    }

    let data = SaveData {
        version: SAVE_VERSION,
        tick,
        camera: *camera,
        entities,
    };
    bincode::serialize_into(writer, &data)?;
    Ok(())
}

pub fn load_game<R: Read>(reader: R) -> Result<LoadedGame, SaveError> {
    let data: SaveData = bincode::deserialize_from(reader)?;
    if data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            found: data.version,
            expected: SAVE_VERSION,
        });
    }

    let mut world = hecs::World::new();
    for snapshot in data.entities {
        spawn_entity(&mut world, snapshot);
    }

    Ok(LoadedGame {
        world,
        tick: data.tick,
        camera: data.camera,
    })
}

fn spawn_entity(world: &mut hecs::World, snapshot: SerializableEntity) {
    let entity = world.spawn(());
    if let Some(body) = snapshot.body {
        let _ = world.insert_one(entity, body);
    }
    if let Some(motion) = snapshot.motion {
        let _ = world.insert_one(entity, motion);
    }
    if let Some(player) = snapshot.player {
        let _ = world.insert_one(entity, player);
    }
    if let Some(npc) = snapshot.npc {
        let _ = world.insert_one(entity, npc);
    }
    if let Some(sprite) = snapshot.sprite {
        let _ = world.insert_one(entity, sprite);
    }
}
