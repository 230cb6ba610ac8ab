//! Tick orchestrator: owns the world, the map registry, the camera and
//! the deferred transition queue.
//!
//! One `update` call is one tick. The movement systems run against the
//! maps each entity started the tick on; transitions they raised are
//! applied afterwards, so no entity's map changes mid-tick.

use std::io::{Read, Write};
use std::mem;

use hecs::{Entity, World};
use log::{info, warn};

use crate::animation::AnimatedSprite;
use crate::camera::Camera;
use crate::components::{Body, Motion, NpcBrain, PlayerControlled};
use crate::constants::{
    maps, NPC_SPEED, PLAYER_SPEED, TILE_PX, WALK_LAYER, WANDER_INTERVAL_TICKS,
};
use crate::direction::Direction;
use crate::geometry::Rect;
use crate::input::InputSource;
use crate::map::MapRegistry;
use crate::persistence::{self, SaveError};
use crate::systems::{
    npc_movement_system, player_movement_system, wandering_system, Transition,
};

pub struct GameEngine {
    world: World,
    maps: MapRegistry,
    camera: Camera,
    tick: u64,
    transitions: Vec<Transition>,
}

impl GameEngine {
    pub fn new(maps: MapRegistry, screen_width: i32, screen_height: i32) -> Self {
        Self {
            world: World::new(),
            maps,
            camera: Camera::new(screen_width, screen_height),
            tick: 0,
            transitions: Vec::new(),
        }
    }

    /// Spawn the input-driven entity on the central map.
    pub fn spawn_player(&mut self, x: i32, y: i32, sprite: Option<AnimatedSprite>) -> Entity {
        let entity = self.world.spawn((
            Body::new(Rect::new(x, y, TILE_PX, TILE_PX), WALK_LAYER),
            Motion::new(Direction::Down, PLAYER_SPEED, maps::CENTRAL),
            PlayerControlled,
        ));
        if let Some(sprite) = sprite {
            let _ = self.world.insert_one(entity, sprite);
        }
        entity
    }

    /// Spawn an autonomous entity on `map`, initially standing still.
    pub fn spawn_npc(
        &mut self,
        x: i32,
        y: i32,
        map: impl Into<String>,
        sprite: Option<AnimatedSprite>,
    ) -> Entity {
        let entity = self.world.spawn((
            Body::new(Rect::new(x, y, TILE_PX, TILE_PX), WALK_LAYER),
            Motion::new(Direction::Stay, NPC_SPEED, map),
            NpcBrain::new(),
        ));
        if let Some(sprite) = sprite {
            let _ = self.world.insert_one(entity, sprite);
        }
        entity
    }

    /// Advance the simulation one tick against the given input state.
    pub fn update(&mut self, input: &dyn InputSource) {
        player_movement_system(
            &mut self.world,
            &self.maps,
            input,
            &mut self.camera,
            &mut self.transitions,
        );
        npc_movement_system(&mut self.world, &self.maps, &mut self.transitions);
        if self.tick % WANDER_INTERVAL_TICKS == 0 {
            wandering_system(&mut self.world);
        }

        for transition in mem::take(&mut self.transitions) {
            self.apply_transition(transition);
        }

        self.tick += 1;
    }

    fn apply_transition(&mut self, transition: Transition) {
        let entity = transition.entity();
        let destination = transition.destination().to_string();

        let Some(dest_map) = self.maps.get(&destination) else {
            warn!("dropping transition to unknown map {:?}", destination);
            return;
        };

        let origin = match self.world.get::<&Motion>(entity) {
            Ok(motion) => motion.map.clone(),
            Err(_) => return,
        };

        // Land on the reciprocal portal, one tile in from the map edge
        // so the arrival doesn't immediately intersect it again.
        let (mut ax, mut ay) = dest_map
            .portal_to(&origin)
            .or_else(|| dest_map.portals().next())
            .map(|tile| (tile.x, tile.y))
            .unwrap_or((0, 0));
        if ax == 0 {
            ax += 1;
        } else if ax == dest_map.width - 1 {
            ax -= 1;
        }
        if ay == 0 {
            ay += 1;
        } else if ay == dest_map.height - 1 {
            ay -= 1;
        }

        if matches!(transition, Transition::LoadMap { .. }) {
            info!("map change: {} -> {}", origin, destination);
        }

        if let Ok(mut motion) = self.world.get::<&mut Motion>(entity) {
            motion.map = destination;
            motion.moving_ticks = 0;
        }
        if let Ok(mut body) = self.world.get::<&mut Body>(entity) {
            body.rect.x = ax * TILE_PX;
            body.rect.y = ay * TILE_PX;
        }
        if let Ok(mut brain) = self.world.get::<&mut NpcBrain>(entity) {
            brain.route = Default::default();
        }
    }

    /// Snapshot the dynamic state to a writer.
    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_game(writer, &self.world, self.tick, &self.camera)
    }

    /// Replace the dynamic state with a previously saved snapshot. The
    /// map registry is untouched; maps are static data.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let loaded = persistence::load_game(reader)?;
        self.world = loaded.world;
        self.tick = loaded.tick;
        self.camera = loaded.camera;
        self.transitions.clear();
        Ok(())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn maps(&self) -> &MapRegistry {
        &self.maps
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The map `entity` currently lives on.
    pub fn entity_map(&self, entity: Entity) -> Option<String> {
        self.world
            .get::<&Motion>(entity)
            .ok()
            .map(|m| m.map.clone())
    }

    /// The bounding box `entity` currently occupies.
    pub fn entity_rect(&self, entity: Entity) -> Option<Rect> {
        self.world.get::<&Body>(entity).ok().map(|b| b.rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyState;
    use crate::map::{GameMap, MapTile};

    fn linked_maps() -> MapRegistry {
        let mut registry = MapRegistry::new();
        registry.insert(
            GameMap::new(maps::CENTRAL, 10, 10)
                .with_tiles(vec![MapTile::new(0, 4, WALK_LAYER, 40).with_portal("meadow")]),
        );
        registry.insert(
            GameMap::new("meadow", 8, 8)
                .with_center_hop(maps::CENTRAL)
                .with_tiles(vec![
                    MapTile::new(7, 4, WALK_LAYER, 40).with_portal(maps::CENTRAL)
                ]),
        );
        registry
    }

    #[test]
    fn test_player_portal_crossing_relocates_after_tick() {
        let mut engine = GameEngine::new(linked_maps(), 640, 480);
        // Overlapping the central map's portal to the meadow.
        let player = engine.spawn_player(10, 4 * TILE_PX, None);

        engine.update(&KeyState::idle());

        assert_eq!(engine.entity_map(player).as_deref(), Some("meadow"));
        // Arrived on the reciprocal portal's cell, nudged inward from
        // the right edge.
        let rect = engine.entity_rect(player).unwrap();
        assert_eq!((rect.x, rect.y), (6 * TILE_PX, 4 * TILE_PX));
    }

    #[test]
    fn test_unknown_destination_is_dropped() {
        let mut registry = MapRegistry::new();
        registry.insert(
            GameMap::new(maps::CENTRAL, 10, 10)
                .with_tiles(vec![MapTile::new(0, 4, WALK_LAYER, 40).with_portal("nowhere")]),
        );
        let mut engine = GameEngine::new(registry, 640, 480);
        let player = engine.spawn_player(10, 4 * TILE_PX, None);

        engine.update(&KeyState::idle());

        assert_eq!(engine.entity_map(player).as_deref(), Some(maps::CENTRAL));
    }

    #[test]
    fn test_npc_journeys_back_to_central_map() {
        let mut engine = GameEngine::new(linked_maps(), 640, 480);
        let npc = engine.spawn_npc(4 * TILE_PX, 4 * TILE_PX, "meadow", None);

        // Three tiles to the portal at one tile per 16 ticks, plus the
        // crossing itself; 200 ticks is generous. Wandering may later
        // walk the NPC back out, so stop at the first arrival.
        let mut arrived = false;
        for _ in 0..200 {
            engine.update(&KeyState::idle());
            if engine.entity_map(npc).as_deref() == Some(maps::CENTRAL) {
                arrived = true;
                break;
            }
        }

        assert!(arrived);
    }

    #[test]
    fn test_tick_counter_advances_per_update() {
        let mut engine = GameEngine::new(linked_maps(), 640, 480);
        engine.update(&KeyState::idle());
        engine.update(&KeyState::idle());
        assert_eq!(engine.tick(), 2);
    }

    #[test]
    fn test_save_load_roundtrip_preserves_positions() {
        let mut engine = GameEngine::new(linked_maps(), 640, 480);
        engine.spawn_player(5 * TILE_PX, 5 * TILE_PX, Some(AnimatedSprite::new(4)));
        engine.spawn_npc(2 * TILE_PX, 2 * TILE_PX, "meadow", None);
        for _ in 0..10 {
            engine.update(&KeyState { right: true, ..KeyState::default() });
        }

        let mut buf = Vec::new();
        engine.save(&mut buf).unwrap();

        let saved_tick = engine.tick();
        let positions: Vec<Rect> = engine
            .world()
            .query::<&Body>()
            .iter()
            .map(|(_, b)| b.rect)
            .collect();

        let mut restored = GameEngine::new(linked_maps(), 640, 480);
        restored.load(buf.as_slice()).unwrap();

        assert_eq!(restored.tick(), saved_tick);
        let restored_positions: Vec<Rect> = restored
            .world()
            .query::<&Body>()
            .iter()
            .map(|(_, b)| b.rect)
            .collect();
        let mut expected = positions.clone();
        let mut actual = restored_positions.clone();
        expected.sort_by_key(|r| (r.x, r.y));
        actual.sort_by_key(|r| (r.x, r.y));
        assert_eq!(actual, expected);
    }
}
