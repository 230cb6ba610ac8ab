//! Ambient wandering for otherwise idle NPCs.
//!
//! Runs on a coarser cadence than the movement systems. Each idle NPC on
//! the central map occasionally picks up a short random route; NPCs
//! mid-route or away from the central map are left to the movement
//! controller.

use hecs::World;
use log::debug;
use rand::Rng;

use crate::components::{Motion, NpcBrain};
use crate::constants::maps;
use crate::direction::Direction;

/// Per-invocation chance that an idle NPC starts wandering.
const WANDER_CHANCE: f32 = 0.1;

const WANDER_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

pub fn wandering_system(world: &mut World) {
    let mut rng = rand::thread_rng();

    for (_, (motion, brain)) in world.query::<(&Motion, &mut NpcBrain)>().iter() {
        if motion.map != maps::CENTRAL || !brain.route.is_empty() {
            continue;
        }
        if rng.gen::<f32>() >= WANDER_CHANCE {
            continue;
        }

        let direction = WANDER_DIRECTIONS[rng.gen_range(0..WANDER_DIRECTIONS.len())];
        let steps = rng.gen_range(1..=3);
        for _ in 0..steps {
            brain.route.push(direction);
        }
        debug!("npc wandering {:?} for {} steps", direction, steps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Body;
    use crate::constants::{NPC_SPEED, TILE_PX, WALK_LAYER};
    use crate::geometry::Rect;

    fn spawn_idle_npc(world: &mut World, map: &str) -> hecs::Entity {
        world.spawn((
            Body::new(Rect::new(5 * TILE_PX, 5 * TILE_PX, TILE_PX, TILE_PX), WALK_LAYER),
            Motion::new(Direction::Stay, NPC_SPEED, map),
            NpcBrain::new(),
        ))
    }

    #[test]
    fn test_idle_npc_eventually_wanders() {
        let mut world = World::new();
        let npc = spawn_idle_npc(&mut world, maps::CENTRAL);

        // 200 draws at 10% each; the odds of no route are negligible.
        for _ in 0..200 {
            wandering_system(&mut world);
            if !world.get::<&NpcBrain>(npc).unwrap().route.is_empty() {
                break;
            }
        }

        let brain = world.get::<&NpcBrain>(npc).unwrap();
        assert!(!brain.route.is_empty());
        assert!(brain.route.len() <= 3);
    }

    #[test]
    fn test_npc_off_central_map_never_wanders() {
        let mut world = World::new();
        let npc = spawn_idle_npc(&mut world, "meadow");

        for _ in 0..200 {
            wandering_system(&mut world);
        }

        assert!(world.get::<&NpcBrain>(npc).unwrap().route.is_empty());
    }

    #[test]
    fn test_mid_route_npc_is_left_alone() {
        let mut world = World::new();
        let npc = spawn_idle_npc(&mut world, maps::CENTRAL);
        {
            let mut brain = world.get::<&mut NpcBrain>(npc).unwrap();
            brain.route.push(Direction::Up);
        }

        for _ in 0..200 {
            wandering_system(&mut world);
        }

        let brain = world.get::<&NpcBrain>(npc).unwrap();
        assert_eq!(brain.route.len(), 1);
    }
}
