//! NPC movement controller.
//!
//! NPCs follow consumable routes one tile-sized step at a time. A step
//! is popped only when the cooldown window has elapsed, so motion reads
//! as discrete per-tile moves; between pops the previous direction keeps
//! applying. An NPC stranded off the central map asks navigation for a
//! route to the portal leading home; an idle NPC on the central map
//! stands still.

use hecs::World;
use log::debug;

use crate::animation::AnimatedSprite;
use crate::components::{Body, Motion, NpcBrain};
use crate::constants::{maps, ROUTE_STEP_TICKS};
use crate::direction::Direction;
use crate::map::MapRegistry;
use crate::navigation;
use crate::route::Route;
use crate::systems::{walking, Transition};

/// Frames per direction row on the NPC sheets.
const NPC_FRAMES_PER_ROW: u32 = 8;

pub fn npc_movement_system(
    world: &mut World,
    registry: &MapRegistry,
    transitions: &mut Vec<Transition>,
) {
    for (entity, (body, motion, brain, mut sprite)) in world
        .query::<(
            &mut Body,
            &mut Motion,
            &mut NpcBrain,
            Option<&mut AnimatedSprite>,
        )>()
        .iter()
    {
        let Some(map) = registry.get(&motion.map) else {
            debug!("npc on unknown map {:?}, skipping", motion.map);
            continue;
        };

        let mut next = motion.direction;

        // Off the central map with nothing planned: head home.
        if brain.route.is_empty() && motion.map != maps::CENTRAL {
            if let Some(portal) = navigation::next_hop_toward_center(registry, &motion.map) {
                brain.route = navigation::route_to_tile(&body.rect, portal);
                motion.moving_ticks = ROUTE_STEP_TICKS;
                debug!(
                    "npc on {} planned {} steps toward center",
                    motion.map,
                    brain.route.len()
                );
            }
        }

        if motion.moving_ticks < 1 && !brain.route.is_empty() {
            next = brain.route.next_step();
            motion.moving_ticks = ROUTE_STEP_TICKS;
            debug!("npc step {:?}, cooldown {}", next, motion.moving_ticks);
        }

        if brain.route.is_empty() && motion.map == maps::CENTRAL {
            next = Direction::Stay;
        }

        if walking::blocked(map, &body.rect, next, motion.speed, body.layer) {
            // Abandon the route and re-evaluate from scratch next tick.
            brain.route = Route::new();
            motion.moving_ticks = 0;
            walking::nudge(&mut body.rect, next);
        } else {
            walking::step_within_bounds(map, &mut body.rect, next, motion.speed);
        }
        let moving = next != Direction::Stay;

        if next != motion.direction {
            motion.direction = next;
            if let Some(sprite) = sprite.as_deref_mut() {
                if next == Direction::Stay {
                    sprite.set_animation_range(0, 1);
                } else {
                    let idx = next.index();
                    sprite.set_animation_range(
                        idx * NPC_FRAMES_PER_ROW,
                        idx * NPC_FRAMES_PER_ROW + (NPC_FRAMES_PER_ROW - 1),
                    );
                }
            }
        }

        if let Some(sprite) = sprite.as_deref_mut() {
            if moving {
                sprite.update();
            } else {
                sprite.reset();
            }
        }

        if let Some(tile) = walking::portal_at(map, &body.rect) {
            if let Some(portal) = &tile.portal {
                transitions.push(Transition::MoveNpc {
                    entity,
                    destination: portal.destination.clone(),
                });
            }
        }

        motion.moving_ticks -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{NPC_SPEED, TILE_PX, WALK_LAYER};
    use crate::geometry::Rect;
    use crate::map::{GameMap, MapTile};

    fn two_map_registry() -> MapRegistry {
        let mut registry = MapRegistry::new();
        registry.insert(
            GameMap::new(maps::CENTRAL, 10, 10)
                .with_tiles(vec![MapTile::new(9, 4, WALK_LAYER, 40).with_portal("meadow")]),
        );
        registry.insert(
            GameMap::new("meadow", 8, 8)
                .with_center_hop(maps::CENTRAL)
                .with_tiles(vec![
                    MapTile::new(0, 4, WALK_LAYER, 40).with_portal(maps::CENTRAL)
                ]),
        );
        registry
    }

    fn spawn_npc(world: &mut World, x: i32, y: i32, map: &str) -> hecs::Entity {
        world.spawn((
            Body::new(Rect::new(x, y, TILE_PX, TILE_PX), WALK_LAYER),
            Motion::new(Direction::Stay, NPC_SPEED, map),
            NpcBrain::new(),
        ))
    }

    fn tick(world: &mut World, registry: &MapRegistry) -> Vec<Transition> {
        let mut transitions = Vec::new();
        npc_movement_system(world, registry, &mut transitions);
        transitions
    }

    #[test]
    fn test_route_refill_off_center() {
        let registry = two_map_registry();
        let mut world = World::new();
        let npc = spawn_npc(&mut world, 4 * TILE_PX, 4 * TILE_PX, "meadow");

        tick(&mut world, &registry);

        let brain = world.get::<&NpcBrain>(npc).unwrap();
        let motion = world.get::<&Motion>(npc).unwrap();
        assert_eq!(brain.route.len(), 4); // four tiles left to the portal
        // Cooldown was set to 16 and then decremented unconditionally.
        assert_eq!(motion.moving_ticks, ROUTE_STEP_TICKS - 1);
    }

    #[test]
    fn test_elapsed_cooldown_consumes_exactly_one_step() {
        let registry = two_map_registry();
        let mut world = World::new();
        let npc = spawn_npc(&mut world, 4 * TILE_PX, 4 * TILE_PX, "meadow");
        {
            let mut brain = world.get::<&mut NpcBrain>(npc).unwrap();
            for _ in 0..3 {
                brain.route.push(Direction::Left);
            }
        }

        tick(&mut world, &registry);

        let brain = world.get::<&NpcBrain>(npc).unwrap();
        let motion = world.get::<&Motion>(npc).unwrap();
        assert_eq!(brain.route.len(), 2);
        assert_eq!(motion.moving_ticks, ROUTE_STEP_TICKS - 1);
        assert_eq!(motion.direction, Direction::Left);
        let body = world.get::<&Body>(npc).unwrap();
        assert_eq!(body.rect.x, 4 * TILE_PX - NPC_SPEED);
    }

    #[test]
    fn test_idle_on_central_map_stays_put() {
        let registry = two_map_registry();
        let mut world = World::new();
        let npc = spawn_npc(&mut world, 3 * TILE_PX, 3 * TILE_PX, maps::CENTRAL);

        for _ in 0..20 {
            tick(&mut world, &registry);
        }

        let body = world.get::<&Body>(npc).unwrap();
        let motion = world.get::<&Motion>(npc).unwrap();
        assert_eq!((body.rect.x, body.rect.y), (3 * TILE_PX, 3 * TILE_PX));
        assert_eq!(motion.direction, Direction::Stay);
        // The cooldown keeps counting down past zero; only `< 1` matters.
        assert!(motion.moving_ticks < 0);
    }

    #[test]
    fn test_previous_direction_continues_during_cooldown() {
        let registry = two_map_registry();
        let mut world = World::new();
        let npc = spawn_npc(&mut world, 4 * TILE_PX, 4 * TILE_PX, "meadow");
        {
            let mut brain = world.get::<&mut NpcBrain>(npc).unwrap();
            brain.route.push(Direction::Up);
            brain.route.push(Direction::Up);
        }

        // First tick pops Up; the following ticks keep moving Up while
        // the cooldown winds down.
        for _ in 0..5 {
            tick(&mut world, &registry);
        }

        let body = world.get::<&Body>(npc).unwrap();
        assert_eq!(body.rect.y, 4 * TILE_PX - 5 * NPC_SPEED);
        let brain = world.get::<&NpcBrain>(npc).unwrap();
        assert_eq!(brain.route.len(), 1);
    }

    #[test]
    fn test_blocked_step_abandons_route_and_nudges() {
        let mut registry = MapRegistry::new();
        registry.insert(
            GameMap::new("meadow", 8, 8)
                .with_center_hop(maps::CENTRAL)
                .with_tiles(vec![
                    MapTile::new(0, 4, WALK_LAYER, 40).with_portal(maps::CENTRAL),
                    MapTile::new(3, 4, WALK_LAYER, 7),
                ]),
        );
        let mut world = World::new();
        // Directly right of the solid tile, mid-route heading left.
        let npc = spawn_npc(&mut world, 4 * TILE_PX, 4 * TILE_PX, "meadow");
        {
            let mut motion = world.get::<&mut Motion>(npc).unwrap();
            motion.direction = Direction::Left;
            let mut brain = world.get::<&mut NpcBrain>(npc).unwrap();
            brain.route.push(Direction::Left);
            brain.route.push(Direction::Left);
        }

        tick(&mut world, &registry);

        let body = world.get::<&Body>(npc).unwrap();
        let brain = world.get::<&NpcBrain>(npc).unwrap();
        let motion = world.get::<&Motion>(npc).unwrap();
        // Nudged one pixel opposite, never the full step.
        assert_eq!(body.rect.x, 4 * TILE_PX + 1);
        assert!(brain.route.is_empty());
        assert_eq!(motion.moving_ticks, -1);
    }

    #[test]
    fn test_portal_intersection_raises_map_change() {
        let registry = two_map_registry();
        let mut world = World::new();
        // Overlapping the meadow's portal back to the central map.
        let npc = spawn_npc(&mut world, 2, 4 * TILE_PX, "meadow");

        let transitions = tick(&mut world, &registry);

        assert!(transitions.iter().any(|t| matches!(
            t,
            Transition::MoveNpc { entity, destination }
                if *entity == npc && destination == maps::CENTRAL
        )));
    }

    #[test]
    fn test_stay_uses_idle_animation_window() {
        let registry = two_map_registry();
        let mut world = World::new();
        let npc = spawn_npc(&mut world, 3 * TILE_PX, 3 * TILE_PX, maps::CENTRAL);
        {
            let mut motion = world.get::<&mut Motion>(npc).unwrap();
            motion.direction = Direction::Down;
        }
        world.insert_one(npc, AnimatedSprite::new(1)).unwrap();

        tick(&mut world, &registry);

        let sprite = world.get::<&AnimatedSprite>(npc).unwrap();
        assert_eq!(sprite.range(), (0, 1));
    }

    #[test]
    fn test_direction_change_selects_row_window() {
        let registry = two_map_registry();
        let mut world = World::new();
        let npc = spawn_npc(&mut world, 4 * TILE_PX, 4 * TILE_PX, "meadow");
        {
            let mut brain = world.get::<&mut NpcBrain>(npc).unwrap();
            brain.route.push(Direction::Right);
        }
        world.insert_one(npc, AnimatedSprite::new(1)).unwrap();

        tick(&mut world, &registry);

        let sprite = world.get::<&AnimatedSprite>(npc).unwrap();
        let idx = Direction::Right.index();
        assert_eq!(sprite.range(), (idx * 8, idx * 8 + 7));
    }
}
