//! Player movement controller.
//!
//! Each tick the four input signals are resolved independently, so two
//! active axes produce diagonal movement. Per axis: a blocked step gets
//! the 1px corrective nudge, an edge position next to a portal gets the
//! full step anyway, and anything else in bounds gets the full step.
//! Portal crossings are raised as deferred transitions; the orchestrator
//! applies them once the tick's movement work is done.

use hecs::World;
use log::{debug, info};

use crate::animation::AnimatedSprite;
use crate::camera::Camera;
use crate::components::{Body, Motion, PlayerControlled};
use crate::constants::{CAMERA_MARGIN_X, CAMERA_MARGIN_Y, TILE_PX};
use crate::direction::Direction;
use crate::geometry::Rect;
use crate::input::InputSource;
use crate::map::{GameMap, MapRegistry};
use crate::systems::{walking, Transition};

/// Frame-window span per direction on the player sheet (denser than the
/// NPC sheets).
const PLAYER_FRAME_SPAN: u32 = 12;

pub fn player_movement_system(
    world: &mut World,
    maps: &MapRegistry,
    input: &dyn InputSource,
    camera: &mut Camera,
    transitions: &mut Vec<Transition>,
) {
    for (entity, (body, motion, mut sprite, _)) in world
        .query::<(
            &mut Body,
            &mut Motion,
            Option<&mut AnimatedSprite>,
            &PlayerControlled,
        )>()
        .iter()
    {
        let Some(map) = maps.get(&motion.map) else {
            debug!("player on unknown map {:?}, skipping", motion.map);
            continue;
        };

        let mut moving = false;
        let mut next = motion.direction;
        let speed = motion.speed;
        let layer = body.layer;
        let rect = &mut body.rect;

        if input.left() {
            if walking::blocked(map, rect, Direction::Left, speed, layer) {
                debug!("blocked moving left");
                walking::nudge(rect, Direction::Left);
            } else if rect.x < 1 && walking::near_portal(map, rect) {
                rect.x -= speed;
            } else if rect.x > 0 {
                rect.x -= speed;
            }
            next = Direction::Left;
            moving = true;
        }

        if input.right() {
            if walking::blocked(map, rect, Direction::Right, speed, layer) {
                debug!("blocked moving right");
                walking::nudge(rect, Direction::Right);
            } else if rect.x >= walking::max_x(map, rect) && walking::near_portal(map, rect) {
                rect.x += speed;
            } else if rect.x < walking::max_x(map, rect) {
                rect.x += speed;
            }
            next = Direction::Right;
            moving = true;
        }

        if input.up() {
            if walking::blocked(map, rect, Direction::Up, speed, layer) {
                debug!("blocked moving up");
                walking::nudge(rect, Direction::Up);
            } else if rect.y > 0 {
                rect.y -= speed;
            }
            next = Direction::Up;
            moving = true;
        }

        if input.down() {
            if walking::blocked(map, rect, Direction::Down, speed, layer) {
                debug!("blocked moving down");
                walking::nudge(rect, Direction::Down);
            } else if rect.y >= walking::max_y(map, rect) && walking::near_portal(map, rect) {
                rect.y += speed;
            } else if rect.y < walking::max_y(map, rect) {
                rect.y += speed;
            }
            next = Direction::Down;
            moving = true;
        }

        if next != motion.direction {
            debug!("player direction {:?} -> {:?}", motion.direction, next);
            motion.direction = next;
            if let Some(sprite) = sprite.as_deref_mut() {
                let idx = next.index();
                sprite.set_animation_range(idx, idx + PLAYER_FRAME_SPAN);
            }
        }

        if !moving {
            if let Some(sprite) = sprite.as_deref_mut() {
                sprite.reset();
            }
        }

        if let Some(tile) = walking::portal_at(map, rect) {
            if let Some(portal) = &tile.portal {
                info!("player entering portal to {}", portal.destination);
                transitions.push(Transition::LoadMap {
                    entity,
                    destination: portal.destination.clone(),
                });
            }
        }

        update_camera(map, rect, camera);

        if moving {
            if let Some(sprite) = sprite.as_deref_mut() {
                sprite.update();
            }
        }
    }
}

/// Recenter the camera on the player per axis: follow once the player is
/// past half a viewport and still at least a margin away from the map's
/// trailing edge.
fn update_camera(map: &GameMap, rect: &Rect, camera: &mut Camera) {
    let half_w = camera.rect.width / 2;
    let diff_to_end_x = map.pixel_width() - rect.x;
    if diff_to_end_x + CAMERA_MARGIN_X > half_w && rect.x + TILE_PX > half_w {
        camera.center_x_on(rect.x);
    }

    let half_h = camera.rect.height / 2;
    let diff_to_end_y = map.pixel_height() - rect.y;
    if diff_to_end_y + CAMERA_MARGIN_Y > half_h && rect.y + TILE_PX > half_h {
        camera.center_y_on(rect.y);
    }
}
