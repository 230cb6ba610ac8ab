//! Collision-aware step primitives shared by the player and NPC
//! controllers. Everything here is a pure boundary comparison over the
//! active map's tiles — no panics, no side effects beyond the rect a
//! caller hands in.

use crate::constants::TILE_PX;
use crate::direction::Direction;
use crate::geometry::Rect;
use crate::map::{GameMap, MapTile};

/// Would one tick of movement in `direction` at `speed` intersect any
/// solid tile on the entity's own layer? Tiles on other layers never
/// block. `Stay` is never blocked.
pub fn blocked(
    map: &GameMap,
    rect: &Rect,
    direction: Direction,
    speed: i32,
    layer: usize,
) -> bool {
    if direction == Direction::Stay {
        return false;
    }
    let (dx, dy) = direction.offset(speed);
    let (next_x, next_y) = (rect.x + dx, rect.y + dy);
    map.tiles_on_layer(layer)
        .any(|tile| rect.would_intersect_at(next_x, next_y, &tile.pixel_bounds()))
}

/// Corrective 1px offset opposite the attempted direction. Keeps a
/// blocked entity pressed against the obstacle instead of jittering at
/// the boundary. Shared by both controllers.
pub fn nudge(rect: &mut Rect, direction: Direction) {
    let (dx, dy) = direction.offset(1);
    rect.x -= dx;
    rect.y -= dy;
}

/// Is the rect within one tile cell of any portal on both axes? This
/// relaxed check is what permits stepping past the nominal map boundary
/// when an edge portal justifies it.
pub fn near_portal(map: &GameMap, rect: &Rect) -> bool {
    map.portals().any(|portal| {
        let bounds = portal.pixel_bounds();
        (bounds.x - rect.x).abs() <= TILE_PX && (bounds.y - rect.y).abs() <= TILE_PX
    })
}

/// First portal tile the rect truly intersects. Intersection, not
/// proximity, is what triggers a map change.
pub fn portal_at<'a>(map: &'a GameMap, rect: &Rect) -> Option<&'a MapTile> {
    map.portals()
        .find(|portal| rect.intersects(&portal.pixel_bounds()))
}

/// Largest x the rect may occupy while staying inside the map.
pub fn max_x(map: &GameMap, rect: &Rect) -> i32 {
    map.pixel_width() - rect.width
}

/// Largest y the rect may occupy while staying inside the map.
pub fn max_y(map: &GameMap, rect: &Rect) -> i32 {
    map.pixel_height() - rect.height
}

/// Move the rect one tick in `direction` if the destination stays within
/// map bounds, or regardless of bounds when a portal is near. Collision
/// must already have been checked by the caller.
pub fn step_within_bounds(map: &GameMap, rect: &mut Rect, direction: Direction, speed: i32) {
    match direction {
        Direction::Left => {
            if rect.x > 0 || near_portal(map, rect) {
                rect.x -= speed;
            }
        }
        Direction::Right => {
            if rect.x < max_x(map, rect) || near_portal(map, rect) {
                rect.x += speed;
            }
        }
        Direction::Up => {
            if rect.y > 0 || near_portal(map, rect) {
                rect.y -= speed;
            }
        }
        Direction::Down => {
            if rect.y < max_y(map, rect) || near_portal(map, rect) {
                rect.y += speed;
            }
        }
        Direction::Stay => {}
    }
}
