//! Route planning for autonomous entities.
//!
//! Deliberately not a pathfinder: a route is a straight directional step
//! sequence toward a target tile, one step per tile cell, horizontal leg
//! first. Obstacles are handled reactively — a blocked step abandons the
//! route and the controller recomputes next tick.

use crate::constants::TILE_PX;
use crate::geometry::Rect;
use crate::map::{MapRegistry, MapTile};
use crate::route::Route;

/// Build a step sequence from an entity's current cell to `target`'s
/// cell. Each step covers exactly one tile of travel.
pub fn route_to_tile(rect: &Rect, target: &MapTile) -> Route {
    use crate::direction::Direction::{Down, Left, Right, Up};

    let from_x = rect.x.div_euclid(TILE_PX);
    let from_y = rect.y.div_euclid(TILE_PX);
    let dx = target.x - from_x;
    let dy = target.y - from_y;

    let mut route = Route::new();
    for _ in 0..dx.abs() {
        route.push(if dx > 0 { Right } else { Left });
    }
    for _ in 0..dy.abs() {
        route.push(if dy > 0 { Down } else { Up });
    }
    route
}

/// The portal tile on `current` that leads one map closer to the central
/// map, per the registry's `center_hop` config. `None` on the central
/// map itself or when the config is incomplete.
pub fn next_hop_toward_center<'a>(maps: &'a MapRegistry, current: &str) -> Option<&'a MapTile> {
    let map = maps.get(current)?;
    let hop = map.center_hop.as_deref()?;
    map.portal_to(hop)
}
