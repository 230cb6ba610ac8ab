//! Tilewalk headless scenario harness
//!
//! Validates movement logic and the shipped map set without a renderer.
//! Runs entirely in-process — no windowing, no assets, no timing loop.
//!
//! Usage:
//!   cargo run -p tilewalk-simtest
//!   cargo run -p tilewalk-simtest -- --verbose

use serde::Deserialize;

use tilewalk_core::constants::{maps, TILE_PX, WALK_LAYER};
use tilewalk_core::{GameEngine, KeyState, MapRegistry, NpcBrain};

// ── Map set (same JSON a game frontend would load) ──────────────────────
const MAP_SET_JSON: &str = include_str!("../../../data/maps.json");

#[derive(Debug, Deserialize)]
struct MapSetSpec {
    maps: Vec<MapSpec>,
}

#[derive(Debug, Deserialize)]
struct MapSpec {
    name: String,
    width: i32,
    height: i32,
    #[serde(default)]
    center_hop: Option<String>,
    #[serde(default)]
    tiles: Vec<TileSpec>,
}

#[derive(Debug, Deserialize)]
struct TileSpec {
    x: i32,
    y: i32,
    layer: usize,
    #[allow(dead_code)]
    tile_id: u32,
    #[serde(default)]
    portal: Option<PortalSpec>,
}

#[derive(Debug, Deserialize)]
struct PortalSpec {
    destination: String,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Tilewalk Scenario Harness ===\n");

    let mut results = Vec::new();

    // 1. Map set validation
    results.extend(validate_map_set(verbose));

    // 2. Player movement scenarios
    results.extend(run_player_scenarios(verbose));

    // 3. NPC travel scenarios
    results.extend(run_npc_scenarios(verbose));

    // 4. Save/load roundtrip
    results.extend(run_persistence_scenarios(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn registry() -> MapRegistry {
    MapRegistry::from_json(MAP_SET_JSON).expect("shipped map set parses")
}

// ── 1. Map set validation ───────────────────────────────────────────────

fn validate_map_set(_verbose: bool) -> Vec<TestResult> {
    println!("--- Map Set ---");
    let mut results = Vec::new();

    let spec: MapSetSpec = match serde_json::from_str(MAP_SET_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "map_set_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "map_set_not_empty".into(),
        passed: !spec.maps.is_empty(),
        detail: format!("{} maps loaded", spec.maps.len()),
    });

    results.push(TestResult {
        name: "central_map_present".into(),
        passed: spec.maps.iter().any(|m| m.name == maps::CENTRAL),
        detail: format!("central map is {:?}", maps::CENTRAL),
    });

    // All tiles within their map's grid
    let out_of_bounds: Vec<_> = spec
        .maps
        .iter()
        .flat_map(|m| {
            m.tiles
                .iter()
                .filter(|t| t.x < 0 || t.y < 0 || t.x >= m.width || t.y >= m.height)
                .map(|t| format!("{}:({},{})", m.name, t.x, t.y))
        })
        .collect();
    results.push(TestResult {
        name: "tiles_in_bounds".into(),
        passed: out_of_bounds.is_empty(),
        detail: if out_of_bounds.is_empty() {
            "all tiles inside their grids".into()
        } else {
            format!("out of bounds: {}", out_of_bounds.join(", "))
        },
    });

    // Every portal destination must name a loaded map
    let dangling: Vec<_> = spec
        .maps
        .iter()
        .flat_map(|m| {
            m.tiles
                .iter()
                .filter_map(|t| t.portal.as_ref())
                .filter(|p| !spec.maps.iter().any(|d| d.name == p.destination))
                .map(move |p| format!("{} -> {}", m.name, p.destination))
        })
        .collect();
    results.push(TestResult {
        name: "portal_destinations_exist".into(),
        passed: dangling.is_empty(),
        detail: if dangling.is_empty() {
            "all portals lead somewhere".into()
        } else {
            format!("dangling portals: {}", dangling.join(", "))
        },
    });

    // Portals must sit on the walk layer or entities never touch them
    let off_layer = spec
        .maps
        .iter()
        .flat_map(|m| m.tiles.iter())
        .filter(|t| t.portal.is_some() && t.layer != WALK_LAYER)
        .count();
    results.push(TestResult {
        name: "portals_on_walk_layer".into(),
        passed: off_layer == 0,
        detail: format!("{} portals off the walk layer", off_layer),
    });

    // Every crossing must be reversible, or an arriving entity has no
    // reciprocal portal to land on.
    let one_way: Vec<_> = spec
        .maps
        .iter()
        .flat_map(|m| {
            m.tiles
                .iter()
                .filter_map(|t| t.portal.as_ref())
                .filter(|p| {
                    spec.maps
                        .iter()
                        .find(|d| d.name == p.destination)
                        .is_some_and(|d| {
                            !d.tiles.iter().any(|t| {
                                t.portal.as_ref().is_some_and(|back| back.destination == m.name)
                            })
                        })
                })
                .map(move |p| format!("{} -> {}", m.name, p.destination))
        })
        .collect();
    results.push(TestResult {
        name: "portals_reciprocated".into(),
        passed: one_way.is_empty(),
        detail: if one_way.is_empty() {
            "all crossings reversible".into()
        } else {
            format!("one-way portals: {}", one_way.join(", "))
        },
    });

    // center_hop chains must terminate at the central map
    for map in &spec.maps {
        if map.name == maps::CENTRAL {
            continue;
        }
        let mut current = map;
        let mut hops = 0;
        let reaches = loop {
            let Some(hop) = current.center_hop.as_deref() else {
                break false;
            };
            if hop == maps::CENTRAL {
                break true;
            }
            let Some(next) = spec.maps.iter().find(|m| m.name == hop) else {
                break false;
            };
            current = next;
            hops += 1;
            if hops > spec.maps.len() {
                break false; // cycle
            }
        };
        results.push(TestResult {
            name: format!("center_chain_{}", map.name),
            passed: reaches,
            detail: if reaches {
                format!("{} reaches the central map", map.name)
            } else {
                format!("{} has no path to the central map", map.name)
            },
        });
    }

    results
}

// ── 2. Player scenarios ─────────────────────────────────────────────────

fn run_player_scenarios(_verbose: bool) -> Vec<TestResult> {
    println!("--- Player Movement ---");
    let mut results = Vec::new();

    // Walking into the wall at (3..=5, 3) on main never passes it.
    {
        let mut engine = GameEngine::new(registry(), 640, 480);
        let player = engine.spawn_player(6 * TILE_PX, 3 * TILE_PX, None);
        let left = KeyState { left: true, ..KeyState::default() };
        for _ in 0..30 {
            engine.update(&left);
        }
        let rect = engine.entity_rect(player).unwrap_or_default();
        results.push(TestResult {
            name: "player_wall_blocks".into(),
            passed: rect.x >= 6 * TILE_PX,
            detail: format!("x = {} after 30 blocked ticks", rect.x),
        });
    }

    // Walking left on the portal row crosses into the meadow.
    {
        let mut engine = GameEngine::new(registry(), 640, 480);
        let player = engine.spawn_player(2 * TILE_PX, 7 * TILE_PX, None);
        let left = KeyState { left: true, ..KeyState::default() };
        let mut crossed_at = None;
        for tick in 0..40 {
            engine.update(&left);
            if engine.entity_map(player).as_deref() == Some("meadow") {
                crossed_at = Some(tick);
                break;
            }
        }
        results.push(TestResult {
            name: "player_portal_crossing".into(),
            passed: crossed_at.is_some(),
            detail: match crossed_at {
                Some(t) => format!("crossed to meadow on tick {}", t),
                None => "never crossed".into(),
            },
        });
    }

    // Without input nothing moves, including the camera.
    {
        let mut engine = GameEngine::new(registry(), 640, 480);
        let player = engine.spawn_player(2 * TILE_PX, 2 * TILE_PX, None);
        for _ in 0..10 {
            engine.update(&KeyState::idle());
        }
        let rect = engine.entity_rect(player).unwrap_or_default();
        let still = (rect.x, rect.y) == (2 * TILE_PX, 2 * TILE_PX)
            && (engine.camera().rect.x, engine.camera().rect.y) == (0, 0);
        results.push(TestResult {
            name: "player_idle_is_still".into(),
            passed: still,
            detail: format!("rect at ({}, {})", rect.x, rect.y),
        });
    }

    results
}

// ── 3. NPC scenarios ────────────────────────────────────────────────────

fn run_npc_scenarios(_verbose: bool) -> Vec<TestResult> {
    println!("--- NPC Travel ---");
    let mut results = Vec::new();

    // An NPC two maps out walks home through the meadow.
    {
        let mut engine = GameEngine::new(registry(), 640, 480);
        let npc = engine.spawn_npc(6 * TILE_PX, 6 * TILE_PX, "cellar", None);
        let mut visited_meadow = false;
        let mut arrived_at = None;
        for tick in 0..800 {
            engine.update(&KeyState::idle());
            match engine.entity_map(npc).as_deref() {
                Some("meadow") => visited_meadow = true,
                Some(m) if m == maps::CENTRAL => {
                    arrived_at = Some(tick);
                    break;
                }
                _ => {}
            }
        }
        results.push(TestResult {
            name: "npc_returns_to_center".into(),
            passed: visited_meadow && arrived_at.is_some(),
            detail: match arrived_at {
                Some(t) => format!("home via meadow on tick {}", t),
                None => "never arrived".into(),
            },
        });
    }

    // An NPC on the central map stays on it (wandering included).
    {
        let mut engine = GameEngine::new(registry(), 640, 480);
        let npc = engine.spawn_npc(8 * TILE_PX, 12 * TILE_PX, maps::CENTRAL, None);
        let mut stayed = true;
        for _ in 0..200 {
            engine.update(&KeyState::idle());
            if engine.entity_map(npc).as_deref() != Some(maps::CENTRAL) {
                stayed = false;
                break;
            }
        }
        results.push(TestResult {
            name: "npc_home_keeps_wandering_local".into(),
            passed: stayed,
            detail: if stayed {
                "still on the central map after 200 ticks".into()
            } else {
                format!("left to {:?}", engine.entity_map(npc))
            },
        });
    }

    results
}

// ── 4. Persistence ──────────────────────────────────────────────────────

fn run_persistence_scenarios(_verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let mut engine = GameEngine::new(registry(), 640, 480);
    engine.spawn_player(2 * TILE_PX, 2 * TILE_PX, None);
    engine.spawn_npc(6 * TILE_PX, 6 * TILE_PX, "cellar", None);
    for _ in 0..50 {
        engine.update(&KeyState::idle());
    }

    let mut buf = Vec::new();
    let saved = engine.save(&mut buf).is_ok();
    results.push(TestResult {
        name: "save_writes".into(),
        passed: saved,
        detail: format!("{} bytes", buf.len()),
    });

    let mut restored = GameEngine::new(registry(), 640, 480);
    match restored.load(buf.as_slice()) {
        Ok(()) => {
            let entities = restored.world().len();
            let npcs = restored.world().query::<&NpcBrain>().iter().count();
            results.push(TestResult {
                name: "load_restores_entities".into(),
                passed: entities == 2 && npcs == 1,
                detail: format!("{} entities, {} npcs, tick {}", entities, npcs, restored.tick()),
            });
        }
        Err(e) => {
            results.push(TestResult {
                name: "load_restores_entities".into(),
                passed: false,
                detail: format!("load failed: {}", e),
            });
        }
    }

    results
}
