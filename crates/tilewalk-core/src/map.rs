//! Map data the movement core reads: layered tiles, portals, and the
//! name → map registry the orchestrator resolves transitions against.
//!
//! The core never creates or destroys tiles. Maps are loaded once from a
//! JSON map set and treated as read-only for the lifetime of the engine.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::TILE_PX;
use crate::geometry::Rect;

/// Marks a tile as a crossing point into another map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portal {
    /// Name of the map this portal leads to.
    pub destination: String,
}

/// One cell of a map grid. Grid coordinates, not pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapTile {
    pub x: i32,
    pub y: i32,
    pub layer: usize,
    pub tile_id: u32,
    #[serde(default)]
    pub portal: Option<Portal>,
}

impl MapTile {
    pub fn new(x: i32, y: i32, layer: usize, tile_id: u32) -> Self {
        Self {
            x,
            y,
            layer,
            tile_id,
            portal: None,
        }
    }

    pub fn with_portal(mut self, destination: impl Into<String>) -> Self {
        self.portal = Some(Portal {
            destination: destination.into(),
        });
        self
    }

    /// The tile's cell in zoomed pixel space.
    pub fn pixel_bounds(&self) -> Rect {
        Rect::new(self.x * TILE_PX, self.y * TILE_PX, TILE_PX, TILE_PX)
    }
}

/// A single map: a named grid of tiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMap {
    pub name: String,
    /// Width and height in tile counts.
    pub width: i32,
    pub height: i32,
    /// Neighbouring map one hop toward the central map. `None` on the
    /// central map itself.
    #[serde(default)]
    pub center_hop: Option<String>,
    #[serde(default)]
    pub tiles: Vec<MapTile>,
}

impl GameMap {
    pub fn new(name: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            center_hop: None,
            tiles: Vec::new(),
        }
    }

    pub fn with_center_hop(mut self, hop: impl Into<String>) -> Self {
        self.center_hop = Some(hop.into());
        self
    }

    pub fn with_tiles(mut self, tiles: Vec<MapTile>) -> Self {
        self.tiles = tiles;
        self
    }

    /// Solid tiles on one layer. Portal tiles are walkable and therefore
    /// excluded — collision and crossing are separate concerns.
    pub fn tiles_on_layer(&self, layer: usize) -> impl Iterator<Item = &MapTile> {
        self.tiles
            .iter()
            .filter(move |t| t.layer == layer && t.portal.is_none())
    }

    pub fn portals(&self) -> impl Iterator<Item = &MapTile> {
        self.tiles.iter().filter(|t| t.portal.is_some())
    }

    /// First portal tile leading to `destination`, if any.
    pub fn portal_to(&self, destination: &str) -> Option<&MapTile> {
        self.portals().find(|t| {
            t.portal
                .as_ref()
                .is_some_and(|p| p.destination == destination)
        })
    }

    pub fn pixel_width(&self) -> i32 {
        self.width * TILE_PX
    }

    pub fn pixel_height(&self) -> i32 {
        self.height * TILE_PX
    }
}

/// Errors raised while loading or resolving maps.
#[derive(Debug)]
pub enum MapError {
    Io(std::io::Error),
    Json(serde_json::Error),
    UnknownMap(String),
}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::Io(e)
    }
}

impl From<serde_json::Error> for MapError {
    fn from(e: serde_json::Error) -> Self {
        MapError::Json(e)
    }
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::Io(e) => write!(f, "IO error: {}", e),
            MapError::Json(e) => write!(f, "Map set parse error: {}", e),
            MapError::UnknownMap(name) => write!(f, "Unknown map: {}", name),
        }
    }
}

impl std::error::Error for MapError {}

/// On-disk shape of a map set file.
#[derive(Serialize, Deserialize)]
struct MapSetFile {
    maps: Vec<GameMap>,
}

/// Name-keyed collection of every loaded map.
#[derive(Debug, Default)]
pub struct MapRegistry {
    maps: HashMap<String, GameMap>,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, map: GameMap) {
        self.maps.insert(map.name.clone(), map);
    }

    pub fn get(&self, name: &str) -> Option<&GameMap> {
        self.maps.get(name)
    }

    pub fn require(&self, name: &str) -> Result<&GameMap, MapError> {
        self.maps
            .get(name)
            .ok_or_else(|| MapError::UnknownMap(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let file: MapSetFile = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for map in file.maps {
            registry.insert(map);
        }
        Ok(registry)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
