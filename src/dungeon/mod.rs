use serde::{Deserialize, Serialize};

pub mod display;
pub mod generator;
pub mod grid;
pub mod persistence;
pub mod random;
pub mod room;

pub use display::*;
pub use generator::*;
pub use grid::*;
pub use persistence::*;
pub use random::*;
pub use room::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall = 0,
    Floor = 1,
}

impl Tile {
    /// 0 for wall, 1 for floor.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Tile::Wall),
            1 => Some(Tile::Floor),
            _ => None,
        }
    }

    pub fn is_walkable(self) -> bool {
        self == Tile::Floor
    }
}

/// Grid coordinates: column `x`, row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Pixel position of the middle of this tile.
    pub fn world_center(&self) -> WorldPoint {
        let half = TILE_SIZE / 2.0;
        WorldPoint::new(self.x as f32 * TILE_SIZE + half, self.y as f32 * TILE_SIZE + half)
    }
}

/// Side length of a tile in world pixels.
pub const TILE_SIZE: f32 = 32.0;

/// Continuous position in world pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Tile containing this point. Negative coordinates map to negative tiles.
    pub fn to_tile(&self) -> TilePos {
        TilePos::new((self.x / TILE_SIZE).floor() as i32, (self.y / TILE_SIZE).floor() as i32)
    }
}
