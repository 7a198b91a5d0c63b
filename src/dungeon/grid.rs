use serde::{Deserialize, Serialize};
use super::{Room, Tile, TilePos};

/// Fixed-size `height x width` tile matrix, indexed `[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DungeonGrid {
    width: i32,
    height: i32,
    tiles: Vec<Vec<Tile>>,
}

impl DungeonGrid {
    /// All-wall grid. Negative dimensions are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![vec![Tile::Wall; width as usize]; height as usize],
        }
    }

    /// The 0 x 0 grid handed out before anything is generated.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Row count and row lengths agree with the recorded dimensions.
    pub fn is_well_formed(&self) -> bool {
        self.width >= 0
            && self.height >= 0
            && self.tiles.len() == self.height as usize
            && self.tiles.iter().all(|row| row.len() == self.width as usize)
    }

    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn get(&self, pos: TilePos) -> Option<Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.tiles[pos.y as usize][pos.x as usize])
    }

    pub fn is_floor(&self, pos: TilePos) -> bool {
        self.get(pos).is_some_and(Tile::is_walkable)
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    /// Row-major 0/1 matrix, 0 for wall and 1 for floor.
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.tiles
            .iter()
            .map(|row| row.iter().map(|tile| tile.code()).collect())
            .collect()
    }

    pub fn floor_count(&self) -> usize {
        self.tiles
            .iter()
            .map(|row| row.iter().filter(|tile| **tile == Tile::Floor).count())
            .sum()
    }

    /// Floor positions in row-major order.
    pub fn floor_tiles(&self) -> impl Iterator<Item = TilePos> + '_ {
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, tile)| **tile == Tile::Floor)
                .map(move |(x, _)| TilePos::new(x as i32, y as i32))
        })
    }

    pub fn first_floor(&self) -> Option<TilePos> {
        self.floor_tiles().next()
    }

    /// True when every cell is floor and each step moves to an orthogonal
    /// neighbour.
    pub fn is_walkable_path(&self, cells: &[TilePos]) -> bool {
        cells.iter().all(|pos| self.is_floor(*pos))
            && cells.windows(2).all(|step| {
                let dx = (step[0].x - step[1].x).abs();
                let dy = (step[0].y - step[1].y).abs();
                dx + dy <= 1
            })
    }

    /// Writes floor at `pos`. Out-of-bounds writes are dropped.
    pub(crate) fn carve(&mut self, pos: TilePos) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        self.tiles[pos.y as usize][pos.x as usize] = Tile::Floor;
        true
    }

    pub(crate) fn carve_room(&mut self, room: &Room) {
        for pos in room.tiles() {
            self.carve(pos);
        }
    }

    /// Inclusive horizontal run at row `y`.
    pub(crate) fn carve_horizontal(&mut self, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.carve(TilePos::new(x, y));
        }
    }

    /// Inclusive vertical run at column `x`.
    pub(crate) fn carve_vertical(&mut self, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.carve(TilePos::new(x, y));
        }
    }
}
