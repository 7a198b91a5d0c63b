use crate::dungeon::{DungeonGrid, RandomSource, TilePos, WorldPoint};

pub use crate::dungeon::TILE_SIZE;

pub fn tile_center(pos: TilePos) -> WorldPoint {
    pos.world_center()
}

/// Centre of the first floor tile in row-major order, or `None` when the grid
/// has no floor at all.
pub fn player_spawn(grid: &DungeonGrid) -> Option<WorldPoint> {
    grid.first_floor().map(tile_center)
}

/// Floor tile centres strictly farther than `min_distance` from `player`.
pub fn spawn_candidates(grid: &DungeonGrid, player: WorldPoint, min_distance: f32) -> Vec<WorldPoint> {
    grid.floor_tiles()
        .map(tile_center)
        .filter(|point| point.distance(&player) > min_distance)
        .collect()
}

/// Draws up to `count` distinct points from `candidates`.
pub fn pick_spawn_points<R: RandomSource>(
    mut candidates: Vec<WorldPoint>,
    count: usize,
    rng: &mut R,
) -> Vec<WorldPoint> {
    let mut picked = Vec::with_capacity(count.min(candidates.len()));
    while picked.len() < count && !candidates.is_empty() {
        let index = rng.below(candidates.len() as i32) as usize;
        picked.push(candidates.swap_remove(index));
    }
    picked
}
