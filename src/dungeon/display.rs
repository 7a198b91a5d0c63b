use std::fmt;
use super::{DungeonGrid, Tile, TilePos};

impl Tile {
    pub fn ascii_char(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
        }
    }
}

impl fmt::Display for DungeonGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|tile| tile.ascii_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Text renderer that overlays actors on top of the tile map.
pub struct DungeonRenderer {
    pub player: Option<TilePos>,
    pub enemies: Vec<TilePos>,
}

impl DungeonRenderer {
    pub fn new() -> Self {
        Self {
            player: None,
            enemies: Vec::new(),
        }
    }

    pub fn with_player(mut self, player: TilePos) -> Self {
        self.player = Some(player);
        self
    }

    pub fn with_enemies(mut self, enemies: impl IntoIterator<Item = TilePos>) -> Self {
        self.enemies = enemies.into_iter().collect();
        self
    }

    pub fn render(&self, grid: &DungeonGrid) -> Vec<String> {
        (0..grid.height())
            .map(|y| {
                (0..grid.width())
                    .map(|x| self.get_tile_representation(grid, TilePos::new(x, y)))
                    .collect()
            })
            .collect()
    }

    /// Square window of `view_distance` tiles around `center`, clipped to the grid.
    pub fn render_view(&self, grid: &DungeonGrid, center: TilePos, view_distance: i32) -> Vec<String> {
        let start_x = (center.x - view_distance).max(0);
        let end_x = (center.x + view_distance).min(grid.width() - 1);
        let start_y = (center.y - view_distance).max(0);
        let end_y = (center.y + view_distance).min(grid.height() - 1);

        (start_y..=end_y)
            .map(|y| {
                (start_x..=end_x)
                    .map(|x| self.get_tile_representation(grid, TilePos::new(x, y)))
                    .collect()
            })
            .collect()
    }

    fn get_tile_representation(&self, grid: &DungeonGrid, pos: TilePos) -> char {
        if self.player == Some(pos) {
            return '@';
        }
        if self.enemies.contains(&pos) {
            return 'e';
        }
        grid.get(pos).map(Tile::ascii_char).unwrap_or(' ')
    }
}

impl Default for DungeonRenderer {
    fn default() -> Self {
        Self::new()
    }
}
