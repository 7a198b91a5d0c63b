use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use crate::config::{GeneratorConfig, MAX_ROOM_ATTEMPTS};
use super::{DungeonGrid, DungeonRng, RandomSource, Room, TilePos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorridorOrientation {
    HorizontalFirst,
    VerticalFirst,
}

/// L-shaped connection between the centres of two consecutive rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corridor {
    pub from: TilePos,
    pub to: TilePos,
    pub orientation: CorridorOrientation,
}

impl Corridor {
    /// Where the two legs meet.
    pub fn elbow(&self) -> TilePos {
        match self.orientation {
            CorridorOrientation::HorizontalFirst => TilePos::new(self.to.x, self.from.y),
            CorridorOrientation::VerticalFirst => TilePos::new(self.from.x, self.to.y),
        }
    }

    /// Ordered walk from `from` through the elbow to `to`.
    pub fn path(&self) -> Vec<TilePos> {
        let elbow = self.elbow();
        let mut cells = walk(self.from, elbow);
        cells.extend(walk(elbow, self.to).into_iter().skip(1));
        cells
    }

    fn carve_into(&self, grid: &mut DungeonGrid) {
        match self.orientation {
            CorridorOrientation::HorizontalFirst => {
                grid.carve_horizontal(self.from.x, self.to.x, self.from.y);
                grid.carve_vertical(self.from.y, self.to.y, self.to.x);
            }
            CorridorOrientation::VerticalFirst => {
                grid.carve_vertical(self.from.y, self.to.y, self.from.x);
                grid.carve_horizontal(self.from.x, self.to.x, self.to.y);
            }
        }
    }
}

// Straight line between two points sharing a row or a column.
fn walk(start: TilePos, end: TilePos) -> Vec<TilePos> {
    let step_x = (end.x - start.x).signum();
    let step_y = (end.y - start.y).signum();
    let steps = (end.x - start.x).abs().max((end.y - start.y).abs());
    (0..=steps)
        .map(|i| TilePos::new(start.x + step_x * i, start.y + step_y * i))
        .collect()
}

/// What happened during the last `generate` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub attempts: usize,
    /// In acceptance order.
    pub rooms: Vec<Room>,
    pub rejected_overlap: usize,
    /// Attempts whose sampled room could not fit inside the margins.
    pub skipped_too_small: usize,
    pub corridors: Vec<Corridor>,
    pub floor_tiles: usize,
}

impl GenerationReport {
    pub fn accepted_rooms(&self) -> usize {
        self.rooms.len()
    }

    /// No room was accepted, so the grid is solid wall.
    pub fn is_degenerate(&self) -> bool {
        self.rooms.is_empty()
    }
}

/// Rooms-and-corridors generator: random rooms, overlap rejection, then
/// L-shaped corridors between rooms in acceptance order.
pub struct DungeonGenerator<R = DungeonRng> {
    config: GeneratorConfig,
    rng: R,
    dungeon: DungeonGrid,
    report: GenerationReport,
}

impl DungeonGenerator<DungeonRng> {
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_rng(width, height, DungeonRng::from_entropy())
    }
}

impl<R: RandomSource> DungeonGenerator<R> {
    pub fn with_rng(width: i32, height: i32, rng: R) -> Self {
        Self::from_config(GeneratorConfig::with_size(width, height), rng)
    }

    pub fn from_config(config: GeneratorConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            dungeon: DungeonGrid::empty(),
            report: GenerationReport::default(),
        }
    }

    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Last generated grid, or an empty grid before the first `generate`.
    pub fn dungeon(&self) -> &DungeonGrid {
        &self.dungeon
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    /// Builds a fresh grid and returns a copy the caller owns.
    pub fn generate(&mut self) -> DungeonGrid {
        let config = self.config.clone();
        let mut grid = DungeonGrid::new(config.width, config.height);
        let mut report = GenerationReport::default();

        let attempts = config
            .room_count_base
            .max(0)
            .saturating_add(self.rng.below(config.room_count_spread))
            .min(MAX_ROOM_ATTEMPTS);
        report.attempts = attempts as usize;

        let min_size = config.min_room_size.max(1);
        let margin = config.margin.max(0);
        for attempt in 0..attempts {
            let room_width = min_size.saturating_add(self.rng.below(config.room_size_spread()));
            let room_height = min_size.saturating_add(self.rng.below(config.room_size_spread()));

            // Saturated spans only come out positive when the room really fits.
            let x_span = origin_span(config.width, room_width, margin);
            let y_span = origin_span(config.height, room_height, margin);
            if x_span <= 0 || y_span <= 0 {
                trace!(attempt, room_width, room_height, "room does not fit, skipping");
                report.skipped_too_small += 1;
                continue;
            }

            let x = margin + self.rng.below(x_span);
            let y = margin + self.rng.below(y_span);
            let room = Room::new(x, y, room_width, room_height);

            if report.rooms.iter().any(|existing| room.overlaps(existing)) {
                trace!(attempt, ?room, "room overlaps, discarding");
                report.rejected_overlap += 1;
                continue;
            }

            trace!(attempt, ?room, "room accepted");
            grid.carve_room(&room);
            report.rooms.push(room);
        }

        for pair in report.rooms.windows(2) {
            let orientation = if self.rng.chance(0.5) {
                CorridorOrientation::HorizontalFirst
            } else {
                CorridorOrientation::VerticalFirst
            };
            let corridor = Corridor {
                from: pair[0].center(),
                to: pair[1].center(),
                orientation,
            };
            corridor.carve_into(&mut grid);
            report.corridors.push(corridor);
        }

        report.floor_tiles = grid.floor_count();

        if report.is_degenerate() {
            warn!(
                width = config.width,
                height = config.height,
                attempts,
                "no room could be placed, dungeon is solid wall"
            );
        } else {
            debug!(
                attempts,
                rooms = report.rooms.len(),
                rejected = report.rejected_overlap,
                skipped = report.skipped_too_small,
                floor_tiles = report.floor_tiles,
                "dungeon generated"
            );
        }

        self.dungeon = grid;
        self.report = report;
        self.dungeon.clone()
    }
}

/// Number of valid origins for a room of `size` along an axis of `extent`
/// tiles, or zero or less when it does not fit.
fn origin_span(extent: i32, size: i32, margin: i32) -> i32 {
    extent
        .saturating_sub(size)
        .saturating_sub(margin.saturating_mul(2))
}
