use delve::{
    CorridorOrientation, DungeonGenerator, DungeonRng, GeneratorConfig, Room, ScriptedRandom,
    Tile, TilePos,
};
use proptest::prelude::*;
use rstest::rstest;

fn generate_seeded(width: i32, height: i32, seed: u64) -> DungeonGenerator {
    let mut generator = DungeonGenerator::with_rng(width, height, DungeonRng::new(seed));
    generator.generate();
    generator
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn grid_has_requested_shape(width in 1i32..80, height in 1i32..80, seed in any::<u64>()) {
        let generator = generate_seeded(width, height, seed);
        let grid = generator.dungeon();
        prop_assert_eq!(grid.width(), width);
        prop_assert_eq!(grid.height(), height);
        prop_assert_eq!(grid.rows().len(), height as usize);
        prop_assert!(grid.rows().iter().all(|row| row.len() == width as usize));
        prop_assert!(grid.to_codes().iter().flatten().all(|code| *code <= 1));
    }

    #[test]
    fn accepted_rooms_never_touch(seed in any::<u64>()) {
        let generator = generate_seeded(50, 50, seed);
        let rooms = &generator.report().rooms;
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                prop_assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
                prop_assert!(!b.overlaps(a), "{:?} overlaps {:?}", b, a);
            }
        }
    }

    #[test]
    fn rooms_are_fully_carved_inside_margin(seed in any::<u64>()) {
        let generator = generate_seeded(50, 50, seed);
        let grid = generator.dungeon();
        for room in &generator.report().rooms {
            prop_assert!(room.x >= 1 && room.y >= 1);
            prop_assert!(room.x + room.width <= 48);
            prop_assert!(room.y + room.height <= 48);
            prop_assert!((5..=12).contains(&room.width));
            prop_assert!((5..=12).contains(&room.height));
            prop_assert!(room.tiles().all(|pos| grid.is_floor(pos)));
        }
    }

    #[test]
    fn consecutive_rooms_are_joined(seed in any::<u64>()) {
        let generator = generate_seeded(50, 50, seed);
        let report = generator.report();
        let grid = generator.dungeon();
        prop_assert_eq!(report.corridors.len(), report.rooms.len().saturating_sub(1));
        for (corridor, pair) in report.corridors.iter().zip(report.rooms.windows(2)) {
            prop_assert_eq!(corridor.from, pair[0].center());
            prop_assert_eq!(corridor.to, pair[1].center());
            prop_assert!(grid.is_floor(corridor.from));
            prop_assert!(grid.is_floor(corridor.to));
            prop_assert!(grid.is_walkable_path(&corridor.path()));
        }
    }

    #[test]
    fn same_draws_give_same_grid(seed in any::<u64>(), width in 10i32..70, height in 10i32..70) {
        let a = generate_seeded(width, height, seed);
        let b = generate_seeded(width, height, seed);
        prop_assert_eq!(a.dungeon(), b.dungeon());
        prop_assert_eq!(a.report(), b.report());
    }

    #[test]
    fn scripted_draws_are_reproducible(draws in prop::collection::vec(0.0f64..1.0, 1..64)) {
        let mut a = DungeonGenerator::with_rng(40, 40, ScriptedRandom::new(draws.clone()));
        let mut b = DungeonGenerator::with_rng(40, 40, ScriptedRandom::new(draws));
        prop_assert_eq!(a.generate().to_codes(), b.generate().to_codes());
    }

    #[test]
    fn floor_count_is_reported(seed in any::<u64>()) {
        let generator = generate_seeded(60, 40, seed);
        prop_assert_eq!(generator.report().floor_tiles, generator.dungeon().floor_count());
        prop_assert_eq!(generator.report().is_degenerate(), generator.dungeon().floor_count() == 0);
    }
}

#[rstest]
#[case(1, 1)]
#[case(3, 3)]
#[case(7, 7)]
#[case(7, 40)]
fn tiny_grids_degrade_to_solid_wall(#[case] width: i32, #[case] height: i32) {
    let mut generator = DungeonGenerator::with_rng(width, height, DungeonRng::new(99));
    let grid = generator.generate();
    assert_eq!(grid.width(), width);
    assert_eq!(grid.height(), height);
    assert!(grid.rows().iter().flatten().all(|tile| *tile == Tile::Wall));
    assert!(generator.report().is_degenerate());
    assert!(generator.report().corridors.is_empty());
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(3)]
fn ten_by_ten_never_panics(#[case] seed: u64) {
    let mut generator = DungeonGenerator::with_rng(10, 10, DungeonRng::new(seed));
    let grid = generator.generate();
    assert_eq!((grid.width(), grid.height()), (10, 10));
}

#[test]
fn minimum_draws_on_fifty_by_fifty() {
    let mut generator = DungeonGenerator::with_rng(50, 50, ScriptedRandom::constant(0.0));
    let grid = generator.generate();
    let report = generator.report();

    assert_eq!(report.attempts, 10);
    assert_eq!(report.rooms, vec![Room::new(1, 1, 5, 5)]);
    assert_eq!(report.rejected_overlap + report.accepted_rooms(), 10);
    assert!(report.corridors.is_empty());
    assert_eq!(grid.floor_count(), 25);
}

#[test]
fn maximum_draws_on_fifty_by_fifty() {
    // Just under 1.0 everywhere: 19 attempts, 12x12 rooms pushed to the far edge.
    let mut generator = DungeonGenerator::with_rng(50, 50, ScriptedRandom::constant(0.999_999));
    let grid = generator.generate();
    let report = generator.report();

    assert_eq!(report.attempts, 19);
    assert_eq!(report.rooms, vec![Room::new(36, 36, 12, 12)]);
    assert_eq!(grid.first_floor(), Some(TilePos::new(36, 36)));
    assert_eq!(grid.get(TilePos::new(48, 48)), Some(Tile::Wall));
}

#[test]
fn horizontal_first_corridor_bends_at_target_column() {
    let mut draws = vec![0.0];
    draws.extend([0.0, 0.0, 0.0, 0.0]);
    // Second room pushed right and down.
    draws.extend([0.0, 0.0, 0.9, 0.9]);
    for _ in 0..8 {
        draws.extend([0.0, 0.0, 0.0, 0.0]);
    }
    draws.push(0.1);

    let mut generator = DungeonGenerator::with_rng(50, 50, ScriptedRandom::new(draws));
    let grid = generator.generate();
    let report = generator.report();

    assert_eq!(report.rooms.len(), 2);
    let corridor = report.corridors[0];
    assert_eq!(corridor.orientation, CorridorOrientation::HorizontalFirst);
    assert_eq!(corridor.elbow(), TilePos::new(corridor.to.x, corridor.from.y));
    assert!(grid.is_walkable_path(&corridor.path()));
}

#[test]
fn config_with_custom_room_sizes() {
    let config = GeneratorConfig {
        width: 30,
        height: 30,
        room_count_base: 4,
        room_count_spread: 0,
        min_room_size: 3,
        max_room_size: 3,
        margin: 2,
    };
    let mut generator = DungeonGenerator::from_config(config, DungeonRng::new(5));
    generator.generate();
    let report = generator.report();
    assert_eq!(report.attempts, 4);
    for room in &report.rooms {
        assert_eq!((room.width, room.height), (3, 3));
        assert!(room.x >= 2 && room.x + room.width <= 30 - 3);
        assert!(room.y >= 2 && room.y + room.height <= 30 - 3);
    }
}
