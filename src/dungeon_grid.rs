//! Room-and-corridor dungeon grid: generation, walkability queries, and the
//! two-pass floor/wall draw.

use crate::constants::*;
use crate::error::MapError;
use crate::surface::Surface;
use crate::tile::{CellState, TileRef};
use crate::tile_provider::TileProvider;
use log::info;
use rand::Rng;
use std::rc::Rc;

/// An axis-aligned room rectangle in grid-cell units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center cell, truncating on odd dimensions.
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// The width×height cell grid plus the ordered room list from the last
/// generation pass.
///
/// Coordinates outside the grid read as `Wall`, so the world is closed at
/// its boundary. The provider handle is shared and read-only; the grid
/// stores tile references, never image data.
pub struct DungeonGrid {
    pub width: i32,
    pub height: i32,
    pub tile_size: u32,
    /// Rooms carved per [`generate`](Self::generate) call
    pub room_count: u32,
    /// Minimum room edge in cells
    pub room_min_size: i32,
    /// Maximum room edge in cells
    pub room_max_size: i32,
    /// Rooms in creation order; `rooms[0]` is the spawn room
    pub rooms: Vec<Room>,
    cells: Vec<CellState>,
    floor_ref: TileRef,
    wall_ref: TileRef,
    provider: Rc<TileProvider>,
}

impl DungeonGrid {
    pub fn new(
        width: i32,
        height: i32,
        tile_size: u32,
        floor_ref: TileRef,
        wall_ref: TileRef,
        provider: Rc<TileProvider>,
    ) -> Self {
        Self {
            width,
            height,
            tile_size,
            room_count: ROOM_COUNT,
            room_min_size: ROOM_MIN_SIZE,
            room_max_size: ROOM_MAX_SIZE,
            rooms: Vec::new(),
            cells: vec![CellState::Wall; (width * height) as usize],
            floor_ref,
            wall_ref,
            provider,
        }
    }

    /// Swap the floor and wall tile references used by [`draw`](Self::draw).
    /// References are not validated; an unresolvable one falls back to a
    /// solid-color fill.
    pub fn set_tiles(&mut self, floor_ref: TileRef, wall_ref: TileRef) {
        self.floor_ref = floor_ref;
        self.wall_ref = wall_ref;
    }

    /// Carve a fresh layout: `room_count` random rooms chained by L-shaped
    /// corridors between consecutive room centers.
    ///
    /// The size precondition is checked before any mutation, so on
    /// `InvalidConfiguration` the previous layout is left intact. Rooms may
    /// overlap; later rooms simply re-carve the same cells.
    pub fn generate(&mut self, rng: &mut impl Rng) -> Result<(), MapError> {
        // Placement picks x in [1, width - w - 1]; that range must be
        // non-empty for the largest room.
        let invalid_range = self.room_min_size < 1 || self.room_min_size > self.room_max_size;
        if invalid_range
            || self.width - self.room_max_size - 1 < 1
            || self.height - self.room_max_size - 1 < 1
        {
            return Err(MapError::InvalidConfiguration {
                width: self.width,
                height: self.height,
                min_size: self.room_min_size,
                max_size: self.room_max_size,
            });
        }

        self.rooms.clear();
        self.cells.fill(CellState::Wall);

        for i in 0..self.room_count {
            let w = rng.gen_range(self.room_min_size..=self.room_max_size);
            let h = rng.gen_range(self.room_min_size..=self.room_max_size);
            let x = rng.gen_range(1..=self.width - w - 1);
            let y = rng.gen_range(1..=self.height - h - 1);

            let room = Room::new(x, y, w, h);
            self.rooms.push(room);
            self.carve_room(&room);

            if i > 0 {
                let prev = self.rooms[i as usize - 1].center();
                self.carve_corridor(prev, room.center());
            }
        }

        info!(
            "generated {} rooms on a {}x{} grid",
            self.rooms.len(),
            self.width,
            self.height
        );
        Ok(())
    }

    fn cell_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// Bounds-clipped cell write; out-of-grid writes are silently skipped.
    fn set_cell(&mut self, x: i32, y: i32, state: CellState) {
        if let Some(idx) = self.cell_index(x, y) {
            self.cells[idx] = state;
        }
    }

    fn carve_room(&mut self, room: &Room) {
        for y in room.y..room.y + room.height {
            for x in room.x..room.x + room.width {
                self.set_cell(x, y, CellState::Floor);
            }
        }
    }

    /// Carve an L-shaped corridor: horizontal leg first along `start.y`,
    /// then vertical along `end.x`. Both legs stop one cell short of the
    /// end coordinate, so the bend lands exactly at `end.x`.
    fn carve_corridor(&mut self, start: (i32, i32), end: (i32, i32)) {
        let (x1, y1) = start;
        let (x2, y2) = end;

        let step_x = if x1 < x2 { 1 } else { -1 };
        let mut x = x1;
        while x != x2 {
            self.set_cell(x, y1, CellState::Floor);
            x += step_x;
        }

        let step_y = if y1 < y2 { 1 } else { -1 };
        let mut y = y1;
        while y != y2 {
            self.set_cell(x2, y, CellState::Floor);
            y += step_y;
        }
    }

    /// Current (floor, wall) tile references.
    pub fn tile_refs(&self) -> (TileRef, TileRef) {
        (self.floor_ref, self.wall_ref)
    }

    /// Cell state at (x, y); anything outside the grid is `Wall`.
    pub fn get_tile_at(&self, x: i32, y: i32) -> CellState {
        self.cell_index(x, y)
            .map_or(CellState::Wall, |idx| self.cells[idx])
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get_tile_at(x, y).is_walkable()
    }

    /// Render the visible cell window in two passes: all floors, then all
    /// walls. A wall is drawn only when the cell directly below it is an
    /// in-bounds floor, which keeps only front-facing walls visible, and
    /// the wall pass runs strictly after the floor pass so walls are never
    /// occluded.
    pub fn draw(&self, target: &mut impl Surface, camera_x: i32, camera_y: i32) {
        let ts = self.tile_size as i32;
        let (screen_w, screen_h) = target.size();

        // Window of cells that intersect the target, clipped to the grid.
        let start_x = (camera_x.div_euclid(ts)).max(0);
        let end_x = ((camera_x + screen_w as i32).div_euclid(ts) + 1).min(self.width);
        let start_y = (camera_y.div_euclid(ts)).max(0);
        let end_y = ((camera_y + screen_h as i32).div_euclid(ts) + 1).min(self.height);

        let floor_tile = self
            .provider
            .get_tile(self.floor_ref.sheet, self.floor_ref.index);
        let wall_tile = self
            .provider
            .get_tile(self.wall_ref.sheet, self.wall_ref.index);

        // Pass 1: floors.
        for x in start_x..end_x {
            for y in start_y..end_y {
                if self.get_tile_at(x, y) != CellState::Floor {
                    continue;
                }
                let screen_x = x * ts - camera_x;
                let screen_y = y * ts - camera_y;
                match floor_tile {
                    Some(img) => target.blit(img, screen_x, screen_y),
                    None => target.fill_rect(
                        FLOOR_FALLBACK_COLOR,
                        screen_x,
                        screen_y,
                        self.tile_size,
                        self.tile_size,
                    ),
                }
            }
        }

        // Pass 2: walls standing on a floor cell.
        for x in start_x..end_x {
            for y in start_y..end_y {
                if self.get_tile_at(x, y) != CellState::Wall {
                    continue;
                }
                if y >= self.height - 1 || self.get_tile_at(x, y + 1) != CellState::Floor {
                    continue;
                }
                let screen_x = x * ts - camera_x;
                let screen_y = y * ts - camera_y;
                match wall_tile {
                    Some(img) => target.blit(img, screen_x, screen_y),
                    None => target.fill_rect(
                        WALL_FALLBACK_COLOR,
                        screen_x,
                        screen_y,
                        self.tile_size,
                        self.tile_size,
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Debug, Clone, PartialEq)]
    enum DrawCall {
        Blit { x: i32, y: i32 },
        Fill {
            color: Rgba<u8>,
            x: i32,
            y: i32,
            w: u32,
            h: u32,
        },
    }

    /// Records draw calls instead of producing pixels.
    struct MockSurface {
        width: u32,
        height: u32,
        calls: Vec<DrawCall>,
    }

    impl MockSurface {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                calls: Vec::new(),
            }
        }
    }

    impl Surface for MockSurface {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn blit(&mut self, _image: &RgbaImage, x: i32, y: i32) {
            self.calls.push(DrawCall::Blit { x, y });
        }

        fn fill_rect(&mut self, color: Rgba<u8>, x: i32, y: i32, w: u32, h: u32) {
            self.calls.push(DrawCall::Fill { color, x, y, w, h });
        }
    }

    fn empty_provider() -> Rc<TileProvider> {
        Rc::new(TileProvider::from_images(Vec::new(), 48))
    }

    fn test_grid(width: i32, height: i32) -> DungeonGrid {
        DungeonGrid::new(
            width,
            height,
            48,
            TileRef::new(0, 0),
            TileRef::new(0, 1),
            empty_provider(),
        )
    }

    #[test]
    fn test_room_center_truncates() {
        assert_eq!(Room::new(0, 0, 10, 10).center(), (5, 5));
        assert_eq!(Room::new(5, 5, 7, 9).center(), (8, 9));
    }

    #[test]
    fn test_generate_produces_room_count_rooms() {
        let mut grid = test_grid(50, 50);
        let mut rng = StdRng::seed_from_u64(1);
        grid.generate(&mut rng).unwrap();
        assert_eq!(grid.rooms.len(), 5);
    }

    #[test]
    fn test_rooms_respect_one_cell_border() {
        for seed in 0..20 {
            let mut grid = test_grid(50, 50);
            let mut rng = StdRng::seed_from_u64(seed);
            grid.generate(&mut rng).unwrap();
            for room in &grid.rooms {
                assert!(room.x >= 1 && room.y >= 1);
                assert!(room.x + room.width <= grid.width - 1);
                assert!(room.y + room.height <= grid.height - 1);
                assert!(room.width >= grid.room_min_size && room.width <= grid.room_max_size);
                assert!(room.height >= grid.room_min_size && room.height <= grid.room_max_size);
            }
        }
    }

    #[test]
    fn test_room_interiors_are_floor() {
        let mut grid = test_grid(50, 50);
        let mut rng = StdRng::seed_from_u64(7);
        grid.generate(&mut rng).unwrap();
        for room in grid.rooms.clone() {
            for y in room.y..room.y + room.height {
                for x in room.x..room.x + room.width {
                    assert_eq!(grid.get_tile_at(x, y), CellState::Floor);
                }
            }
        }
    }

    #[test]
    fn test_out_of_bounds_is_wall_and_unwalkable() {
        let grid = test_grid(50, 50);
        for (x, y) in [(-1, 0), (0, -1), (50, 0), (0, 50), (i32::MIN, i32::MAX)] {
            assert_eq!(grid.get_tile_at(x, y), CellState::Wall);
            assert!(!grid.is_walkable(x, y));
        }
    }

    #[test]
    fn test_queries_are_idempotent() {
        let mut grid = test_grid(50, 50);
        let mut rng = StdRng::seed_from_u64(3);
        grid.generate(&mut rng).unwrap();
        let snapshot: Vec<CellState> = (0..grid.height)
            .flat_map(|y| (0..grid.width).map(move |x| (x, y)))
            .map(|(x, y)| grid.get_tile_at(x, y))
            .collect();
        for _ in 0..3 {
            let again: Vec<CellState> = (0..grid.height)
                .flat_map(|y| (0..grid.width).map(move |x| (x, y)))
                .map(|(x, y)| grid.get_tile_at(x, y))
                .collect();
            assert_eq!(snapshot, again);
        }
    }

    #[test]
    fn test_consecutive_rooms_connected_by_l_corridor() {
        for seed in 0..20 {
            let mut grid = test_grid(50, 50);
            let mut rng = StdRng::seed_from_u64(seed);
            grid.generate(&mut rng).unwrap();

            // Re-walk the deterministic horizontal-then-vertical carve and
            // assert every visited cell ended up as floor.
            for pair in grid.rooms.windows(2) {
                let (x1, y1) = pair[0].center();
                let (x2, y2) = pair[1].center();

                let step_x = if x1 < x2 { 1 } else { -1 };
                let mut x = x1;
                while x != x2 {
                    assert!(grid.is_walkable(x, y1), "seed {seed}: ({x},{y1}) not floor");
                    x += step_x;
                }
                let step_y = if y1 < y2 { 1 } else { -1 };
                let mut y = y1;
                while y != y2 {
                    assert!(grid.is_walkable(x2, y), "seed {seed}: ({x2},{y}) not floor");
                    y += step_y;
                }
                // Both endpoints are room centers, floor by construction.
                assert!(grid.is_walkable(x1, y1));
                assert!(grid.is_walkable(x2, y2));
            }
        }
    }

    #[test]
    fn test_generate_replaces_previous_layout() {
        let mut grid = test_grid(50, 50);
        let mut rng = StdRng::seed_from_u64(11);
        grid.generate(&mut rng).unwrap();
        let first_rooms = grid.rooms.clone();
        grid.generate(&mut rng).unwrap();
        assert_eq!(grid.rooms.len(), 5);
        assert_ne!(grid.rooms, first_rooms);
    }

    #[test]
    fn test_generate_rejects_oversized_rooms() {
        // 10x10 grid cannot fit a 15-cell room inside the border.
        let mut grid = test_grid(10, 10);
        let mut rng = StdRng::seed_from_u64(0);
        let err = grid.generate(&mut rng).unwrap_err();
        assert!(matches!(err, MapError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_generate_rejects_inverted_size_bounds() {
        let mut grid = test_grid(50, 50);
        grid.room_min_size = 12;
        grid.room_max_size = 6;
        let mut rng = StdRng::seed_from_u64(0);
        assert!(grid.generate(&mut rng).is_err());
    }

    #[test]
    fn test_failed_generate_leaves_layout_untouched() {
        let mut grid = test_grid(50, 50);
        let mut rng = StdRng::seed_from_u64(5);
        grid.generate(&mut rng).unwrap();
        let rooms = grid.rooms.clone();
        let cell = grid.get_tile_at(25, 25);

        grid.room_max_size = 60;
        assert!(grid.generate(&mut rng).is_err());
        assert_eq!(grid.rooms, rooms);
        assert_eq!(grid.get_tile_at(25, 25), cell);
    }

    #[test]
    fn test_default_config_on_50x50_is_valid() {
        let mut grid = test_grid(50, 50);
        let mut rng = StdRng::seed_from_u64(42);
        assert!(grid.generate(&mut rng).is_ok());
    }

    /// Split a recorded call list into (floor fills, wall fills) by color.
    fn split_fills(calls: &[DrawCall]) -> (Vec<(i32, i32)>, Vec<(i32, i32)>) {
        let mut floors = Vec::new();
        let mut walls = Vec::new();
        for call in calls {
            if let DrawCall::Fill { color, x, y, .. } = call {
                if *color == FLOOR_FALLBACK_COLOR {
                    floors.push((*x, *y));
                } else if *color == WALL_FALLBACK_COLOR {
                    walls.push((*x, *y));
                }
            }
        }
        (floors, walls)
    }

    #[test]
    fn test_draw_emits_floors_before_walls() {
        let mut grid = test_grid(50, 50);
        let mut rng = StdRng::seed_from_u64(2);
        grid.generate(&mut rng).unwrap();

        let mut surface = MockSurface::new(50 * 48, 50 * 48);
        grid.draw(&mut surface, 0, 0);

        let last_floor = surface.calls.iter().rposition(|c| {
            matches!(c, DrawCall::Fill { color, .. } if *color == FLOOR_FALLBACK_COLOR)
        });
        let first_wall = surface.calls.iter().position(|c| {
            matches!(c, DrawCall::Fill { color, .. } if *color == WALL_FALLBACK_COLOR)
        });
        let (Some(last_floor), Some(first_wall)) = (last_floor, first_wall) else {
            panic!("expected both floor and wall draw calls");
        };
        assert!(last_floor < first_wall);
    }

    #[test]
    fn test_draw_walls_only_above_floor_cells() {
        let mut grid = test_grid(50, 50);
        let mut rng = StdRng::seed_from_u64(9);
        grid.generate(&mut rng).unwrap();

        let mut surface = MockSurface::new(50 * 48, 50 * 48);
        grid.draw(&mut surface, 0, 0);
        let (floors, walls) = split_fills(&surface.calls);

        // Every floor cell appears exactly once in pass 1.
        let mut expected_floors = Vec::new();
        let mut expected_walls = Vec::new();
        for x in 0..grid.width {
            for y in 0..grid.height {
                let pos = (x * 48, y * 48);
                match grid.get_tile_at(x, y) {
                    CellState::Floor => expected_floors.push(pos),
                    CellState::Wall => {
                        if y < grid.height - 1 && grid.get_tile_at(x, y + 1) == CellState::Floor {
                            expected_walls.push(pos);
                        }
                    }
                }
            }
        }
        let sorted = |mut v: Vec<(i32, i32)>| {
            v.sort_unstable();
            v
        };
        assert_eq!(sorted(floors), sorted(expected_floors));
        assert_eq!(sorted(walls), sorted(expected_walls));
    }

    #[test]
    fn test_draw_window_respects_camera_and_screen() {
        let mut grid = test_grid(50, 50);
        let mut rng = StdRng::seed_from_u64(4);
        grid.generate(&mut rng).unwrap();

        // 96x96 window starting at cell (2,2): cells 2..=4 are visible.
        let mut surface = MockSurface::new(96, 96);
        grid.draw(&mut surface, 2 * 48, 2 * 48);

        for call in &surface.calls {
            let DrawCall::Fill { x, y, w, h, .. } = call else {
                continue;
            };
            assert!(*x >= -48 && *x < 96 + 48);
            assert!(*y >= -48 && *y < 96 + 48);
            assert_eq!(x.rem_euclid(48), 0);
            assert_eq!(y.rem_euclid(48), 0);
            assert_eq!((*w, *h), (48, 48));
        }
    }

    #[test]
    fn test_draw_blits_when_tiles_resolve() {
        let sheet = RgbaImage::from_pixel(96, 48, Rgba([5, 5, 5, 255]));
        let provider = Rc::new(TileProvider::from_images(
            vec![("tiles.png".to_string(), sheet)],
            48,
        ));
        let mut grid = DungeonGrid::new(
            50,
            50,
            48,
            TileRef::new(0, 0),
            TileRef::new(0, 1),
            provider,
        );
        let mut rng = StdRng::seed_from_u64(6);
        grid.generate(&mut rng).unwrap();

        let mut surface = MockSurface::new(50 * 48, 50 * 48);
        grid.draw(&mut surface, 0, 0);
        assert!(!surface.calls.is_empty());
        for call in &surface.calls {
            let DrawCall::Blit { x, y } = call else {
                panic!("expected only blits, got {call:?}");
            };
            assert_eq!(x.rem_euclid(48), 0);
            assert_eq!(y.rem_euclid(48), 0);
        }
    }

    #[test]
    fn test_set_tiles_switches_to_fallback_for_invalid_refs() {
        let sheet = RgbaImage::from_pixel(96, 48, Rgba([5, 5, 5, 255]));
        let provider = Rc::new(TileProvider::from_images(
            vec![("tiles.png".to_string(), sheet)],
            48,
        ));
        let mut grid = DungeonGrid::new(
            50,
            50,
            48,
            TileRef::new(0, 0),
            TileRef::new(0, 1),
            provider,
        );
        let mut rng = StdRng::seed_from_u64(6);
        grid.generate(&mut rng).unwrap();

        grid.set_tiles(TileRef::new(9, 0), TileRef::new(9, 0));
        let mut surface = MockSurface::new(50 * 48, 50 * 48);
        grid.draw(&mut surface, 0, 0);
        assert!(surface
            .calls
            .iter()
            .all(|c| matches!(c, DrawCall::Fill { .. })));
    }
}
