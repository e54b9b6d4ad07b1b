/// State of a single grid cell.
///
/// Everything outside the grid bounds is treated as `Wall` (closed world).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Wall,
    Floor,
}

impl CellState {
    pub fn is_walkable(&self) -> bool {
        matches!(self, CellState::Floor)
    }
}

/// A (sheet, index) pair selecting one tile image from a [`TileProvider`].
///
/// References are plain indices with no validation attached; a reference
/// that resolves to no image falls back to a solid-color fill at draw time.
///
/// [`TileProvider`]: crate::tile_provider::TileProvider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRef {
    pub sheet: usize,
    pub index: usize,
}

impl TileRef {
    pub fn new(sheet: usize, index: usize) -> Self {
        Self { sheet, index }
    }
}
