//! Demo player entity: a tile-aligned walker gated by map collision.

use crate::constants::*;
use crate::dungeon_grid::DungeonGrid;
use crate::surface::Surface;
use crate::tile::TileRef;
use crate::tile_provider::TileProvider;

pub struct Player {
    pub tile_x: i32,
    pub tile_y: i32,
    tile_size: u32,
    sprite: Option<TileRef>,
    move_timer: f32,
}

impl Player {
    pub fn new(tile_x: i32, tile_y: i32, tile_size: u32, sprite: Option<TileRef>) -> Self {
        Self {
            tile_x,
            tile_y,
            tile_size,
            sprite,
            move_timer: 0.0,
        }
    }

    /// Teleport, e.g. after a map regeneration.
    pub fn respawn_at(&mut self, tile_x: i32, tile_y: i32) {
        self.tile_x = tile_x;
        self.tile_y = tile_y;
        self.move_timer = 0.0;
    }

    /// Advance the held-key repeat timer and attempt one step in `wanted`.
    /// The step only commits when the destination cell is walkable; a
    /// blocked step still consumes the repeat interval so the player does
    /// not burst through the moment a wall opens.
    pub fn update(&mut self, dt: f32, wanted: Option<(i32, i32)>, grid: &DungeonGrid) {
        let Some((dx, dy)) = wanted else {
            // Released: next press steps immediately.
            self.move_timer = 0.0;
            return;
        };

        self.move_timer -= dt;
        if self.move_timer > 0.0 {
            return;
        }
        self.move_timer = MOVE_REPEAT_DELAY;

        let (nx, ny) = (self.tile_x + dx, self.tile_y + dy);
        if grid.is_walkable(nx, ny) {
            self.tile_x = nx;
            self.tile_y = ny;
        }
    }

    /// Pixel position of the player's top-left corner.
    pub fn pixel_pos(&self) -> (i32, i32) {
        (
            self.tile_x * self.tile_size as i32,
            self.tile_y * self.tile_size as i32,
        )
    }

    /// Pixel position of the player's center, for camera tracking.
    pub fn pixel_center(&self) -> (i32, i32) {
        let (px, py) = self.pixel_pos();
        let half = self.tile_size as i32 / 2;
        (px + half, py + half)
    }

    /// Draw through the same surface/fallback path the map uses.
    pub fn draw(
        &self,
        target: &mut impl Surface,
        provider: &TileProvider,
        camera_x: i32,
        camera_y: i32,
    ) {
        let (px, py) = self.pixel_pos();
        let (sx, sy) = (px - camera_x, py - camera_y);

        let image = self
            .sprite
            .and_then(|r| provider.get_tile(r.sheet, r.index));
        match image {
            Some(img) => target.blit(img, sx, sy),
            None => target.fill_rect(
                PLAYER_FALLBACK_COLOR,
                sx,
                sy,
                self.tile_size,
                self.tile_size,
            ),
        }
    }
}
