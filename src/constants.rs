//! Tuning constants organized by category.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.

use image::Rgba;

// =============================================================================
// MAP
// =============================================================================

/// Default map width in cells
pub const MAP_DEFAULT_WIDTH: i32 = 50;
/// Default map height in cells
pub const MAP_DEFAULT_HEIGHT: i32 = 50;
/// Default tile edge length in pixels
pub const DEFAULT_TILE_SIZE: u32 = 48;

// =============================================================================
// GENERATION
// =============================================================================

/// Number of rooms carved per generation pass
pub const ROOM_COUNT: u32 = 5;
/// Minimum room edge in cells
pub const ROOM_MIN_SIZE: i32 = 6;
/// Maximum room edge in cells
pub const ROOM_MAX_SIZE: i32 = 15;

// =============================================================================
// RENDERING
// =============================================================================

/// Fallback fill when the floor tile reference resolves to no image
pub const FLOOR_FALLBACK_COLOR: Rgba<u8> = Rgba([200, 200, 200, 255]);
/// Fallback fill when the wall tile reference resolves to no image
pub const WALL_FALLBACK_COLOR: Rgba<u8> = Rgba([80, 60, 40, 255]);
/// Fallback fill for the player square
pub const PLAYER_FALLBACK_COLOR: Rgba<u8> = Rgba([220, 80, 80, 255]);

// =============================================================================
// DEMO WINDOW
// =============================================================================

/// Demo window width in pixels
pub const WINDOW_WIDTH: i32 = 1000;
/// Demo window height in pixels
pub const WINDOW_HEIGHT: i32 = 700;
/// Seconds between repeated steps while a movement key is held
pub const MOVE_REPEAT_DELAY: f32 = 0.12;
