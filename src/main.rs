mod camera;
mod constants;
mod dungeon_grid;
mod error;
mod player;
mod surface;
mod tile;
mod tile_provider;

use camera::Camera;
use constants::*;
use dungeon_grid::DungeonGrid;
use image::Rgba;
use player::Player;
use surface::PixelSurface;
use tile::TileRef;
use tile_provider::TileProvider;

use log::error;
use macroquad::prelude::*;
use std::path::{Path, PathBuf};
use std::rc::Rc;

fn window_conf() -> Conf {
    Conf {
        window_title: "Dungeon Tiles".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        ..Default::default()
    }
}

/// Resolve the tile sheet paths relative to the working directory.
///
/// Path resolution is deliberately kept out of the map core; the provider
/// only ever sees concrete paths.
fn find_sheet_paths() -> Vec<PathBuf> {
    for dir in ["assets", "Assets", "."] {
        let candidates = [
            Path::new(dir).join("tileset1.png"),
            Path::new(dir).join("tileset2.png"),
        ];
        if candidates[0].exists() {
            return candidates.into_iter().filter(|p| p.exists()).collect();
        }
    }
    Vec::new()
}

/// Direction for the currently held movement key, if any.
fn wanted_direction() -> Option<(i32, i32)> {
    if is_key_down(KeyCode::W) || is_key_down(KeyCode::Up) {
        Some((0, -1))
    } else if is_key_down(KeyCode::S) || is_key_down(KeyCode::Down) {
        Some((0, 1))
    } else if is_key_down(KeyCode::A) || is_key_down(KeyCode::Left) {
        Some((-1, 0))
    } else if is_key_down(KeyCode::D) || is_key_down(KeyCode::Right) {
        Some((1, 0))
    } else {
        None
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let provider = match TileProvider::load(&find_sheet_paths(), DEFAULT_TILE_SIZE) {
        Ok(p) => Rc::new(p),
        Err(e) => {
            error!("{e}");
            return;
        }
    };
    if provider.sheet_count() == 0 {
        error!("no tile sheets found; place assets/tileset1.png next to the binary");
        return;
    }

    // Floor from the first sheet; wall from the second sheet when present,
    // otherwise a different tile on the first.
    let floor_ref = TileRef::new(0, 0);
    let wall_ref = if provider.sheet_count() > 1 {
        TileRef::new(1, 1)
    } else {
        TileRef::new(0, 1)
    };

    let tile_size = provider.tile_size();
    let mut grid = DungeonGrid::new(
        MAP_DEFAULT_WIDTH,
        MAP_DEFAULT_HEIGHT,
        tile_size,
        floor_ref,
        wall_ref,
        Rc::clone(&provider),
    );

    let mut rng = ::rand::thread_rng();
    if let Err(e) = grid.generate(&mut rng) {
        error!("{e}");
        return;
    }

    let (spawn_x, spawn_y) = grid.rooms[0].center();
    let mut player = Player::new(spawn_x, spawn_y, tile_size, Some(TileRef::new(0, 2)));
    let mut camera = Camera::new();

    let mut frame = PixelSurface::new(WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32);
    let texture = Texture2D::from_rgba8(
        WINDOW_WIDTH as u16,
        WINDOW_HEIGHT as u16,
        frame.as_bytes(),
    );
    texture.set_filter(FilterMode::Nearest);

    let map_px = (
        grid.width * grid.tile_size as i32,
        grid.height * grid.tile_size as i32,
    );

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::Space) {
            // Parameters were valid at startup, so a regenerate cannot fail.
            if grid.generate(&mut rng).is_ok() {
                let (x, y) = grid.rooms[0].center();
                player.respawn_at(x, y);
            }
        }

        player.update(get_frame_time(), wanted_direction(), &grid);
        camera.follow(
            player.pixel_center(),
            (WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32),
            map_px,
        );

        frame.clear(Rgba([0, 0, 0, 255]));
        grid.draw(&mut frame, camera.x, camera.y);
        player.draw(&mut frame, &provider, camera.x, camera.y);

        texture.update(&Image {
            bytes: frame.as_bytes().to_vec(),
            width: WINDOW_WIDTH as u16,
            height: WINDOW_HEIGHT as u16,
        });
        draw_texture(&texture, 0.0, 0.0, WHITE);

        let (floor, wall) = grid.tile_refs();
        draw_text(
            "SPACE: Regenerate | WASD/Arrows: Move | ESC: Quit",
            10.0,
            20.0,
            24.0,
            WHITE,
        );
        draw_text(
            &format!(
                "Floor: TS{}[{}] | Wall: TS{}[{}] ({}x{} tiles)",
                floor.sheet,
                floor.index,
                wall.sheet,
                wall.index,
                tile_size,
                tile_size
            ),
            10.0,
            44.0,
            24.0,
            SKYBLUE,
        );

        next_frame().await;
    }
}
