//! Loads tile sheet images and slices them into individually addressable
//! fixed-size tiles.

use crate::error::MapError;
use image::{imageops, RgbaImage};
use log::{info, warn};
use std::path::Path;

/// One decoded source image, sliced into same-size tiles.
struct Sheet {
    name: String,
    tiles: Vec<RgbaImage>,
}

/// Owns every loaded tile image, addressed by (sheet, index).
///
/// Sheets keep the order of the source list they were loaded from; tiles
/// within a sheet are indexed row-major (`index = row * columns + col`).
/// Built once at startup and read-only afterwards.
pub struct TileProvider {
    tile_size: u32,
    sheets: Vec<Sheet>,
}

impl TileProvider {
    /// Load and slice each source image in order.
    ///
    /// A path that does not exist is skipped with a warning; a path that
    /// exists but cannot be decoded is fatal. If every source is missing
    /// the provider is valid but empty, so callers that require tiles
    /// should check [`sheet_count`](Self::sheet_count).
    pub fn load<P: AsRef<Path>>(paths: &[P], tile_size: u32) -> Result<Self, MapError> {
        let mut provider = Self {
            tile_size,
            sheets: Vec::new(),
        };

        for path in paths {
            let path = path.as_ref();
            if !path.exists() {
                warn!("tile sheet not found, skipping: {}", path.display());
                continue;
            }

            let img = image::open(path)
                .map_err(|source| MapError::Decode {
                    path: path.to_path_buf(),
                    source,
                })?
                .into_rgba8();

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            provider.push_sheet(name, &img);

            let sheet = provider.sheets.last().unwrap();
            info!(
                "loaded tile sheet {} ({}): {} tiles",
                provider.sheets.len() - 1,
                sheet.name,
                sheet.tiles.len()
            );
        }

        Ok(provider)
    }

    /// Build a provider from already-decoded images. Shares the slicing
    /// path with [`load`](Self::load); also handy in tests.
    pub fn from_images(sources: Vec<(String, RgbaImage)>, tile_size: u32) -> Self {
        let mut provider = Self {
            tile_size,
            sheets: Vec::new(),
        };
        for (name, img) in sources {
            provider.push_sheet(name, &img);
        }
        provider
    }

    /// Slice a decoded image into row-major tiles and append it as a sheet.
    /// A partial trailing row or column is truncated.
    fn push_sheet(&mut self, name: String, img: &RgbaImage) {
        let columns = img.width() / self.tile_size;
        let rows = img.height() / self.tile_size;

        let mut tiles = Vec::with_capacity((rows * columns) as usize);
        for row in 0..rows {
            for col in 0..columns {
                let tile = imageops::crop_imm(
                    img,
                    col * self.tile_size,
                    row * self.tile_size,
                    self.tile_size,
                    self.tile_size,
                )
                .to_image();
                tiles.push(tile);
            }
        }

        self.sheets.push(Sheet { name, tiles });
    }

    /// Look up a tile image. `None` for any out-of-range sheet or index.
    pub fn get_tile(&self, sheet: usize, index: usize) -> Option<&RgbaImage> {
        self.sheets.get(sheet)?.tiles.get(index)
    }

    /// Number of successfully loaded sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Tiles in a sheet, or 0 if the sheet index is invalid.
    pub fn tile_count(&self, sheet: usize) -> usize {
        self.sheets.get(sheet).map_or(0, |s| s.tiles.len())
    }

    /// Base name of the sheet's source, or `None` if invalid.
    pub fn sheet_name(&self, sheet: usize) -> Option<&str> {
        self.sheets.get(sheet).map(|s| s.name.as_str())
    }

    /// Tile edge length in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }
}
