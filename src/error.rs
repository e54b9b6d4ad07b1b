use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced during setup and generation.
///
/// A missing sheet file is deliberately not represented here: the provider
/// logs a warning and skips it. Out-of-range queries are absorbed by the
/// query methods themselves and never reach callers as errors.
#[derive(Debug, Error)]
pub enum MapError {
    /// A sheet file exists but could not be decoded as an image.
    #[error("failed to decode tile sheet {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Room size bounds are incompatible with the grid dimensions, which
    /// would make a placement range empty.
    #[error(
        "invalid generation config: {width}x{height} grid cannot fit rooms of \
         size {min_size}..={max_size} with a 1-cell border"
    )]
    InvalidConfiguration {
        width: i32,
        height: i32,
        min_size: i32,
        max_size: i32,
    },
}
