//! PNG export of a [`Raster`].
//!
//! Feature-gated behind `png` (default on) so that consumers that only need
//! the raster or replay do not pull in the `image` crate.

use backdrop_core::color::Srgb;
use backdrop_core::error::BackdropError;
use std::path::Path;

use crate::pixel::Raster;

/// Writes `raster` as a PNG.
///
/// With a `background` the image is opaque; without one it keeps the
/// raster's transparency. Returns `BackdropError::InvalidDimensions` for an
/// empty raster and `BackdropError::Io` on encode or write failure.
pub fn write_png(
    raster: &Raster,
    background: Option<Srgb>,
    path: &Path,
) -> Result<(), BackdropError> {
    if raster.width() == 0 || raster.height() == 0 {
        return Err(BackdropError::InvalidDimensions);
    }
    let rgba = match background {
        Some(bg) => raster.to_rgba8_over(bg),
        None => raster.to_rgba8(),
    };
    let img = image::RgbaImage::from_raw(raster.width(), raster.height(), rgba)
        .ok_or_else(|| BackdropError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| BackdropError::Io(e.to_string()))
}
