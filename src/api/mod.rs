//! Contains the [`image`] crate integration: decoding, resizing, encoding
//! and the [`MosaicPipeline`] builder struct for the high level API.

mod mosaic_pipeline;

pub use mosaic_pipeline::MosaicPipeline;

use crate::{Color, Error, Grid};
use image::{imageops::FilterType, DynamicImage, ImageFormat, ImageReader, RgbaImage};
use palette::cast::ComponentsAs;
use std::path::Path;
use tracing::debug;

/// Opens and decodes the image at `path`.
///
/// The format is detected from the file content, falling back to the file extension.
///
/// # Errors
/// Returns [`Error::NotFound`] if the file cannot be opened or read,
/// and [`Error::Decode`] if it is not a supported image.
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, Error> {
    let path = path.as_ref();
    let not_found = |source| Error::NotFound { path: path.to_owned(), source };

    let image = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(not_found)?
        .decode()
        .map_err(|source| Error::Decode { path: path.to_owned(), source })?;

    debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded image");
    Ok(image)
}

/// Encodes `image` as PNG and writes it to `path`, whatever the extension of `path`.
///
/// # Errors
/// Returns [`Error::Write`] if the file cannot be created or written.
pub fn save_image(path: impl AsRef<Path>, image: &RgbaImage) -> Result<(), Error> {
    let path = path.as_ref();
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::Write { path: path.to_owned(), source })?;

    debug!(path = %path.display(), "saved image");
    Ok(())
}

/// Scales `image` to exactly `width` by `height` pixels using bilinear filtering.
#[must_use]
pub fn resize(image: &DynamicImage, width: u32, height: u32) -> Grid<Color> {
    if image.width() == width && image.height() == height {
        return grid_from_rgba(&image.to_rgba8());
    }

    debug!(
        from_width = image.width(),
        from_height = image.height(),
        width,
        height,
        "resizing image"
    );
    grid_from_rgba(&image.resize_exact(width, height, FilterType::Triangle).into_rgba8())
}

/// Copies the pixels of `image` into a [`Grid`].
#[must_use]
pub fn grid_from_rgba(image: &RgbaImage) -> Grid<Color> {
    let (width, height) = image.dimensions();
    let len = width as usize * height as usize;
    let buf = &image.as_raw()[..(len * 4)];
    let colors: &[Color] = buf.components_as();

    #[allow(clippy::expect_used)]
    {
        // buf holds exactly width * height pixels
        Grid::from_vec(width, height, colors.to_vec()).expect("matching dimensions")
    }
}
