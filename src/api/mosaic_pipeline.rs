//! Contains the [`MosaicPipeline`] builder struct for the high level API.

use super::resize;
use crate::{ChannelOverflow, Color, ColorMetric, Error, Grid, Mosaic, Palette, Quantizer};
use image::DynamicImage;
use tracing::debug;

/// A builder struct to specify options to create a [`Mosaic`] from an image.
///
/// # Examples
/// To start, create a [`MosaicPipeline`] from a [`DynamicImage`]:
/// ```no_run
/// # use brickette::MosaicPipeline;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = brickette::load_image("some image")?;
/// let mut pipeline = MosaicPipeline::new(&img);
/// # Ok(())
/// # }
/// ```
///
/// Then, you can change different options like the size of the mosaic:
/// ```
/// # use brickette::{ColorMetric, MosaicPipeline};
/// # let img = image::DynamicImage::new_rgba8(1, 1);
/// # let mut pipeline = MosaicPipeline::new(&img);
/// let pipeline = pipeline
///     .size(32)
///     .metric(ColorMetric::Euclidean)
///     .dither(false);
/// ```
///
/// Finally, run the pipeline with a palette:
/// ```
/// # use brickette::{Color, MosaicPipeline, Palette, PaletteEntry};
/// # fn main() -> Result<(), brickette::Error> {
/// # let img = image::DynamicImage::new_rgba8(4, 4);
/// # let pipeline = MosaicPipeline::new(&img);
/// let palette = Palette::new(vec![PaletteEntry::new("26", "Black", Color::new(5, 19, 29, 255))]);
/// let mosaic = pipeline.mosaic(palette)?;
/// assert_eq!(mosaic.part_counts()["Black"], 16);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct MosaicPipeline<'a> {
    /// The source image.
    image: &'a DynamicImage,
    /// The mosaic dimensions, or `None` to keep the image dimensions.
    dimensions: Option<(u32, u32)>,
    /// The quantizer options.
    quantizer: Quantizer,
}

impl<'a> MosaicPipeline<'a> {
    /// Creates a new [`MosaicPipeline`] with default options.
    pub fn new(image: &'a DynamicImage) -> Self {
        Self {
            image,
            dimensions: None,
            quantizer: Quantizer::new(),
        }
    }

    /// Sets the mosaic to be `size` by `size` cells.
    ///
    /// By default, the mosaic has one cell per image pixel.
    pub fn size(&mut self, size: u32) -> &mut Self {
        self.dimensions(size, size)
    }

    /// Sets the number of columns and rows of the mosaic.
    ///
    /// By default, the mosaic has one cell per image pixel.
    pub fn dimensions(&mut self, width: u32, height: u32) -> &mut Self {
        self.dimensions = Some((width, height));
        self
    }

    /// Sets whether or not to apply Floyd–Steinberg dithering.
    ///
    /// The default value is `true`.
    pub fn dither(&mut self, dither: bool) -> &mut Self {
        self.quantizer = self.quantizer.dither(dither);
        self
    }

    /// Sets the metric used to pick the nearest part color.
    ///
    /// The default metric is [`ColorMetric::Redmean`].
    pub fn metric(&mut self, metric: ColorMetric) -> &mut Self {
        self.quantizer = self.quantizer.metric(metric);
        self
    }

    /// Sets how dithered channel values outside of `0..=255` are handled.
    ///
    /// The default is [`ChannelOverflow::Clamp`].
    pub fn overflow(&mut self, overflow: ChannelOverflow) -> &mut Self {
        self.quantizer = self.quantizer.overflow(overflow);
        self
    }

    /// Replaces all quantizer options at once.
    pub fn quantizer(&mut self, quantizer: Quantizer) -> &mut Self {
        self.quantizer = quantizer;
        self
    }

    /// Returns the image scaled to the mosaic dimensions.
    #[must_use]
    pub fn pixels(&self) -> Grid<Color> {
        let (width, height) = self
            .dimensions
            .unwrap_or((self.image.width(), self.image.height()));

        resize(self.image, width, height)
    }

    /// Runs the pipeline and returns the quantized mosaic.
    ///
    /// # Errors
    /// Returns [`Error::EmptyPalette`] if `palette` has no entries.
    pub fn mosaic(&self, palette: Palette) -> Result<Mosaic, Error> {
        if palette.is_empty() {
            return Err(Error::EmptyPalette);
        }

        let mut mosaic = Mosaic::new(self.pixels(), palette);
        self.quantizer.run(&mut mosaic)?;

        debug!(
            width = mosaic.width(),
            height = mosaic.height(),
            parts = mosaic.total_parts(),
            "built mosaic"
        );
        Ok(mosaic)
    }
}
