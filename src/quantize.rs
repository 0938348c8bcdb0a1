//! Contains the [`Quantizer`]: nearest part color search with optional
//! Floyd–Steinberg error diffusion.

use crate::{mosaic::Cell, Color, ColorMetric, Error, Mosaic};
use tracing::debug;

/// How a diffused channel value outside of `0..=255` is brought back into 8 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChannelOverflow {
    /// Saturate to `0` or `255`.
    #[default]
    Clamp,
    /// Keep the low 8 bits, as fixed-width integer arithmetic would.
    ///
    /// A channel pushed past either end reappears at the other end of the range.
    Wrap,
}

impl ChannelOverflow {
    /// Brings an integral channel value into the 8-bit range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn apply(self, value: f64) -> u8 {
        match self {
            ChannelOverflow::Clamp => value.clamp(0.0, 255.0) as u8,
            ChannelOverflow::Wrap => (value as i64).rem_euclid(256) as u8,
        }
    }
}

/// Floyd–Steinberg weight for the cell to the right.
const RIGHT: f64 = 7.0 / 16.0;
/// Floyd–Steinberg weight for the cell below and to the right.
const BELOW_RIGHT: f64 = 1.0 / 16.0;
/// Floyd–Steinberg weight for the cell below and to the left.
const BELOW_LEFT: f64 = 3.0 / 16.0;
/// Floyd–Steinberg weight for the cell below.
const BELOW: f64 = 5.0 / 16.0;

/// Assigns a palette entry to every cell of a [`Mosaic`].
///
/// Cells are visited in row-major order. Each one is replaced by the nearest palette entry
/// under the configured [`ColorMetric`]. With dithering enabled, the difference between the
/// cell's color and the chosen entry is then spread over the unvisited neighbors using the
/// Floyd–Steinberg weights:
///
/// ```text
///         X   7
///     3   5   1
/// ```
///
/// # Examples
/// ```
/// # use brickette::{ChannelOverflow, ColorMetric, Quantizer};
/// let quantizer = Quantizer::new()
///     .metric(ColorMetric::Euclidean)
///     .dither(true)
///     .overflow(ChannelOverflow::Clamp);
/// ```
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    /// The metric used for nearest color search.
    metric: ColorMetric,
    /// Whether or not to diffuse the quantization error.
    dither: bool,
    /// How diffused channel values are kept in range.
    overflow: ChannelOverflow,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Quantizer {
    /// Creates a new [`Quantizer`] using the redmean metric, dithering,
    /// and clamping of diffused channels.
    pub const fn new() -> Self {
        Self {
            metric: ColorMetric::Redmean,
            dither: true,
            overflow: ChannelOverflow::Clamp,
        }
    }

    /// Sets the metric used to find the nearest palette entry.
    ///
    /// The default metric is [`ColorMetric::Redmean`].
    pub const fn metric(mut self, metric: ColorMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Sets whether or not to apply Floyd–Steinberg dithering.
    ///
    /// The default value is `true`.
    pub const fn dither(mut self, dither: bool) -> Self {
        self.dither = dither;
        self
    }

    /// Sets how diffused channel values outside of `0..=255` are handled.
    ///
    /// The default is [`ChannelOverflow::Clamp`].
    pub const fn overflow(mut self, overflow: ChannelOverflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Quantizes every cell of `mosaic` in place.
    ///
    /// # Errors
    /// Returns [`Error::EmptyPalette`] if the mosaic's palette has no entries.
    /// The mosaic is left untouched in that case.
    pub fn run(&self, mosaic: &mut Mosaic) -> Result<(), Error> {
        if mosaic.palette.is_empty() {
            return Err(Error::EmptyPalette);
        }

        let (width, height) = mosaic.cells.dimensions();
        debug!(
            width,
            height,
            palette = mosaic.palette.len(),
            metric = ?self.metric,
            dither = self.dither,
            "quantizing mosaic"
        );

        for y in 0..height {
            for x in 0..width {
                let old = mosaic.color(x, y);

                #[allow(clippy::expect_used)]
                let index = mosaic
                    .palette
                    .nearest(old, self.metric)
                    .expect("palette is not empty");

                mosaic.place(x, y, index);

                if self.dither {
                    let chosen = mosaic.palette[index].color;
                    self.diffuse(mosaic, x, y, residual(old, chosen));
                }
            }
        }

        debug!(parts = mosaic.total_parts(), "mosaic quantized");
        Ok(())
    }

    /// Spreads `error` from the cell at `(x, y)` over its unvisited neighbors.
    ///
    /// Neighbors outside of the grid are skipped and their share of the error is dropped.
    /// Note that both lower diagonal neighbors are only reached when a right neighbor exists,
    /// so in the last column the error only flows straight down.
    fn diffuse(&self, mosaic: &mut Mosaic, x: u32, y: u32, error: [f64; 3]) {
        let (width, height) = mosaic.cells.dimensions();
        let has_right = x + 1 < width;
        let has_below = y + 1 < height;

        if has_right {
            self.add_error(mosaic, x + 1, y, error, RIGHT);
            if has_below {
                self.add_error(mosaic, x + 1, y + 1, error, BELOW_RIGHT);
                if x > 0 {
                    self.add_error(mosaic, x - 1, y + 1, error, BELOW_LEFT);
                }
            }
        }

        if has_below {
            self.add_error(mosaic, x, y + 1, error, BELOW);
        }
    }

    /// Adds `weight` times `error` to the color of the cell at `(x, y)`.
    fn add_error(&self, mosaic: &mut Mosaic, x: u32, y: u32, error: [f64; 3], weight: f64) {
        let color = apply_error(mosaic.color(x, y), error, weight, self.overflow);
        mosaic.cells.set(x, y, Cell::Raw(color));
    }
}

/// Quantizes `mosaic` with the default [`Quantizer`] options,
/// dithering only if `dithering` is `true`.
///
/// # Errors
/// Returns [`Error::EmptyPalette`] if the mosaic's palette has no entries.
pub fn quantize(mut mosaic: Mosaic, dithering: bool) -> Result<Mosaic, Error> {
    Quantizer::new().dither(dithering).run(&mut mosaic)?;
    Ok(mosaic)
}

/// The per channel difference `old - chosen` for red, green and blue.
fn residual(old: Color, chosen: Color) -> [f64; 3] {
    [
        f64::from(old.red) - f64::from(chosen.red),
        f64::from(old.green) - f64::from(chosen.green),
        f64::from(old.blue) - f64::from(chosen.blue),
    ]
}

/// Adds the rounded, weighted error to each RGB channel of `color`.
///
/// The alpha of the result is always opaque.
fn apply_error(color: Color, error: [f64; 3], weight: f64, overflow: ChannelOverflow) -> Color {
    let channel = |c: u8, e: f64| overflow.apply(f64::from(c) + (e * weight).round());

    Color::new(
        channel(color.red, error[0]),
        channel(color.green, error[1]),
        channel(color.blue, error[2]),
        u8::MAX,
    )
}
