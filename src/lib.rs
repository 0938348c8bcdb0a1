//! A library for turning images into brick mosaics.
//!
//! Every cell of a mosaic is assigned one color from a fixed [`Palette`] of part colors,
//! optionally with Floyd–Steinberg dithering so that the mosaic as a whole keeps the tones
//! of the source image despite the small palette.
//! Alongside the mosaic, `brickette` counts how many parts of each color are needed.
//!
//! # Features
//! To reduce dependencies and compile times, `brickette` has several `cargo` features
//! that can be turned off or on:
//! - `image`: enables integration with the [`image`] crate and exposes [`MosaicPipeline`].
//! - `cli`: builds the `brickette` command line tool.
//!
//! # Low-Level API
//! The core works on in-memory [`Grid`]s of colors:
//! ```
//! # use brickette::{Color, Grid, Mosaic, Palette, PaletteEntry, Quantizer};
//! # fn main() -> Result<(), brickette::Error> {
//! let palette = Palette::new(vec![
//!     PaletteEntry::new("26", "Black", Color::new(5, 19, 29, 255)),
//!     PaletteEntry::new("1", "White", Color::new(255, 255, 255, 255)),
//! ]);
//!
//! let pixels = Grid::from_fn(4, 4, |x, y| {
//!     let v = u8::try_from((x + y) * 32).unwrap_or(u8::MAX);
//!     Color::new(v, v, v, 255)
//! });
//!
//! let mut mosaic = Mosaic::new(pixels, palette);
//! Quantizer::new().run(&mut mosaic)?;
//! assert_eq!(mosaic.total_parts(), 16);
//! # Ok(())
//! # }
//! ```
//!
//! # High-Level API
//! With the `image` feature, see [`MosaicPipeline`]:
//! ```no_run
//! # use brickette::{MosaicPipeline, Palette};
//! # fn main() -> Result<(), brickette::Error> {
//! let image = brickette::load_image("some image")?;
//! let palette = Palette::load("palettes/bricks.json")?;
//!
//! let mosaic = MosaicPipeline::new(&image).size(48).dither(true).mosaic(palette)?;
//! brickette::save_image("mosaic.png", &mosaic.to_rgba_image())?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::unreadable_literal,
    clippy::wildcard_imports
)]

mod error;
mod metric;
mod mosaic;
mod parts;
mod quantize;
mod types;

#[cfg(feature = "image")]
mod api;

pub use error::Error;
pub use metric::{euclidean_distance, redmean_distance, ColorMetric};
pub use mosaic::{Cell, Mosaic};
pub use parts::{Palette, PaletteEntry};
pub use quantize::{quantize, ChannelOverflow, Quantizer};
pub use types::{Color, Grid};

#[cfg(feature = "image")]
pub use api::*;
