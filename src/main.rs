#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice
)]

use std::{fmt::Display, path::PathBuf, time::Instant};

use anyhow::Context;
use brickette::{ChannelOverflow, ColorMetric, MosaicPipeline, Palette};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Copy, Clone, ValueEnum)]
enum CliMetric {
    Redmean,
    Euclidean,
}

impl From<CliMetric> for ColorMetric {
    fn from(value: CliMetric) -> Self {
        match value {
            CliMetric::Redmean => ColorMetric::Redmean,
            CliMetric::Euclidean => ColorMetric::Euclidean,
        }
    }
}

impl Display for CliMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CliMetric::Redmean => "redmean",
                CliMetric::Euclidean => "euclidean",
            }
        )
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum CliOverflow {
    Clamp,
    Wrap,
}

impl From<CliOverflow> for ChannelOverflow {
    fn from(value: CliOverflow) -> Self {
        match value {
            CliOverflow::Clamp => ChannelOverflow::Clamp,
            CliOverflow::Wrap => ChannelOverflow::Wrap,
        }
    }
}

impl Display for CliOverflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CliOverflow::Clamp => "clamp",
                CliOverflow::Wrap => "wrap",
            }
        )
    }
}

/// Turns an image into a brick mosaic and lists the parts it needs.
#[derive(Parser)]
#[command(name = "brickette", version)]
struct Options {
    /// Source image
    #[arg(long)]
    from: PathBuf,

    /// Destination of the mosaic, always written as PNG
    #[arg(long, default_value = "mosaic.png")]
    to: PathBuf,

    /// JSON palette of part colors
    #[arg(long, default_value = "palettes/bricks.json")]
    palette: PathBuf,

    /// Number of studs along each side of the (square) mosaic
    #[arg(long, default_value_t = 32)]
    size: u32,

    /// Apply Floyd–Steinberg dithering
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    dithering: bool,

    #[arg(long, default_value_t = CliMetric::Redmean)]
    metric: CliMetric,

    #[arg(long, default_value_t = CliOverflow::Clamp)]
    overflow: CliOverflow,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brickette=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let Options { from, to, palette, size, dithering, metric, overflow } = Options::parse();

    info!("loading image {}", from.display());
    let image = brickette::load_image(&from)?;

    info!("loading palette {}", palette.display());
    let palette = Palette::load(&palette)?;

    info!("generating {size}x{size} mosaic");
    let time = Instant::now();
    let mosaic = MosaicPipeline::new(&image)
        .size(size)
        .dither(dithering)
        .metric(metric.into())
        .overflow(overflow.into())
        .mosaic(palette)
        .context("cannot generate mosaic")?;
    let elapsed = time.elapsed();

    info!("saving mosaic as {}", to.display());
    brickette::save_image(&to, &mosaic.to_rgba_image())?;

    println!("Render took {:.2}s", elapsed.as_secs_f64());
    println!("Number of parts: {}", mosaic.num_cells());
    println!("\nParts that need to be used:");
    for (name, count) in mosaic.part_counts() {
        println!("Color \"{name}\" = {count}");
    }

    Ok(())
}
