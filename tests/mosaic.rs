use brickette::{
    quantize, Cell, ChannelOverflow, Color, ColorMetric, Error, Grid, Mosaic, Palette,
    PaletteEntry, Quantizer,
};

const BRICKS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/palettes/bricks.json");

fn black_and_white() -> Palette {
    Palette::new(vec![
        PaletteEntry::new("26", "black", Color::new(0, 0, 0, 255)),
        PaletteEntry::new("1", "white", Color::new(255, 255, 255, 255)),
    ])
}

fn gray(v: u8) -> Color {
    Color::new(v, v, v, 255)
}

fn gradient(width: u32, height: u32) -> Grid<Color> {
    Grid::from_fn(width, height, |x, y| {
        let r = u8::try_from(x * 255 / width.max(1)).unwrap_or(u8::MAX);
        let g = u8::try_from(y * 255 / height.max(1)).unwrap_or(u8::MAX);
        Color::new(r, g, 128, 255)
    })
}

#[test]
fn bundled_palette_loads() {
    let palette = Palette::load(BRICKS).unwrap();
    assert_eq!(palette.len(), 16);
    assert_eq!(palette[0].name, "Black");
    assert!(palette.iter().all(|entry| entry.color.alpha == 255));
}

#[test]
fn every_palette_name_is_counted() {
    let palette = Palette::load(BRICKS).unwrap();
    let mosaic = quantize(Mosaic::new(gradient(24, 16), palette.clone()), true).unwrap();

    let parts = mosaic.part_counts();
    assert_eq!(parts.len(), palette.len());
    for name in palette.names() {
        assert!(parts.contains_key(name), "{name} missing");
    }
    assert_eq!(parts.values().map(|&c| u64::from(c)).sum::<u64>(), 24 * 16);
    assert_eq!(mosaic.total_parts(), 24 * 16);
    assert!(mosaic.is_complete());
}

#[test]
fn quantized_pixels_come_from_the_palette() {
    let palette = Palette::load(BRICKS).unwrap();
    for dither in [false, true] {
        let mut mosaic = Mosaic::new(gradient(20, 20), palette.clone());
        Quantizer::new().dither(dither).run(&mut mosaic).unwrap();

        let pixels = mosaic.to_pixels();
        assert_eq!(pixels.dimensions(), (20, 20));
        assert!(pixels
            .as_slice()
            .iter()
            .all(|color| palette.iter().any(|entry| entry.color == *color)));
    }
}

#[test]
fn residual_reaches_right_neighbor() {
    let pixels = Grid::from_vec(2, 1, vec![gray(130), gray(160)]).unwrap();
    let mosaic = quantize(Mosaic::new(pixels, black_and_white()), true).unwrap();

    assert_eq!(mosaic.entry(0, 0).unwrap().name, "white");
    // 160 + round(-125 * 7 / 16) = 105
    assert_eq!(mosaic.entry(1, 0).unwrap().name, "black");
}

#[test]
fn one_by_one_grid() {
    for dither in [false, true] {
        let mosaic = quantize(Mosaic::new(Grid::new(1, 1, gray(200)), black_and_white()), dither);
        let mosaic = mosaic.unwrap();
        assert_eq!(mosaic.cell(0, 0), Cell::Part(1));
        assert_eq!(mosaic.total_parts(), 1);
    }
}

#[test]
fn empty_palette_is_rejected() {
    let mosaic = Mosaic::new(gradient(3, 3), Palette::default());
    let result = quantize(mosaic, false);
    assert!(matches!(result, Err(Error::EmptyPalette)));
}

#[test]
fn metrics_are_interchangeable() {
    let palette = Palette::load(BRICKS).unwrap();
    for metric in [ColorMetric::Redmean, ColorMetric::Euclidean] {
        for overflow in [ChannelOverflow::Clamp, ChannelOverflow::Wrap] {
            let mut mosaic = Mosaic::new(gradient(9, 7), palette.clone());
            Quantizer::new()
                .metric(metric)
                .overflow(overflow)
                .run(&mut mosaic)
                .unwrap();
            assert_eq!(mosaic.total_parts(), 63);
        }
    }
}

#[test]
fn wrapping_overflow_differs_from_clamping() {
    // a near white cell snaps to white and pushes +18 * 7/16 = 8 onto the bright
    // right neighbor, which then clamps to 255 or wraps around to a dark color
    let palette = Palette::new(vec![
        PaletteEntry::new("1", "white", Color::new(230, 230, 230, 255)),
        PaletteEntry::new("26", "black", Color::new(0, 0, 0, 255)),
    ]);
    let pixels = Grid::from_vec(2, 1, vec![gray(248), gray(250)]).unwrap();

    let mut clamped = Mosaic::new(pixels.clone(), palette.clone());
    Quantizer::new().run(&mut clamped).unwrap();
    assert_eq!(clamped.entry(1, 0).unwrap().name, "white");

    let mut wrapped = Mosaic::new(pixels, palette);
    Quantizer::new()
        .overflow(ChannelOverflow::Wrap)
        .run(&mut wrapped)
        .unwrap();
    // 250 + 8 = 258 wraps to 2
    assert_eq!(wrapped.entry(1, 0).unwrap().name, "black");
}

#[test]
fn palette_file_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(matches!(Palette::load(&missing), Err(Error::NotFound { path, .. }) if path == missing));

    let malformed = dir.path().join("malformed.json");
    std::fs::write(&malformed, r#"[{ "id": "1", "name": "White" }]"#).unwrap();
    assert!(matches!(Palette::load(&malformed), Err(Error::MalformedPalette(_))));

    let empty = dir.path().join("empty.json");
    std::fs::write(&empty, "[]").unwrap();
    assert!(Palette::load(&empty).unwrap().is_empty());
}

#[cfg(feature = "image")]
mod image_io {
    use super::*;
    use brickette::{load_image, save_image, MosaicPipeline};
    use image::{Rgba, RgbaImage};

    #[test]
    fn pipeline_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        RgbaImage::from_fn(40, 30, |x, _| {
            let v = u8::try_from(x * 6).unwrap_or(u8::MAX);
            Rgba([v, v, v, 255])
        })
        .save(&source)
        .unwrap();

        let image = load_image(&source).unwrap();
        let palette = Palette::load(BRICKS).unwrap();
        let mosaic = MosaicPipeline::new(&image).size(12).mosaic(palette).unwrap();
        assert_eq!(mosaic.total_parts(), 144);

        // written as PNG whatever the extension says
        let output = dir.path().join("mosaic.jpeg");
        save_image(&output, &mosaic.to_rgba_image()).unwrap();
        let written = load_image(&output).unwrap().into_rgba8();
        assert_eq!(written.dimensions(), (12, 12));
        assert_eq!(written, mosaic.to_rgba_image());
    }

    #[test]
    fn missing_image_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_image(dir.path().join("nothing.png"));
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn corrupt_image_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nthis is not really a png").unwrap();
        assert!(matches!(load_image(&path), Err(Error::Decode { .. })));
    }

    #[test]
    fn unwritable_destination_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/mosaic.png");
        let image = RgbaImage::new(2, 2);
        assert!(matches!(save_image(&path, &image), Err(Error::Write { .. })));
    }
}
