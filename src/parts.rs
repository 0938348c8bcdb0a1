//! Contains the [`Palette`] of part colors and its JSON loader.

use crate::{Color, ColorMetric, Error};
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufReader, Read},
    ops::Deref,
    path::Path,
};
use tracing::debug;

/// A single part color that mosaic cells can be assigned to.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    /// The identifier of the part color, e.g. a catalog number.
    pub id: String,
    /// The display name of the color.
    ///
    /// Part counts are grouped by this name.
    pub name: String,
    /// The color of the part.
    pub color: Color,
}

impl PaletteEntry {
    /// Creates a new [`PaletteEntry`].
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: Color) -> Self {
        Self { id: id.into(), name: name.into(), color }
    }
}

/// The serialized form of a palette entry.
#[derive(Deserialize)]
struct RawEntry {
    /// See [`PaletteEntry::id`].
    id: String,
    /// See [`PaletteEntry::name`].
    name: String,
    /// See [`PaletteEntry::color`].
    color: RawColor,
}

/// The serialized form of a color.
#[derive(Deserialize)]
struct RawColor {
    /// Red.
    r: u8,
    /// Green.
    g: u8,
    /// Blue.
    b: u8,
    /// Alpha.
    a: u8,
}

impl From<RawEntry> for PaletteEntry {
    fn from(RawEntry { id, name, color: RawColor { r, g, b, a } }: RawEntry) -> Self {
        Self { id, name, color: Color::new(r, g, b, a) }
    }
}

/// An ordered, immutable list of part colors.
///
/// The order only matters for ties: when several entries are equally close to a color,
/// the one that comes first wins.
///
/// # Examples
/// ```
/// # use brickette::{Color, ColorMetric, Palette};
/// # fn main() -> Result<(), brickette::Error> {
/// let palette = Palette::from_json_str(
///     r#"[
///         { "id": "26", "name": "Black", "color": { "r": 5, "g": 19, "b": 29, "a": 255 } },
///         { "id": "1", "name": "White", "color": { "r": 255, "g": 255, "b": 255, "a": 255 } }
///     ]"#,
/// )?;
///
/// let nearest = palette.nearest(Color::new(200, 200, 200, 255), ColorMetric::Redmean);
/// assert_eq!(nearest, Some(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette(Vec<PaletteEntry>);

impl Palette {
    /// Creates a new [`Palette`] from the given entries.
    #[must_use]
    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        Self(entries)
    }

    /// Parses a palette from a JSON array of `{ id, name, color: { r, g, b, a } }` records.
    ///
    /// # Errors
    /// Returns [`Error::MalformedPalette`] if the input does not have that structure.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let entries: Vec<RawEntry> = serde_json::from_str(json)?;
        Ok(entries.into_iter().map(PaletteEntry::from).collect())
    }

    /// Parses a palette from a reader. See [`Palette::from_json_str`] for the format.
    ///
    /// # Errors
    /// Returns [`Error::MalformedPalette`] if the input is not a valid palette.
    /// I/O failures while reading are reported as [`Error::MalformedPalette`] as well,
    /// since no path is known; use [`Palette::load`] for files.
    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        let entries: Vec<RawEntry> = serde_json::from_reader(reader)?;
        Ok(entries.into_iter().map(PaletteEntry::from).collect())
    }

    /// Loads a palette from a JSON file. See [`Palette::from_json_str`] for the format.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the file cannot be opened or read,
    /// and [`Error::MalformedPalette`] if its content is not a valid palette.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let not_found = |source| Error::NotFound { path: path.to_owned(), source };

        let mut json = String::new();
        File::open(path)
            .map(BufReader::new)
            .and_then(|mut reader| reader.read_to_string(&mut json))
            .map_err(not_found)?;

        let palette = Self::from_json_str(&json)?;
        debug!(path = %path.display(), entries = palette.len(), "loaded palette");
        Ok(palette)
    }

    /// Returns the entries in order.
    #[must_use]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.0
    }

    /// Returns the entry names in palette order, including duplicates.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|entry| entry.name.as_str())
    }

    /// Returns the index of the entry closest to `color` under `metric`,
    /// or `None` if the palette is empty.
    ///
    /// Entries are scanned in order and the first one with the smallest distance wins.
    /// The scan stops early at an exact match.
    #[must_use]
    pub fn nearest(&self, color: Color, metric: ColorMetric) -> Option<usize> {
        let mut best = None;
        let mut best_dist = f64::INFINITY;

        for (i, entry) in self.0.iter().enumerate() {
            let dist = metric.distance(color, entry.color);
            if dist < best_dist {
                best = Some(i);
                best_dist = dist;
                if dist == 0.0 {
                    break;
                }
            }
        }

        best
    }
}

impl Deref for Palette {
    type Target = [PaletteEntry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[PaletteEntry]> for Palette {
    fn as_ref(&self) -> &[PaletteEntry] {
        self
    }
}

impl From<Vec<PaletteEntry>> for Palette {
    fn from(entries: Vec<PaletteEntry>) -> Self {
        Self(entries)
    }
}

impl FromIterator<PaletteEntry> for Palette {
    fn from_iter<I: IntoIterator<Item = PaletteEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;
    use ordered_float::OrderedFloat;

    #[test]
    fn parses_entries_in_order() {
        let palette = Palette::from_json_str(
            r#"[
                { "id": "21", "name": "Red", "color": { "r": 201, "g": 26, "b": 9, "a": 255 } },
                { "id": "23", "name": "Blue", "color": { "r": 0, "g": 85, "b": 191, "a": 255 }, "extra": true }
            ]"#,
        );

        #[allow(clippy::unwrap_used)]
        let palette = palette.unwrap();
        assert_eq!(
            palette.entries(),
            &[
                PaletteEntry::new("21", "Red", Color::new(201, 26, 9, 255)),
                PaletteEntry::new("23", "Blue", Color::new(0, 85, 191, 255)),
            ]
        );
        assert_eq!(palette.names().collect::<Vec<_>>(), ["Red", "Blue"]);
    }

    #[test]
    fn empty_array_is_a_valid_palette() {
        let palette = Palette::from_json_str("[]");
        assert!(matches!(palette, Ok(p) if p.is_empty()));
    }

    #[test]
    fn malformed_inputs() {
        let inputs = [
            // missing color
            r#"[{ "id": "1", "name": "White" }]"#,
            // missing alpha
            r#"[{ "id": "1", "name": "White", "color": { "r": 1, "g": 2, "b": 3 } }]"#,
            // numeric id
            r#"[{ "id": 1, "name": "White", "color": { "r": 1, "g": 2, "b": 3, "a": 4 } }]"#,
            // channel out of range
            r#"[{ "id": "1", "name": "White", "color": { "r": 256, "g": 2, "b": 3, "a": 4 } }]"#,
            // not an array
            r#"{ "id": "1" }"#,
            "not json",
        ];

        for input in inputs {
            assert!(
                matches!(Palette::from_json_str(input), Err(Error::MalformedPalette(_))),
                "accepted {input}"
            );
            assert!(matches!(
                Palette::from_reader(input.as_bytes()),
                Err(Error::MalformedPalette(_))
            ));
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let result = Palette::load("this/palette/does/not/exist.json");
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn nearest_on_empty_palette() {
        let palette = Palette::default();
        assert_eq!(palette.nearest(Color::new(1, 2, 3, 255), ColorMetric::Redmean), None);
    }

    #[test]
    fn nearest_prefers_first_of_equal_entries() {
        let gray = Color::new(128, 128, 128, 255);
        let palette = Palette::new(vec![
            PaletteEntry::new("a", "first", gray),
            PaletteEntry::new("b", "second", gray),
        ]);
        for metric in [ColorMetric::Redmean, ColorMetric::Euclidean] {
            assert_eq!(palette.nearest(Color::new(0, 0, 0, 255), metric), Some(0));
            assert_eq!(palette.nearest(gray, metric), Some(0));
        }
    }

    #[test]
    fn nearest_prefers_first_of_equidistant_entries() {
        // both are 10 away in the green channel only
        let palette = Palette::new(vec![
            PaletteEntry::new("a", "lighter", Color::new(50, 110, 50, 255)),
            PaletteEntry::new("b", "darker", Color::new(50, 90, 50, 255)),
        ]);
        let color = Color::new(50, 100, 50, 255);
        assert_eq!(palette.nearest(color, ColorMetric::Redmean), Some(0));
        assert_eq!(palette.nearest(color, ColorMetric::Euclidean), Some(0));
    }

    #[test]
    fn nearest_is_deterministic() {
        let palette = test_palette();
        for &color in &test_colors(64, 3) {
            let first = palette.nearest(color, ColorMetric::Redmean);
            for _ in 0..3 {
                assert_eq!(palette.nearest(color, ColorMetric::Redmean), first);
            }
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn naive_nearest_oracle() {
        let palette = test_palette();
        for metric in [ColorMetric::Redmean, ColorMetric::Euclidean] {
            for &color in &test_colors(1024, 4) {
                #[allow(clippy::unwrap_used)]
                let expected = palette
                    .iter()
                    .map(|entry| OrderedFloat(metric.distance(color, entry.color)))
                    .min()
                    .unwrap()
                    .0;

                #[allow(clippy::unwrap_used)]
                let i = palette.nearest(color, metric).unwrap();
                assert_eq!(metric.distance(color, palette[i].color), expected);
            }
        }
    }
}
