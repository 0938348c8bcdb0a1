//! Contains the color distance metrics used for nearest color search.

use crate::Color;

/// A strategy for measuring the perceived distance between two colors.
///
/// All metrics ignore the alpha channel, are symmetric, and return `0.0`
/// for identical colors. Distances from different metrics are not comparable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ColorMetric {
    /// The "redmean" approximation: a weighted euclidean distance whose
    /// red and blue weights depend on the mean red value of the two colors.
    ///
    /// See <https://en.wikipedia.org/wiki/Color_difference#sRGB>.
    #[default]
    Redmean,
    /// Plain euclidean distance in sRGB.
    Euclidean,
}

impl ColorMetric {
    /// Returns the distance between `a` and `b` according to this metric.
    #[must_use]
    pub fn distance(self, a: Color, b: Color) -> f64 {
        match self {
            ColorMetric::Redmean => redmean_distance(a, b),
            ColorMetric::Euclidean => euclidean_distance(a, b),
        }
    }
}

/// The RGB channels of a color as `f64`.
fn rgb(color: Color) -> [f64; 3] {
    [color.red, color.green, color.blue].map(f64::from)
}

/// The redmean distance between two colors.
#[must_use]
pub fn redmean_distance(a: Color, b: Color) -> f64 {
    let [r1, g1, b1] = rgb(a);
    let [r2, g2, b2] = rgb(b);

    let r = (r1 + r2) / 2.0;
    let dr = r2 - r1;
    let dg = g2 - g1;
    let db = b2 - b1;

    ((2.0 + r / 256.0) * dr * dr + 4.0 * dg * dg + (2.0 + (255.0 - r) / 256.0) * db * db).sqrt()
}

/// The euclidean distance between the RGB channels of two colors.
#[must_use]
pub fn euclidean_distance(a: Color, b: Color) -> f64 {
    let a = rgb(a);
    let b = rgb(b);
    let mut dist = 0.0;
    for c in 0..3 {
        let d = a[c] - b[c];
        dist += d * d;
    }
    dist.sqrt()
}
