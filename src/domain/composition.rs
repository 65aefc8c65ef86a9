//! Single-row composition bar data derived from a weights map.

use std::fmt;

use serde::{Serialize, Serializer};

use super::id::Ticker;
use super::weights::WeightsMap;

/// Saturation shared by every segment color, in percent.
pub const SEGMENT_SATURATION: u8 = 70;
/// Lightness shared by every segment color, in percent.
pub const SEGMENT_LIGHTNESS: u8 = 50;

/// An HSL color; displays as a CSS `hsl()` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Hsl {
    /// Color `index` of `count` evenly spaced hues.
    #[must_use]
    pub fn spaced(index: usize, count: usize) -> Self {
        let hue = if count == 0 {
            0
        } else {
            (360.0 * index as f64 / count as f64).round() as u16
        };
        Self {
            hue,
            saturation: SEGMENT_SATURATION,
            lightness: SEGMENT_LIGHTNESS,
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

impl Serialize for Hsl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One segment of the composition bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionSegment {
    pub ticker: Ticker,
    /// Share of the full bar width, `weight / 100`.
    pub fraction: f64,
    pub color: Hsl,
    /// Weight with two decimals and a percent sign.
    pub label: String,
}

/// Composition bar for a set of weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Composition {
    segments: Vec<CompositionSegment>,
}

impl Composition {
    #[must_use]
    pub fn segments(&self) -> &[CompositionSegment] {
        &self.segments
    }

    /// Filled share of the bar; below 1 when weights are unallocated.
    #[must_use]
    pub fn total_extent(&self) -> f64 {
        self.segments.iter().map(|s| s.fraction).sum()
    }
}

/// Derive the composition bar for `weights`.
#[must_use]
pub fn compose(weights: &WeightsMap) -> Composition {
    let count = weights.len();
    let segments = weights
        .iter()
        .enumerate()
        .map(|(i, (ticker, weight))| CompositionSegment {
            ticker: ticker.clone(),
            fraction: weight / 100.0,
            color: Hsl::spaced(i, count),
            label: format!("{weight:.2}%"),
        })
        .collect();
    Composition { segments }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hues_are_evenly_spaced() {
        let weights: WeightsMap = [("A", 10.0), ("B", 20.0), ("C", 30.0)].into_iter().collect();
        let bar = compose(&weights);

        let hues: Vec<u16> = bar.segments().iter().map(|s| s.color.hue).collect();
        assert_eq!(hues, vec![0, 120, 240]);
        assert_eq!(bar.segments()[1].color.to_string(), "hsl(120, 70%, 50%)");
    }

    #[test]
    fn hue_rounds_to_nearest_degree() {
        assert_eq!(Hsl::spaced(1, 7).hue, 51);
        assert_eq!(Hsl::spaced(2, 7).hue, 103);
    }

    #[test]
    fn labels_use_two_decimals() {
        let weights: WeightsMap = [("AAPL", 33.333), ("MSFT", 5.0)].into_iter().collect();
        let bar = compose(&weights);

        assert_eq!(bar.segments()[0].label, "33.33%");
        assert_eq!(bar.segments()[1].label, "5.00%");
    }

    #[test]
    fn extent_matches_weight_sum() {
        let weights: WeightsMap = [("A", 12.5), ("B", 40.0), ("C", 7.25)].into_iter().collect();
        let bar = compose(&weights);

        assert!((bar.total_extent() - weights.total() / 100.0).abs() < 1e-12);
        assert!(bar.total_extent() < 1.0);
    }

    #[test]
    fn empty_weights_give_empty_bar() {
        let bar = compose(&WeightsMap::new());
        assert!(bar.segments().is_empty());
        assert_eq!(bar.total_extent(), 0.0);
    }
}
