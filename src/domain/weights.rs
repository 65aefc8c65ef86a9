//! Ordered ticker → percentage weight mapping.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::id::Ticker;
use super::ordered::{deserialize_entries, serialize_entries};

/// Portfolio weights in percent, keyed by ticker.
///
/// Iteration follows insertion order (the order assets were selected, or the
/// order the optimizer listed them), which keeps composition colors stable.
/// Weights may be fractional when they come from the optimizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightsMap {
    entries: Vec<(Ticker, f64)>,
}

impl WeightsMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A map with every ticker at zero, in the given order.
    #[must_use]
    pub fn zeroed<I, T>(tickers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Ticker>,
    {
        tickers.into_iter().fold(Self::new(), |mut map, ticker| {
            map.insert(ticker.into(), 0.0);
            map
        })
    }

    /// Set a weight, keeping the ticker's original position when it exists.
    pub fn insert(&mut self, ticker: Ticker, weight: f64) {
        match self.entries.iter_mut().find(|(t, _)| *t == ticker) {
            Some(entry) => entry.1 = weight,
            None => self.entries.push((ticker, weight)),
        }
    }

    #[must_use]
    pub fn get(&self, ticker: &Ticker) -> Option<f64> {
        self.entries
            .iter()
            .find(|(t, _)| t == ticker)
            .map(|(_, w)| *w)
    }

    #[must_use]
    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.entries.iter().any(|(t, _)| t == ticker)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ticker, f64)> {
        self.entries.iter().map(|(t, w)| (t, *w))
    }

    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.entries.iter().map(|(t, _)| t)
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Into<Ticker>> FromIterator<(T, f64)> for WeightsMap {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |mut map, (ticker, weight)| {
            map.insert(ticker.into(), weight);
            map
        })
    }
}

impl Serialize for WeightsMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_entries(&self.entries, serializer)
    }
}

impl<'de> Deserialize<'de> for WeightsMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries: Vec<(Ticker, f64)> = deserialize_entries(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
