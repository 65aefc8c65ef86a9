//! Integer percentage allocation with guarded single steps.
//!
//! Invariants: every weight is non-negative (by type) and the weights never
//! sum above [`MAX_TOTAL`]. Both steps re-read the current total at the
//! moment they run, so any interleaving of callers keeps the bound.

use super::id::Ticker;
use super::weights::WeightsMap;

/// Upper bound of the summed allocation, in percent.
pub const MAX_TOTAL: u32 = 100;

/// Per-asset starting weights chosen by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    entries: Vec<(Ticker, u32)>,
}

impl Allocation {
    /// A zero allocation over `tickers`, in the given order. Duplicate
    /// tickers collapse to their first occurrence.
    #[must_use]
    pub fn zeroed<I, T>(tickers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Ticker>,
    {
        let mut entries: Vec<(Ticker, u32)> = Vec::new();
        for ticker in tickers {
            let ticker = ticker.into();
            if !entries.iter().any(|(t, _)| *t == ticker) {
                entries.push((ticker, 0));
            }
        }
        Self { entries }
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Percent still unallocated.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        MAX_TOTAL.saturating_sub(self.total())
    }

    #[must_use]
    pub fn get(&self, ticker: &Ticker) -> Option<u32> {
        self.entries
            .iter()
            .find(|(t, _)| t == ticker)
            .map(|(_, w)| *w)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ticker, u32)> {
        self.entries.iter().map(|(t, w)| (t, *w))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add one percent to `ticker` unless the total is already at the cap.
    ///
    /// Returns whether the weight changed. Unknown tickers are a no-op.
    pub fn increment_once(&mut self, ticker: &Ticker) -> bool {
        if self.total() >= MAX_TOTAL {
            return false;
        }
        match self.entries.iter_mut().find(|(t, _)| t == ticker) {
            Some(entry) => {
                entry.1 += 1;
                true
            }
            None => false,
        }
    }

    /// Remove one percent from `ticker` unless it is already zero.
    ///
    /// Returns whether the weight changed. Unknown tickers are a no-op.
    pub fn decrement_once(&mut self, ticker: &Ticker) -> bool {
        match self.entries.iter_mut().find(|(t, _)| t == ticker) {
            Some(entry) if entry.1 > 0 => {
                entry.1 = entry.1.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    /// Snapshot as a fractional weights map.
    #[must_use]
    pub fn to_weights(&self) -> WeightsMap {
        self.entries
            .iter()
            .map(|(t, w)| (t.clone(), f64::from(*w)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Ticker {
        Ticker::from(s)
    }

    #[test]
    fn increment_stops_at_cap() {
        let mut alloc = Allocation::zeroed(["A", "B", "C"]);
        for _ in 0..100 {
            assert!(alloc.increment_once(&t("A")));
        }

        assert_eq!(alloc.get(&t("A")), Some(100));
        assert!(!alloc.increment_once(&t("B")));
        assert!(!alloc.increment_once(&t("A")));
        assert_eq!(alloc.total(), 100);
        assert_eq!(alloc.remaining(), 0);
    }

    #[test]
    fn decrement_at_zero_is_noop() {
        let mut alloc = Allocation::zeroed(["A"]);
        assert!(!alloc.decrement_once(&t("A")));
        assert_eq!(alloc.get(&t("A")), Some(0));
    }

    #[test]
    fn decrement_frees_room_for_other_assets() {
        let mut alloc = Allocation::zeroed(["A", "B"]);
        for _ in 0..100 {
            alloc.increment_once(&t("A"));
        }
        assert!(alloc.decrement_once(&t("A")));
        assert!(alloc.increment_once(&t("B")));
        assert_eq!(alloc.get(&t("A")), Some(99));
        assert_eq!(alloc.get(&t("B")), Some(1));
    }

    #[test]
    fn unknown_ticker_is_ignored() {
        let mut alloc = Allocation::zeroed(["A"]);
        assert!(!alloc.increment_once(&t("Z")));
        assert!(!alloc.decrement_once(&t("Z")));
        assert_eq!(alloc.total(), 0);
    }

    #[test]
    fn duplicates_collapse() {
        let alloc = Allocation::zeroed(["A", "B", "A"]);
        assert_eq!(alloc.iter().count(), 2);
    }

    #[test]
    fn converts_to_weights_in_order() {
        let mut alloc = Allocation::zeroed(["B", "A"]);
        alloc.increment_once(&t("A"));

        let weights = alloc.to_weights();
        let entries: Vec<(&str, f64)> = weights.iter().map(|(t, w)| (t.as_str(), w)).collect();
        assert_eq!(entries, vec![("B", 0.0), ("A", 1.0)]);
    }
}
