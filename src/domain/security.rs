//! Securities catalog, per-asset statistics and asset selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::Ticker;

/// Category used when a security has none.
pub const DEFAULT_CATEGORY: &str = "Other";

/// A selectable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    pub ticker: Ticker,
    #[serde(default)]
    pub long_name: String,
    /// Slash-separated `parent/child` category path.
    #[serde(default)]
    pub proxy_category: Option<String>,
}

impl Security {
    #[must_use]
    pub fn category(&self) -> CategoryPath {
        CategoryPath::parse(self.proxy_category.as_deref())
    }
}

/// Parsed `parent/child` category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPath {
    pub parent: String,
    pub child: Option<String>,
}

impl CategoryPath {
    /// Parse a raw category. Missing or empty categories become
    /// [`DEFAULT_CATEGORY`]; a blank child is treated as absent and any
    /// segments past the second are ignored.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = raw.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_CATEGORY);
        let mut parts = raw.split('/');
        let parent = parts.next().unwrap_or(DEFAULT_CATEGORY).to_string();
        let child = parts
            .next()
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string);
        Self { parent, child }
    }
}

/// Securities under one parent category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    /// Securities filed under a child category.
    pub children: BTreeMap<String, Vec<Security>>,
    /// Securities with no child category.
    pub ungrouped: Vec<Security>,
}

/// The full list of selectable securities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    securities: Vec<Security>,
}

impl Catalog {
    #[must_use]
    pub fn new(securities: Vec<Security>) -> Self {
        Self { securities }
    }

    #[must_use]
    pub fn securities(&self) -> &[Security] {
        &self.securities
    }

    #[must_use]
    pub fn find(&self, ticker: &Ticker) -> Option<&Security> {
        self.securities.iter().find(|s| &s.ticker == ticker)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.securities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }

    /// Group securities by parent, then child category.
    #[must_use]
    pub fn grouped(&self) -> BTreeMap<String, CategoryGroup> {
        let mut groups: BTreeMap<String, CategoryGroup> = BTreeMap::new();
        for security in &self.securities {
            let CategoryPath { parent, child } = security.category();
            let group = groups.entry(parent).or_default();
            match child {
                Some(child) => group
                    .children
                    .entry(child)
                    .or_default()
                    .push(security.clone()),
                None => group.ungrouped.push(security.clone()),
            }
        }
        groups
    }
}

/// Annualized statistics for one security, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetStatistics {
    pub ticker: Ticker,
    #[serde(default)]
    pub long_name: String,
    pub expected_return: f64,
    pub variance_pct: f64,
    pub std_dev: f64,
    #[serde(default)]
    pub liquidity_label: Option<String>,
    #[serde(default)]
    pub proxy_category: Option<String>,
}

/// A square matrix with row and column labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabeledMatrix {
    pub columns: Vec<String>,
    pub index: Vec<String>,
    /// Row-major values; `None` where the series had no overlap.
    pub data: Vec<Vec<Option<f64>>>,
}

impl LabeledMatrix {
    /// Value at (`row`, `column`) by label.
    #[must_use]
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.index.iter().position(|l| l == row)?;
        let c = self.columns.iter().position(|l| l == column)?;
        self.data.get(r)?.get(c).copied().flatten()
    }
}

/// Covariance and correlation matrices for a ticker set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssetMatrices {
    pub tickers: Vec<Ticker>,
    pub covariance: LabeledMatrix,
    pub correlation: LabeledMatrix,
}

/// Securities picked for optimization, capped at `limit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSelection {
    tickers: Vec<Ticker>,
    limit: usize,
}

impl AssetSelection {
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            tickers: Vec::new(),
            limit,
        }
    }

    #[must_use]
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.tickers.contains(ticker)
    }

    /// Add `ticker`. Returns `Ok(false)` when it was already selected.
    pub fn select(&mut self, ticker: Ticker) -> Result<bool, DomainError> {
        if self.contains(&ticker) {
            return Ok(false);
        }
        if self.tickers.len() >= self.limit {
            return Err(DomainError::SelectionLimitReached { limit: self.limit });
        }
        self.tickers.push(ticker);
        Ok(true)
    }

    /// Remove `ticker`. Returns whether it was selected.
    pub fn deselect(&mut self, ticker: &Ticker) -> bool {
        let before = self.tickers.len();
        self.tickers.retain(|t| t != ticker);
        self.tickers.len() != before
    }
}
