//! Efficient-frontier points and their chart classification.
//!
//! The optimizer returns a cloud of (risk, return) portfolios. Before
//! charting, each point is tagged as the minimum-risk portfolio, part of the
//! Pareto-efficient envelope, or dominated by a lower-risk point.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::DomainError;
use super::ordered::{deserialize_entries, serialize_entries};

/// One portfolio on the risk/return plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrontierPoint {
    /// Annualized standard deviation.
    pub risk: f64,
    /// Annualized expected return.
    #[serde(rename = "return")]
    pub ret: f64,
}

impl FrontierPoint {
    #[must_use]
    pub const fn new(risk: f64, ret: f64) -> Self {
        Self { risk, ret }
    }
}

/// Chart series a frontier point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontierCategory {
    /// Lowest-risk point(s); drawn as the highlighted portfolio.
    MinRisk,
    /// No lower-risk point offers an equal or higher return.
    Efficient,
    /// Some lower-risk point offers a higher return.
    Dominated,
}

impl FrontierCategory {
    /// Stable name used in logs and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MinRisk => "min_risk",
            Self::Efficient => "efficient",
            Self::Dominated => "dominated",
        }
    }

    /// Legend label of the chart series.
    #[must_use]
    pub const fn series_name(self) -> &'static str {
        match self {
            Self::MinRisk => "Selected Portfolio",
            Self::Efficient => "Efficient Frontier",
            Self::Dominated => "Dominated Frontier",
        }
    }
}

/// A frontier point tagged with its category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassifiedPoint {
    #[serde(flatten)]
    pub point: FrontierPoint,
    pub category: FrontierCategory,
}

/// Classify frontier points for charting.
///
/// Points are stably sorted by risk ascending, then swept once:
///
/// - every point at the minimum risk is `MinRisk` and does not advance the
///   running maximum return;
/// - any other point is `Efficient` when its return is at least the running
///   maximum (which it then becomes), otherwise `Dominated`.
///
/// Because `MinRisk` points never advance the running maximum, the first
/// point above the minimum risk is always `Efficient`, even if a `MinRisk`
/// point had a higher return.
///
/// Empty input yields an empty vector.
#[must_use]
pub fn classify(points: &[FrontierPoint]) -> Vec<ClassifiedPoint> {
    let mut sorted = points.to_vec();
    // `+ 0.0` folds -0.0 into 0.0 so equal risks keep their input order.
    sorted.sort_by(|a, b| (a.risk + 0.0).total_cmp(&(b.risk + 0.0)));

    let Some(risk_min) = sorted.first().map(|p| p.risk) else {
        return Vec::new();
    };

    let mut max_return_so_far = f64::NEG_INFINITY;
    sorted
        .into_iter()
        .map(|point| {
            let category = if point.risk == risk_min {
                FrontierCategory::MinRisk
            } else if point.ret >= max_return_so_far {
                max_return_so_far = point.ret;
                FrontierCategory::Efficient
            } else {
                FrontierCategory::Dominated
            };
            ClassifiedPoint { point, category }
        })
        .collect()
}

/// Classified frontier, sorted by risk, split into chart series on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClassifiedFrontier {
    points: Vec<ClassifiedPoint>,
}

impl ClassifiedFrontier {
    /// Classify `points` (see [`classify`]).
    #[must_use]
    pub fn new(points: &[FrontierPoint]) -> Self {
        Self {
            points: classify(points),
        }
    }

    /// All points, sorted by risk ascending.
    #[must_use]
    pub fn points(&self) -> &[ClassifiedPoint] {
        &self.points
    }

    /// Points of one chart series, in risk order.
    pub fn series(&self, category: FrontierCategory) -> impl Iterator<Item = &ClassifiedPoint> {
        self.points.iter().filter(move |p| p.category == category)
    }

    pub fn min_risk(&self) -> impl Iterator<Item = &ClassifiedPoint> {
        self.series(FrontierCategory::MinRisk)
    }

    pub fn efficient(&self) -> impl Iterator<Item = &ClassifiedPoint> {
        self.series(FrontierCategory::Efficient)
    }

    pub fn dominated(&self) -> impl Iterator<Item = &ClassifiedPoint> {
        self.series(FrontierCategory::Dominated)
    }

    #[must_use]
    pub fn count(&self, category: FrontierCategory) -> usize {
        self.series(category).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One raw row of the optimizer's frontier array.
///
/// Rows carry `Risk` and `Return` plus, optionally, one weight column per
/// asset. Keys keep the order they arrived in so exports reproduce the
/// server's column layout. `null` values are kept as NaN.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontierRecord {
    fields: Vec<(String, f64)>,
}

impl FrontierRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, replacing an existing column of the same name.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(field) => field.1 = value,
            None => self.fields.push((key, value)),
        }
        self
    }

    /// Build a record holding only `Risk` and `Return`.
    #[must_use]
    pub fn from_point(point: FrontierPoint) -> Self {
        Self::new().with("Risk", point.risk).with("Return", point.ret)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.fields.iter().map(|(_, v)| *v)
    }

    /// Case-insensitive column lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| *v)
    }

    /// Extract the (risk, return) coordinates of this record.
    ///
    /// `index` is only used to report which record is malformed.
    pub fn point(&self, index: usize) -> Result<FrontierPoint, DomainError> {
        let risk = self
            .get("risk")
            .ok_or(DomainError::MalformedFrontierRecord { index, field: "Risk" })?;
        let ret = self
            .get("return")
            .ok_or(DomainError::MalformedFrontierRecord {
                index,
                field: "Return",
            })?;
        Ok(FrontierPoint::new(risk, ret))
    }
}

impl Serialize for FrontierRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_entries(&self.fields, serializer)
    }
}

impl<'de> Deserialize<'de> for FrontierRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries: Vec<(String, Option<f64>)> = deserialize_entries(deserializer)?;
        Ok(entries
            .into_iter()
            .fold(Self::new(), |record, (key, value)| {
                record.with(key, value.unwrap_or(f64::NAN))
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(risk: f64, ret: f64) -> FrontierPoint {
        FrontierPoint::new(risk, ret)
    }

    fn categories(points: &[ClassifiedPoint]) -> Vec<FrontierCategory> {
        points.iter().map(|c| c.category).collect()
    }

    #[test]
    fn sorts_by_risk_and_tags_minimum() {
        let out = classify(&[p(0.10, 0.05), p(0.05, 0.02), p(0.20, 0.08)]);

        let risks: Vec<f64> = out.iter().map(|c| c.point.risk).collect();
        assert_eq!(risks, vec![0.05, 0.10, 0.20]);
        assert_eq!(
            categories(&out),
            vec![
                FrontierCategory::MinRisk,
                FrontierCategory::Efficient,
                FrontierCategory::Efficient
            ]
        );
    }

    #[test]
    fn signed_zero_risks_keep_input_order() {
        let out = classify(&[p(0.0, 0.01), p(-0.0, 0.02), p(0.1, 0.03)]);

        let returns: Vec<f64> = out.iter().map(|c| c.point.ret).collect();
        assert_eq!(returns, vec![0.01, 0.02, 0.03]);
        assert_eq!(
            categories(&out),
            vec![
                FrontierCategory::MinRisk,
                FrontierCategory::MinRisk,
                FrontierCategory::Efficient
            ]
        );
    }

    #[test]
    fn lower_return_at_higher_risk_is_dominated() {
        let out = classify(&[p(0.05, 0.02), p(0.10, 0.05), p(0.15, 0.01), p(0.20, 0.08)]);

        assert_eq!(
            categories(&out),
            vec![
                FrontierCategory::MinRisk,
                FrontierCategory::Efficient,
                FrontierCategory::Dominated,
                FrontierCategory::Efficient
            ]
        );
    }

    #[test]
    fn equal_return_stays_efficient() {
        let out = classify(&[p(0.05, 0.01), p(0.10, 0.04), p(0.12, 0.04)]);
        assert_eq!(out[2].category, FrontierCategory::Efficient);
    }

    #[test]
    fn all_points_at_minimum_risk_are_min_risk() {
        let out = classify(&[p(0.05, 0.03), p(0.07, 0.04), p(0.05, 0.01)]);

        assert_eq!(out[0].category, FrontierCategory::MinRisk);
        assert_eq!(out[1].category, FrontierCategory::MinRisk);
        assert_eq!(out[2].category, FrontierCategory::Efficient);
    }

    #[test]
    fn equal_risk_points_keep_input_order() {
        let out = classify(&[p(0.10, 0.09), p(0.05, 0.02), p(0.10, 0.03)]);

        assert_eq!(out[1].point, p(0.10, 0.09));
        assert_eq!(out[2].point, p(0.10, 0.03));
        assert_eq!(out[2].category, FrontierCategory::Dominated);
    }

    #[test]
    fn min_risk_return_does_not_raise_the_envelope() {
        // The min-risk point has the best return, yet the next point is
        // still tagged efficient because min-risk points are not swept.
        let out = classify(&[p(0.05, 0.10), p(0.08, 0.02)]);

        assert_eq!(
            categories(&out),
            vec![FrontierCategory::MinRisk, FrontierCategory::Efficient]
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(classify(&[]).is_empty());
    }

    #[test]
    fn single_point_is_min_risk() {
        let out = classify(&[p(0.3, -0.1)]);
        assert_eq!(categories(&out), vec![FrontierCategory::MinRisk]);
    }

    #[test]
    fn classified_frontier_splits_series() {
        let frontier =
            ClassifiedFrontier::new(&[p(0.05, 0.02), p(0.10, 0.05), p(0.15, 0.01), p(0.20, 0.08)]);

        assert_eq!(frontier.len(), 4);
        assert_eq!(frontier.count(FrontierCategory::MinRisk), 1);
        assert_eq!(frontier.count(FrontierCategory::Efficient), 2);
        assert_eq!(frontier.count(FrontierCategory::Dominated), 1);
        let dominated: Vec<_> = frontier.series(FrontierCategory::Dominated).collect();
        assert_eq!(dominated[0].point, p(0.15, 0.01));
    }

    #[test]
    fn record_keeps_wire_order_and_extracts_point() {
        let record: FrontierRecord =
            serde_json::from_str(r#"{"Return": 0.07, "Risk": 0.12, "MSFT": 0.4, "AAPL": 0.6}"#)
                .expect("record");

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["Return", "Risk", "MSFT", "AAPL"]);
        assert_eq!(record.point(0).expect("point"), p(0.12, 0.07));
    }

    #[test]
    fn record_without_risk_is_malformed() {
        let record = FrontierRecord::new().with("Return", 0.1);
        assert_eq!(
            record.point(3),
            Err(DomainError::MalformedFrontierRecord {
                index: 3,
                field: "Risk"
            })
        );
    }

    #[test]
    fn record_serializes_in_insertion_order() {
        let record = FrontierRecord::new().with("Risk", 0.5).with("Return", 0.25);
        let json = serde_json::to_string(&record).expect("json");
        assert_eq!(json, r#"{"Risk":0.5,"Return":0.25}"#);
    }

    #[test]
    fn classified_point_serializes_flat() {
        let out = classify(&[p(0.1, 0.2)]);
        let json = serde_json::to_value(out[0]).expect("json");
        assert_eq!(json["risk"], 0.1);
        assert_eq!(json["return"], 0.2);
        assert_eq!(json["category"], "min_risk");
    }
}
