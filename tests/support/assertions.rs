use markowitz::domain::{ClassifiedPoint, FrontierCategory};

pub fn assert_near(actual: f64, expected: f64, tolerance: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

/// Compact `(risk, return, category)` view for comparing classifier output.
pub fn tagged(points: &[ClassifiedPoint]) -> Vec<(f64, f64, FrontierCategory)> {
    points
        .iter()
        .map(|p| (p.point.risk, p.point.ret, p.category))
        .collect()
}
