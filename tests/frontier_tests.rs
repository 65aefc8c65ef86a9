//! Frontier classification, composition and export.

mod support;

use markowitz::application::export::frontier_csv;
use markowitz::application::optimization::OptimizationOutcome;
use markowitz::domain::{
    classify, compose, ClassifiedFrontier, FrontierCategory, FrontierPoint, FrontierRecord,
    WeightsMap,
};
use markowitz::testkit::domain::optimal;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use support::assertions::{assert_near, tagged};

use FrontierCategory::{Dominated, Efficient, MinRisk};

fn points(raw: &[(f64, f64)]) -> Vec<FrontierPoint> {
    raw.iter().map(|&(risk, ret)| FrontierPoint::new(risk, ret)).collect()
}

#[test]
fn minimum_risk_then_rising_returns() {
    let classified = classify(&points(&[(0.10, 0.05), (0.05, 0.02), (0.20, 0.08)]));

    assert_eq!(
        tagged(&classified),
        vec![
            (0.05, 0.02, MinRisk),
            (0.10, 0.05, Efficient),
            (0.20, 0.08, Efficient),
        ]
    );
}

#[test]
fn lower_return_at_higher_risk_is_dominated() {
    let classified = classify(&points(&[
        (0.05, 0.02),
        (0.10, 0.05),
        (0.15, 0.01),
        (0.20, 0.08),
    ]));

    assert_eq!(
        tagged(&classified),
        vec![
            (0.05, 0.02, MinRisk),
            (0.10, 0.05, Efficient),
            (0.15, 0.01, Dominated),
            (0.20, 0.08, Efficient),
        ]
    );
}

#[test]
fn ties_at_minimum_risk_are_all_min_risk() {
    let classified = classify(&points(&[(0.3, 0.1), (0.1, 0.04), (0.1, 0.06)]));

    assert_eq!(
        tagged(&classified),
        vec![(0.1, 0.04, MinRisk), (0.1, 0.06, MinRisk), (0.3, 0.1, Efficient)]
    );
}

#[test]
fn min_risk_return_does_not_raise_the_bar() {
    // The first point past the minimum risk is efficient even below the
    // minimum-risk return.
    let classified = classify(&points(&[(0.05, 0.09), (0.10, 0.03), (0.12, 0.02)]));

    assert_eq!(
        tagged(&classified),
        vec![
            (0.05, 0.09, MinRisk),
            (0.10, 0.03, Efficient),
            (0.12, 0.02, Dominated),
        ]
    );
}

#[test]
fn classification_properties_hold_for_generated_frontiers() {
    const RISKS: [f64; 5] = [0.05, 0.10, 0.15, 0.20, 0.25];
    let mut rng = StdRng::seed_from_u64(42);

    for size in 1..40 {
        let raw: Vec<(f64, f64)> = (0..size)
            .map(|_| (RISKS[rng.gen_range(0..RISKS.len())], rng.gen_range(-0.05..0.15)))
            .collect();
        let frontier = ClassifiedFrontier::new(&points(&raw));

        assert_eq!(frontier.len(), raw.len());
        assert!(frontier
            .points()
            .windows(2)
            .all(|w| w[0].point.risk <= w[1].point.risk));

        let min_risk = frontier.points()[0].point.risk;
        assert!(frontier.min_risk().all(|p| p.point.risk == min_risk));
        assert_eq!(
            frontier.min_risk().count(),
            raw.iter().filter(|(risk, _)| *risk == min_risk).count(),
            "every minimum-risk point is MinRisk"
        );

        // Equal risks keep the order they were generated in.
        for risk in RISKS {
            let generated: Vec<f64> = raw
                .iter()
                .filter(|(r, _)| *r == risk)
                .map(|(_, ret)| *ret)
                .collect();
            let classified: Vec<f64> = frontier
                .points()
                .iter()
                .filter(|p| p.point.risk == risk)
                .map(|p| p.point.ret)
                .collect();
            assert_eq!(generated, classified, "tie order at risk {risk}");
        }

        let efficient: Vec<f64> = frontier.efficient().map(|p| p.point.ret).collect();
        assert!(efficient.windows(2).all(|w| w[0] <= w[1]));

        let mut best = f64::NEG_INFINITY;
        for p in frontier.points() {
            match p.category {
                MinRisk => {}
                Efficient => {
                    assert!(p.point.ret >= best);
                    best = p.point.ret;
                }
                Dominated => assert!(p.point.ret < best),
            }
        }

        assert_eq!(
            frontier.min_risk().count() + frontier.efficient().count() + frontier.dominated().count(),
            raw.len()
        );
    }
}

#[test]
fn empty_frontier_has_no_series() {
    let frontier = ClassifiedFrontier::new(&[]);
    assert!(frontier.is_empty());
    assert_eq!(frontier.count(MinRisk), 0);
    assert_eq!(frontier_csv(&[]), "");
}

#[test]
fn outcome_classifies_and_composes_result() {
    let result = optimal(
        &[("AAPL", 45.0), ("MSFT", 35.0), ("KO", 20.0)],
        &[(0.2, 0.08), (0.1, 0.04), (0.15, 0.03)],
    );

    let outcome = OptimizationOutcome::from_result(result).expect("outcome");

    assert_eq!(
        tagged(outcome.frontier.points()),
        vec![(0.1, 0.04, MinRisk), (0.15, 0.03, Efficient), (0.2, 0.08, Efficient)]
    );
    assert_near(outcome.composition.total_extent(), 1.0, 1e-9);
    let tickers: Vec<_> = outcome
        .composition
        .segments()
        .iter()
        .map(|s| s.ticker.as_str())
        .collect();
    assert_eq!(tickers, vec!["AAPL", "MSFT", "KO"]);
}

#[test]
fn partial_weights_leave_bar_unfilled() {
    let weights: WeightsMap = [("A", 25.0), ("B", 25.0)].into_iter().collect();
    let bar = compose(&weights);

    assert_near(bar.total_extent(), 0.5, 1e-12);
    assert_eq!(bar.segments()[0].color.hue, 0);
    assert_eq!(bar.segments()[1].color.hue, 180);
}

#[test]
fn export_keeps_wire_column_order() {
    let records: Vec<FrontierRecord> = serde_json::from_str(
        r#"[
            {"Return": 0.05, "Risk": 0.1, "MSFT": 40, "AAPL": 60},
            {"Return": 0.07, "Risk": 0.14, "MSFT": 20, "AAPL": null}
        ]"#,
    )
    .expect("frontier json");

    assert_eq!(
        frontier_csv(&records),
        "Return,Risk,MSFT,AAPL\n0.05,0.1,40,60\n0.07,0.14,20,"
    );
}

#[test]
fn export_rows_use_their_own_order() {
    let records = vec![
        FrontierRecord::new().with("Risk", 0.1).with("Return", 0.02),
        FrontierRecord::new().with("Return", 0.04).with("Risk", 0.2),
    ];

    assert_eq!(frontier_csv(&records), "Risk,Return\n0.1,0.02\n0.04,0.2");
}
