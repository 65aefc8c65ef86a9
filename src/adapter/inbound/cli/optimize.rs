//! Handler for `optimize`.

use std::fs;

use serde_json::json;
use tabled::{Table, Tabled};
use tracing::debug;

use super::command::OptimizeArgs;
use super::{output, settled};
use crate::application::optimization::OptimizationOutcome;
use crate::application::session::PortfolioSession;
use crate::domain::{FrontierCategory, LiquidityFactor, LiquidityStep, Ticker};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct SegmentRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Color")]
    color: String,
}

#[derive(Tabled)]
struct PointRow {
    #[tabled(rename = "Risk")]
    risk: String,
    #[tabled(rename = "Return")]
    ret: String,
    #[tabled(rename = "Series")]
    series: &'static str,
}

/// Execute `optimize`.
pub async fn execute(session: &PortfolioSession, config: &Config, args: OptimizeArgs) -> Result<()> {
    session.select_all(args.tickers)?;
    apply_weights(session, &args.weights);

    if let Some(target) = args.liquidity {
        let engine = session.engine();
        let target = LiquidityFactor::saturating(u32::from(target));
        for step in LiquidityStep::path(engine.liquidity_factor(), target) {
            engine.step_liquidity(step);
        }
    }

    let rate = config
        .risk_free
        .rate(args.risk_free.into(), args.custom_rate.unwrap_or_default());
    session.set_risk_free(rate);

    session.optimize().await?;
    let outcome = settled(session.optimization())?;

    if let Some(path) = &args.export {
        let csv = session.export_frontier().unwrap_or_default();
        fs::write(path, csv)?;
        debug!(path = %path.display(), "Frontier exported");
    }

    if output::is_json() {
        output::json_output(json!({
            "command": "optimize",
            "request": {
                "tickers": session.selected(),
                "weights": session.engine().weights(),
                "risk_free": rate,
                "liquidity_factor": session.engine().liquidity_factor(),
            },
            "result": outcome.result,
            "frontier": outcome.frontier,
            "composition": outcome.composition,
        }));
        return Ok(());
    }

    render(session, &outcome);
    if let Some(path) = &args.export {
        output::success(&format!("Frontier written to {}", path.display()));
    }
    Ok(())
}

/// Step each requested weight up one percent at a time, stopping where the
/// engine refuses.
fn apply_weights(session: &PortfolioSession, weights: &[(Ticker, u32)]) {
    let engine = session.engine();
    for (ticker, requested) in weights {
        if engine.weight(ticker).is_none() {
            output::warning(&format!("{ticker} is not among the selected tickers; ignored"));
            continue;
        }
        let applied = (0..*requested)
            .take_while(|_| engine.increment_once(ticker))
            .count();
        if applied < *requested as usize {
            output::warning(&format!(
                "{ticker}: only {applied}% of {requested}% applied, total is capped at 100%"
            ));
        }
    }
}

fn render(session: &PortfolioSession, outcome: &OptimizationOutcome) {
    if output::is_quiet() {
        return;
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Inputs");
    output::field("Risk-free", output::risk_free(session.risk_free()));
    output::field("Liquidity", session.engine().liquidity_factor());
    output::field(
        "Allocated",
        output::allocated(session.engine().total(), session.engine().remaining()),
    );

    let result = &outcome.result;
    output::section("Optimal portfolio");
    output::field("Return", output::signed_percent(result.optimal_return));
    output::field("Risk", output::percent(result.optimal_risk));
    output::field("Sharpe", output::sharpe(result.optimal_sharpe));
    if let Some(target) = result.liquidity_target {
        output::field("Liquidity target", output::percent(target));
    }
    if let Some(achieved) = result.liquidity_achieved {
        output::field("Liquidity held", output::percent(achieved));
    }

    output::section("Composition");
    let segments: Vec<SegmentRow> = outcome
        .composition
        .segments()
        .iter()
        .map(|s| SegmentRow {
            ticker: s.ticker.to_string(),
            weight: s.label.clone(),
            color: s.color.to_string(),
        })
        .collect();
    output::lines(&Table::new(segments).to_string());

    output::section("Efficient frontier");
    for category in [
        FrontierCategory::MinRisk,
        FrontierCategory::Efficient,
        FrontierCategory::Dominated,
    ] {
        output::field(output::series(category), outcome.frontier.count(category));
    }
    if outcome.frontier.is_empty() {
        output::note("(no frontier points)");
        return;
    }
    let points: Vec<PointRow> = outcome
        .frontier
        .points()
        .iter()
        .map(|p| PointRow {
            risk: format!("{:.4}", p.point.risk),
            ret: format!("{:.4}", p.point.ret),
            series: output::series(p.category),
        })
        .collect();
    output::lines(&Table::new(points).to_string());
}
