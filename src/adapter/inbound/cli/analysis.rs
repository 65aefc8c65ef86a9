//! Handlers for `stats` and `matrices`.

use serde_json::json;
use tabled::builder::Builder;
use tabled::{Table, Tabled};

use super::{output, settled};
use crate::application::session::PortfolioSession;
use crate::domain::{AssetStatistics, LabeledMatrix, Ticker};
use crate::error::Result;

#[derive(Tabled)]
struct StatisticsRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Exp. Return")]
    expected_return: String,
    #[tabled(rename = "Std Dev")]
    std_dev: String,
    #[tabled(rename = "Variance")]
    variance: String,
    #[tabled(rename = "Liquidity")]
    liquidity: String,
}

impl From<&AssetStatistics> for StatisticsRow {
    fn from(stats: &AssetStatistics) -> Self {
        Self {
            ticker: stats.ticker.to_string(),
            name: stats.long_name.clone(),
            expected_return: format!("{:.2}%", stats.expected_return),
            std_dev: format!("{:.2}%", stats.std_dev),
            variance: format!("{:.2}%", stats.variance_pct),
            liquidity: stats.liquidity_label.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

/// Execute `stats`.
pub async fn execute_stats(session: &PortfolioSession, tickers: Vec<Ticker>) -> Result<()> {
    session.select_all(tickers)?;
    session.load_statistics().await;
    let statistics = settled(session.statistics())?;

    if output::is_json() {
        output::json_output(json!({ "command": "stats", "statistics": statistics }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section("Annualized statistics");
    let rows: Vec<StatisticsRow> = statistics.iter().map(Into::into).collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}

/// Execute `matrices`.
pub async fn execute_matrices(session: &PortfolioSession, tickers: Vec<Ticker>) -> Result<()> {
    session.select_all(tickers)?;
    session.load_matrices().await;
    let matrices = settled(session.matrices())?;

    if output::is_json() {
        output::json_output(json!({ "command": "matrices", "matrices": matrices }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section("Covariance");
    output::lines(&matrix_table(&matrices.covariance, 6));
    output::section("Correlation");
    output::lines(&matrix_table(&matrices.correlation, 3));
    Ok(())
}

fn matrix_table(matrix: &LabeledMatrix, precision: usize) -> String {
    let mut builder = Builder::default();
    builder.push_record(std::iter::once(String::new()).chain(matrix.columns.iter().cloned()));
    for (label, row) in matrix.index.iter().zip(&matrix.data) {
        let cells = row.iter().map(|value| match value {
            Some(v) => format!("{v:.precision$}"),
            None => "-".to_string(),
        });
        builder.push_record(std::iter::once(label.clone()).chain(cells));
    }
    builder.build().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_table_marks_missing_values() {
        let matrix = LabeledMatrix {
            columns: vec!["A".into(), "B".into()],
            index: vec!["A".into(), "B".into()],
            data: vec![vec![Some(1.0), Some(0.25)], vec![Some(0.25), None]],
        };

        let table = matrix_table(&matrix, 2);
        assert!(table.contains("0.25"));
        assert!(table.contains("1.00"));
        assert!(table.contains('-'));
    }
}
