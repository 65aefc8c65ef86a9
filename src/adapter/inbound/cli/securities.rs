//! Handlers for the `securities` command group.

use serde_json::json;
use tabled::{Table, Tabled};

use super::{output, settled};
use crate::application::session::PortfolioSession;
use crate::domain::{Security, Ticker};
use crate::error::Result;

#[derive(Tabled)]
struct SecurityRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl From<&Security> for SecurityRow {
    fn from(security: &Security) -> Self {
        let path = security.category();
        Self {
            ticker: security.ticker.to_string(),
            name: security.long_name.clone(),
            category: match path.child {
                Some(child) => format!("{}/{}", path.parent, child),
                None => path.parent,
            },
        }
    }
}

/// Execute `securities list`.
pub async fn execute_list(session: &PortfolioSession, grouped: bool) -> Result<()> {
    session.load_catalog().await;
    let catalog = settled(session.catalog())?;

    if output::is_json() {
        let body = if grouped {
            json!({ "command": "securities.list", "groups": catalog.grouped() })
        } else {
            json!({ "command": "securities.list", "securities": catalog })
        };
        output::json_output(body);
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    if catalog.is_empty() {
        output::note("(no securities)");
        return Ok(());
    }

    if !grouped {
        output::section(&format!("Securities ({})", catalog.len()));
        let rows: Vec<SecurityRow> = catalog.securities().iter().map(Into::into).collect();
        output::lines(&Table::new(rows).to_string());
        return Ok(());
    }

    for (parent, group) in catalog.grouped() {
        output::section(&parent);
        for (child, securities) in &group.children {
            output::field(child, listing(securities));
        }
        if !group.ungrouped.is_empty() {
            output::field("-", listing(&group.ungrouped));
        }
    }
    Ok(())
}

fn listing(securities: &[Security]) -> String {
    securities
        .iter()
        .map(|s| s.ticker.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Execute `securities add`.
pub async fn execute_add(session: &PortfolioSession, ticker: &Ticker) -> Result<()> {
    session.add_security(ticker).await;
    let message = settled(session.added())?;

    if output::is_json() {
        output::json_output(json!({
            "command": "securities.add",
            "ticker": ticker,
            "message": message,
        }));
        return Ok(());
    }

    output::success(&message);
    output::hint(&format!("run `markowitz stats {ticker}` to inspect it"));
    Ok(())
}
