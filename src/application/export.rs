//! Frontier export.

use crate::domain::FrontierRecord;

/// Render frontier records as comma-separated text.
///
/// The header is the first record's columns in the order the optimizer sent
/// them. Each row is that record's own values in its own order; nothing is
/// quoted or realigned. Missing values (NaN) render as empty cells. An empty
/// frontier renders as the empty string.
#[must_use]
pub fn frontier_csv(records: &[FrontierRecord]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };

    let header = first.keys().collect::<Vec<_>>().join(",");
    let rows = records.iter().map(|record| {
        record
            .values()
            .map(|v| if v.is_nan() { String::new() } else { v.to_string() })
            .collect::<Vec<_>>()
            .join(",")
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}
