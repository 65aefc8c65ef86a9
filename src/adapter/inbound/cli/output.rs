//! Terminal rendering for the CLI.
//!
//! Three modes, chosen once from the global flags:
//!
//! - human: colored, indented text on stdout;
//! - `--quiet`: only warnings and errors;
//! - `--json`: every message becomes one `{"type", "payload"}` line, and
//!   commands print their structured result with [`json_output`].
//!
//! The value formatters at the bottom render portfolio figures the same way
//! in every command.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::{json, Value};

use crate::domain::{FrontierCategory, RiskFreeRate};

/// Output mode selected by the global flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    /// `-v` count; logging picks its level from it.
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static MODE: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn mode() -> OutputConfig {
    let cell = MODE.get_or_init(RwLock::default);
    match cell.read() {
        Ok(mode) => *mode,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Install the output mode. Called once from `main`.
pub fn configure(config: OutputConfig) {
    let cell = MODE.get_or_init(RwLock::default);
    match cell.write() {
        Ok(mut mode) => *mode = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

#[must_use]
pub fn is_json() -> bool {
    mode().json
}

#[must_use]
pub fn is_quiet() -> bool {
    mode().quiet
}

/// How a message behaves under `--quiet`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Level {
    Regular,
    Always,
}

/// Route one message: a JSON line in JSON mode, otherwise `human` unless
/// quiet mode hides it.
fn emit(kind: &str, payload: Value, level: Level, human: impl FnOnce()) {
    let mode = mode();
    if mode.json {
        println!("{}", json!({ "type": kind, "payload": payload }));
        return;
    }
    if mode.quiet && level == Level::Regular {
        return;
    }
    human();
}

/// Application name and version.
pub fn header(version: &str) {
    emit(
        "header",
        json!({ "app": "markowitz", "version": version }),
        Level::Regular,
        || {
            println!("{} {}", "markowitz".bold(), version.dimmed());
            println!();
        },
    );
}

pub fn section(title: &str) {
    emit("section", json!({ "title": title }), Level::Regular, || {
        println!();
        println!("{}", title.bold());
    });
}

/// A labeled value, aligned under its section.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        json!({ "label": label, "value": value }),
        Level::Regular,
        || println!("  {:<16} {}", label.dimmed(), value),
    );
}

/// A block of preformatted text such as a table.
pub fn lines(content: &str) {
    emit("lines", json!({ "content": content }), Level::Regular, || {
        for line in content.lines() {
            println!("  {line}");
        }
    });
}

pub fn success(message: &str) {
    emit("success", json!({ "message": message }), Level::Regular, || {
        println!("  {} {}", "✓".green(), message);
    });
}

pub fn note(message: &str) {
    emit("note", json!({ "message": message }), Level::Regular, || {
        println!("  {}", message.dimmed());
    });
}

pub fn hint(message: &str) {
    emit("hint", json!({ "message": message }), Level::Regular, || {
        println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
    });
}

/// Shown even in quiet mode.
pub fn warning(message: &str) {
    emit("warning", json!({ "message": message }), Level::Always, || {
        println!("  {} {}", "⚠".yellow(), message);
    });
}

/// Errors go to stderr in every mode.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

/// Print a command's structured result as one JSON document.
pub fn json_output(value: Value) {
    println!("{value}");
}

fn paint(text: String, color: impl FnOnce(&String) -> String) -> String {
    if is_json() {
        text
    } else {
        color(&text)
    }
}

/// A decimal fraction as a percentage, green when non-negative, red below.
pub fn signed_percent(fraction: f64) -> String {
    let text = percent(fraction);
    if fraction >= 0.0 {
        paint(text, |t| t.green().to_string())
    } else {
        paint(text, |t| t.red().to_string())
    }
}

/// A decimal fraction as a plain percentage with two decimals.
#[must_use]
pub fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Sharpe ratio, or a muted `n/a` when the optimizer reported none.
pub fn sharpe(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => paint(format!("{r:.3}"), |t| t.cyan().to_string()),
        None => paint("n/a".to_string(), |t| t.dimmed().to_string()),
    }
}

/// Allocated share of the starting weights, with what is left.
#[must_use]
pub fn allocated(total: u32, remaining: u32) -> String {
    format!("{total}% ({remaining}% left)")
}

/// Risk-free benchmark and its rate.
#[must_use]
pub fn risk_free(rate: RiskFreeRate) -> String {
    format!("{} at {}", rate.kind.as_str(), percent(rate.rate))
}

/// Chart series label for a frontier category. Left uncolored so tables
/// keep their column widths.
#[must_use]
pub const fn series(category: FrontierCategory) -> &'static str {
    category.series_name()
}
