//! Terminal output for CLI handlers.
//!
//! Handlers print their result through [`json_output`] in JSON mode and
//! through the human printers otherwise. Human printers called in JSON
//! mode degrade to one `{"type", "payload"}` object per line. Quiet mode
//! hides everything except warnings and errors.

use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::{json, Value};

/// Output flags taken from the global CLI options.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }

    const fn hides_text(self) -> bool {
        !self.json && self.quiet
    }
}

static JSON: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

fn current() -> OutputConfig {
    OutputConfig::new(JSON.load(Ordering::Relaxed), QUIET.load(Ordering::Relaxed))
}

fn event(kind: &str, payload: Value) {
    println!("{}", json!({ "type": kind, "payload": payload }));
}

/// Apply the global `--json` and `--quiet` flags.
pub fn configure(config: OutputConfig) {
    JSON.store(config.json, Ordering::Relaxed);
    QUIET.store(config.quiet, Ordering::Relaxed);
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

/// Emit a command result as a single JSON document.
pub fn json_output(value: &impl Serialize) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{line}"),
        Err(e) => error(&format!("failed to encode output: {e}")),
    }
}

pub fn section(title: &str) {
    let config = current();
    if config.json {
        event("section", json!({ "title": title }));
    } else if !config.hides_text() {
        println!();
        println!("{}", title.bold());
    }
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = current();
    if config.json {
        event("field", json!({ "label": label, "value": value.to_string() }));
    } else if !config.hides_text() {
        println!("  {:<14} {}", label.dimmed(), value);
    }
}

pub fn success(message: &str) {
    let config = current();
    if config.json {
        event("success", json!({ "message": message }));
    } else if !config.hides_text() {
        println!("  {} {}", "✓".green(), message);
    }
}

/// Printed even in quiet mode.
pub fn warning(message: &str) {
    if is_json() {
        event("warning", json!({ "message": message }));
    } else {
        println!("  {} {}", "⚠".yellow(), message);
    }
}

/// Print an error to stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
    } else {
        eprintln!("  {} {}", "×".red(), message);
    }
}

pub fn note(message: &str) {
    let config = current();
    if config.json {
        event("note", json!({ "message": message }));
    } else if !config.hides_text() {
        println!("  {}", message.dimmed());
    }
}

pub fn hint(message: &str) {
    let config = current();
    if config.json {
        event("hint", json!({ "message": message }));
    } else if !config.hides_text() {
        println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
    }
}

/// Print a block of text such as market rules, indented line by line.
pub fn lines(content: &str) {
    let config = current();
    if config.json {
        event("lines", json!({ "content": content }));
    } else if !config.hides_text() {
        for line in content.lines() {
            println!("  {line}");
        }
    }
}

/// Print a rendered `tabled` table. Tables have no JSON form; handlers
/// emit the underlying rows through [`json_output`] instead.
pub fn table(rendered: impl Display) {
    if current().json || current().quiet {
        return;
    }
    for line in rendered.to_string().lines() {
        println!("  {line}");
    }
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner for network calls and transactions. Hidden in JSON and quiet modes.
pub fn spinner(message: &str) -> ProgressBar {
    let config = current();
    let pb = if config.json || config.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_strings(SPINNER_FRAMES)
            .template("  {spinner:.cyan} {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    };
    pb.set_message(message.to_string());
    pb
}

/// Finish a spinner with a checkmark. Silent in JSON mode, where the
/// command result document is the only output.
pub fn spinner_success(pb: &ProgressBar, message: &str) {
    if pb.is_hidden() {
        pb.finish_and_clear();
    } else {
        pb.finish_with_message(format!("{} {}", "✓".green(), message));
    }
}

/// Finish a spinner with a failure mark. The error itself is printed by `main`.
pub fn spinner_fail(pb: &ProgressBar, message: &str) {
    if pb.is_hidden() {
        pb.finish_and_clear();
    } else {
        pb.finish_with_message(format!("{} {}", "×".red(), message));
    }
}

fn styled(value: impl Display, paint: fn(&str) -> String) -> String {
    let value = value.to_string();
    if is_json() {
        value
    } else {
        paint(&value)
    }
}

pub fn positive(value: impl Display) -> String {
    styled(value, |v| v.green().to_string())
}

pub fn negative(value: impl Display) -> String {
    styled(value, |v| v.red().to_string())
}

pub fn highlight(value: impl Display) -> String {
    styled(value, |v| v.cyan().to_string())
}

pub fn muted(value: impl Display) -> String {
    styled(value, |v| v.dimmed().to_string())
}
