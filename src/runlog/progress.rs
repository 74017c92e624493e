//! Progress display sinks driven by the run logger
//!
//! The logger only talks to the [`ProgressSink`] trait. Which implementation
//! backs it is picked by [`ProgressMode`], or injected directly through
//! [`RunLoggerBuilder::sink`](super::RunLoggerBuilder::sink).

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, Result};

/// Default bar layout for the console sink.
pub const DEFAULT_TEMPLATE: &str =
    "{prefix}{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// Capability the run logger drives while steps are logged.
///
/// Initialization with the total happens when the sink is constructed.
/// `close` is called at most once by the logger, after which the sink is
/// dropped.
pub trait ProgressSink: fmt::Debug {
    /// Move the indicator forward by `delta` units.
    fn advance(&mut self, delta: u64);

    /// Replace the displayed metric values.
    fn set_display(&mut self, metrics: &[(String, f64)]);

    /// Current indicator position.
    fn position(&self) -> u64;

    /// Finish and release the indicator.
    fn close(&mut self);
}

/// Which built-in sink to open when progress display is enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressMode {
    /// Terminal progress bar (requires the `console` feature).
    #[default]
    Console,
    /// Line-oriented `tracing` events, for notebooks and CI logs.
    Log,
}

/// Presentation options shared by the built-in sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressOptions {
    /// indicatif template string (console sink only).
    pub template: String,
    /// Label shown before the bar, and attached to log events.
    pub prefix: Option<String>,
}

impl Default for ProgressOptions {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            prefix: None,
        }
    }
}

/// Render metrics as `name=value` pairs, the way the bar's message shows them.
#[must_use]
pub fn format_metrics(metrics: &[(String, f64)]) -> String {
    metrics
        .iter()
        .map(|(name, value)| format!("{name}={value:.4}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Open the built-in sink for `mode` with `total` expected steps.
///
/// # Errors
///
/// Returns `Error::InvalidConfig` if the console template does not parse, or
/// if `Console` is requested without the `console` feature.
pub fn open_sink(
    mode: ProgressMode,
    total: u64,
    options: &ProgressOptions,
) -> Result<Box<dyn ProgressSink>> {
    match mode {
        ProgressMode::Console => open_console(total, options),
        ProgressMode::Log => Ok(Box::new(LogProgress::new(total, options.prefix.clone()))),
    }
}

#[cfg(feature = "console")]
fn open_console(total: u64, options: &ProgressOptions) -> Result<Box<dyn ProgressSink>> {
    Ok(Box::new(ConsoleProgress::new(total, options)?))
}

#[cfg(not(feature = "console"))]
fn open_console(_total: u64, _options: &ProgressOptions) -> Result<Box<dyn ProgressSink>> {
    Err(Error::InvalidConfig(
        "console progress requires the `console` feature".to_string(),
    ))
}

/// Terminal progress bar backed by `indicatif`.
#[cfg(feature = "console")]
pub struct ConsoleProgress {
    bar: indicatif::ProgressBar,
}

#[cfg(feature = "console")]
impl fmt::Debug for ConsoleProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleProgress")
            .field("position", &self.bar.position())
            .field("length", &self.bar.length())
            .finish()
    }
}

#[cfg(feature = "console")]
impl ConsoleProgress {
    /// Create a bar of length `total` styled by `options`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the template does not parse.
    pub fn new(total: u64, options: &ProgressOptions) -> Result<Self> {
        let style = indicatif::ProgressStyle::with_template(&options.template)
            .map_err(|e| Error::InvalidConfig(format!("progress template: {e}")))?
            .progress_chars("#>-");

        let bar = indicatif::ProgressBar::new(total);
        bar.set_style(style);
        if let Some(prefix) = &options.prefix {
            bar.set_prefix(format!("{prefix} "));
        }
        Ok(Self { bar })
    }
}

#[cfg(feature = "console")]
impl ProgressSink for ConsoleProgress {
    fn advance(&mut self, delta: u64) {
        self.bar.inc(delta);
    }

    fn set_display(&mut self, metrics: &[(String, f64)]) {
        self.bar.set_message(format_metrics(metrics));
    }

    fn position(&self) -> u64 {
        self.bar.position()
    }

    fn close(&mut self) {
        self.bar.finish();
    }
}

/// Sink that reports progress as `tracing` events instead of redrawing a bar.
#[derive(Debug)]
pub struct LogProgress {
    total: u64,
    position: u64,
    label: String,
}

impl LogProgress {
    /// Create a sink expecting `total` steps.
    #[must_use]
    pub fn new(total: u64, label: Option<String>) -> Self {
        Self {
            total,
            position: 0,
            label: label.unwrap_or_else(|| "run".to_string()),
        }
    }
}

impl ProgressSink for LogProgress {
    fn advance(&mut self, delta: u64) {
        self.position = self.position.saturating_add(delta);
        debug!(target: "plotkit::progress", label = %self.label, position = self.position, total = self.total);
    }

    fn set_display(&mut self, metrics: &[(String, f64)]) {
        info!(
            target: "plotkit::progress",
            label = %self.label,
            position = self.position,
            total = self.total,
            "{}",
            format_metrics(metrics)
        );
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn close(&mut self) {
        info!(target: "plotkit::progress", label = %self.label, total = self.total, "complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_metrics() {
        let metrics = vec![("loss".to_string(), 0.5), ("acc".to_string(), 0.91234)];
        assert_eq!(format_metrics(&metrics), "loss=0.5000, acc=0.9123");
        assert_eq!(format_metrics(&[("lr".to_string(), 1e-3)]), "lr=0.0010");
        assert_eq!(format_metrics(&[]), "");
    }

    #[test]
    fn test_log_progress_position() {
        let mut sink = LogProgress::new(3, None);
        sink.advance(1);
        sink.advance(2);
        assert_eq!(sink.position(), 3);
        sink.set_display(&[("loss".to_string(), 0.1)]);
        sink.close();
    }

    #[test]
    fn test_open_log_sink() {
        let sink = open_sink(ProgressMode::Log, 5, &ProgressOptions::default()).unwrap();
        assert_eq!(sink.position(), 0);
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_console_tracks_position() {
        let mut sink = ConsoleProgress::new(4, &ProgressOptions::default()).unwrap();
        sink.advance(1);
        sink.advance(1);
        assert_eq!(sink.position(), 2);
        sink.close();
    }
}
