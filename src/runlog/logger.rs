//! Run Logger - scalar metrics keyed by step

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use tracing::{debug, info};

use super::builder::{RunLoggerBuilder, RunLoggerConfig};
use super::progress::ProgressSink;
use super::record::StepRecord;
use super::snapshot::Snapshot;
use super::{RESERVED_NAMES, STEP_COLUMN};
use crate::{Error, Result};

/// Lightweight logger for scalar metrics across sequential steps.
///
/// Steps may be logged in any order; every read presents them ascending.
/// The first (lowest) step's metric names are the canonical set used by
/// [`get`](Self::get), [`snapshot`](Self::snapshot) and
/// [`metric_names`](Self::metric_names).
///
/// ## Progress
///
/// When display is enabled the logger owns a [`ProgressSink`]. Each `log`
/// advances it by one; steps that are multiples of the update interval
/// refresh its metric display. Once its position reaches `max_steps` the
/// sink is closed and display stays off for the rest of the run.
///
/// ```rust
/// use plotkit::runlog::RunLogger;
///
/// let mut logger = RunLogger::new(100)?;
/// for epoch in 0..100 {
///     let loss = 10.0 - 0.1 * f64::from(epoch);
///     logger.log([("loss", loss), ("accuracy", 0.01 * f64::from(epoch))], i64::from(epoch))?;
/// }
///
/// assert_eq!(logger.get("loss")?.len(), 100);
/// assert_eq!(logger.metric_names(), vec!["loss", "accuracy"]);
/// # Ok::<(), plotkit::Error>(())
/// ```
#[derive(Debug)]
pub struct RunLogger {
    history: BTreeMap<i64, StepRecord>,
    registered: HashSet<String>,
    max_steps: u64,
    update_interval: u64,
    progress: Option<Box<dyn ProgressSink>>,
}

impl RunLogger {
    /// Create a logger expecting `max_steps` steps, with display off.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `max_steps` is zero.
    pub fn new(max_steps: u64) -> Result<Self> {
        RunLoggerBuilder::new(max_steps).build()
    }

    /// Create a builder for a logger expecting `max_steps` steps.
    #[must_use]
    pub fn builder(max_steps: u64) -> RunLoggerBuilder {
        RunLoggerBuilder::new(max_steps)
    }

    /// Create a logger from serialized settings.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the settings are out of bounds or
    /// the progress sink cannot be opened.
    pub fn from_config(config: RunLoggerConfig) -> Result<Self> {
        RunLoggerBuilder::from_config(config).build()
    }

    pub(super) fn with_parts(
        max_steps: u64,
        update_interval: u64,
        progress: Option<Box<dyn ProgressSink>>,
    ) -> Self {
        Self {
            history: BTreeMap::new(),
            registered: HashSet::new(),
            max_steps,
            update_interval,
            progress,
        }
    }

    /// Rebuild a logger by replaying every snapshot row as a `log` call.
    ///
    /// `None` cells are skipped; a row with no values still records its step.
    /// The result has `max_steps` equal to the number of rows (at least 1)
    /// and display off.
    ///
    /// # Errors
    ///
    /// Propagates `Error::InvalidConfig` from construction.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let rows = u64::try_from(snapshot.steps().len()).unwrap_or(u64::MAX);
        let mut logger = Self::new(rows.max(1))?;

        for (index, &step) in snapshot.steps().iter().enumerate() {
            let row = snapshot.row(index);
            logger.record(step, &row);
        }

        debug!(steps = logger.len(), "rebuilt run from snapshot");
        Ok(logger)
    }

    /// Rebuild a logger from the snapshot JSON form.
    ///
    /// # Errors
    ///
    /// Returns the snapshot parse errors (`Json`, `MissingStepColumn`,
    /// `ColumnLengthMismatch`, `MalformedColumn`).
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_snapshot(&Snapshot::from_json(json)?)
    }

    /// Log one or more metrics for a step.
    ///
    /// Values already recorded for the step are overwritten per metric;
    /// other metrics at that step are left alone.
    ///
    /// # Errors
    ///
    /// - `Error::EmptyMetrics` if `metrics` yields nothing
    /// - `Error::AlreadyExists` if a metric is named `step`
    ///
    /// Nothing is recorded and the progress display is untouched on error.
    pub fn log<I, K>(&mut self, metrics: I, step: i64) -> Result<()>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let metrics: Vec<(String, f64)> = metrics
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();

        if metrics.is_empty() {
            return Err(Error::EmptyMetrics { step });
        }
        if let Some((name, _)) = metrics.iter().find(|(name, _)| name == STEP_COLUMN) {
            return Err(Error::AlreadyExists(name.clone()));
        }

        self.record(step, &metrics);
        debug!(step, count = metrics.len(), "logged metrics");

        self.update_progress(&metrics, step);
        Ok(())
    }

    fn record(&mut self, step: i64, metrics: &[(String, f64)]) {
        let record = self.history.entry(step).or_default();
        for (name, value) in metrics {
            record.insert(name.clone(), *value);
        }
        for (name, _) in metrics {
            if !self.registered.contains(name) {
                self.registered.insert(name.clone());
            }
        }
    }

    fn update_progress(&mut self, metrics: &[(String, f64)], step: i64) {
        let Some(sink) = self.progress.as_mut() else {
            return;
        };

        sink.advance(1);
        let refresh = i64::try_from(self.update_interval)
            .map_or(step == 0, |interval| step.rem_euclid(interval) == 0);
        if refresh {
            sink.set_display(metrics);
        }

        if sink.position() >= self.max_steps {
            if let Some(mut sink) = self.progress.take() {
                sink.close();
                info!(max_steps = self.max_steps, "progress display closed");
            }
        }
    }

    /// Register `name` as a metric accessor name.
    ///
    /// Logging registers new names automatically; this is for claiming a
    /// name up front.
    ///
    /// # Errors
    ///
    /// Returns `Error::AlreadyExists` if the name is already registered or
    /// collides with a reserved logger name.
    pub fn register_metric(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if RESERVED_NAMES.contains(&name.as_str()) || self.registered.contains(&name) {
            return Err(Error::AlreadyExists(name));
        }
        self.registered.insert(name);
        Ok(())
    }

    /// Check if `name` has been registered, by logging or explicitly.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.contains(name)
    }

    fn first_record(&self) -> Option<&StepRecord> {
        self.history.values().next()
    }

    /// Values of a metric ordered by ascending step.
    ///
    /// Only steps that recorded the metric contribute a value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no steps exist or the metric is absent
    /// from the earliest step, even when later steps recorded it.
    pub fn get(&self, name: &str) -> Result<Vec<f64>> {
        match self.first_record() {
            Some(first) if first.contains(name) => Ok(self
                .history
                .values()
                .filter_map(|record| record.get(name))
                .collect()),
            _ => Err(Error::NotFound(name.to_string())),
        }
    }

    /// Columnar view of the run over the first step's metric names.
    ///
    /// An empty run gives an empty snapshot rather than an error.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        // First-record names are unique and never `step`; every column spans all steps.
        let columns = self
            .metric_names()
            .into_iter()
            .map(|name| {
                let values = self.history.values().map(|record| record.get(name)).collect();
                (name.to_string(), values)
            })
            .collect();
        Snapshot::from_parts(self.steps(), columns)
    }

    /// Metric names recorded at the first step, in insertion order.
    #[must_use]
    pub fn metric_names(&self) -> Vec<&str> {
        self.first_record()
            .map(|record| record.names().collect())
            .unwrap_or_default()
    }

    /// Every metric name ever logged, first-seen order by ascending step.
    #[must_use]
    pub fn all_metric_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.history.values().flat_map(StepRecord::names) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Recorded step indices, ascending.
    #[must_use]
    pub fn steps(&self) -> Vec<i64> {
        self.history.keys().copied().collect()
    }

    /// Raw step records keyed by step index.
    #[must_use]
    pub const fn history(&self) -> &BTreeMap<i64, StepRecord> {
        &self.history
    }

    /// Number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Check if nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Total number of expected steps.
    #[must_use]
    pub const fn max_steps(&self) -> u64 {
        self.max_steps
    }

    /// Display refresh interval in steps.
    #[must_use]
    pub const fn update_interval(&self) -> u64 {
        self.update_interval
    }

    /// Check if the progress display is still live.
    #[must_use]
    pub const fn is_displaying(&self) -> bool {
        self.progress.is_some()
    }
}

impl fmt::Display for RunLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "<RunLogger: empty>");
        }
        write!(
            f,
            "<RunLogger: steps={}, metrics={:?}>",
            self.len(),
            self.metric_names()
        )
    }
}
