//! Run logger configuration and builder

use serde::{Deserialize, Serialize};

use super::progress::{open_sink, ProgressMode, ProgressOptions, ProgressSink};
use super::RunLogger;
use crate::{Error, Result};

/// Serializable run logger settings.
///
/// ```rust
/// use plotkit::runlog::{RunLogger, RunLoggerConfig};
///
/// let config: RunLoggerConfig = serde_json::from_str(r#"{"max_steps": 10}"#)?;
/// let logger = RunLogger::from_config(config)?;
/// assert_eq!(logger.max_steps(), 10);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunLoggerConfig {
    /// Total number of expected steps (at least 1).
    pub max_steps: u64,
    /// Show a progress indicator while logging.
    pub display_progress: bool,
    /// Refresh the displayed metrics on steps that are multiples of this (at least 1).
    pub update_interval: u64,
    /// Which built-in progress sink to open.
    pub mode: ProgressMode,
    /// Presentation options for the sink.
    pub progress: ProgressOptions,
}

impl Default for RunLoggerConfig {
    fn default() -> Self {
        Self {
            max_steps: 1,
            display_progress: false,
            update_interval: 1,
            mode: ProgressMode::default(),
            progress: ProgressOptions::default(),
        }
    }
}

impl RunLoggerConfig {
    /// Check the numeric bounds.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `max_steps` or `update_interval` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(Error::InvalidConfig("max_steps must be at least 1".to_string()));
        }
        if self.update_interval == 0 {
            return Err(Error::InvalidConfig(
                "update_interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for `RunLogger`.
#[derive(Debug)]
pub struct RunLoggerBuilder {
    config: RunLoggerConfig,
    sink: Option<Box<dyn ProgressSink>>,
}

impl RunLoggerBuilder {
    /// Create a new builder with the required step count.
    #[must_use]
    pub fn new(max_steps: u64) -> Self {
        Self::from_config(RunLoggerConfig {
            max_steps,
            ..RunLoggerConfig::default()
        })
    }

    /// Start from an existing configuration.
    #[must_use]
    pub const fn from_config(config: RunLoggerConfig) -> Self {
        Self { config, sink: None }
    }

    /// Enable or disable the progress display.
    #[must_use]
    pub const fn display_progress(mut self, enabled: bool) -> Self {
        self.config.display_progress = enabled;
        self
    }

    /// Set how often (in steps) the displayed metrics refresh.
    #[must_use]
    pub const fn update_interval(mut self, interval: u64) -> Self {
        self.config.update_interval = interval;
        self
    }

    /// Choose the built-in progress sink.
    #[must_use]
    pub const fn mode(mut self, mode: ProgressMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the console bar template.
    #[must_use]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.config.progress.template = template.into();
        self
    }

    /// Set the label shown with the progress display.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.progress.prefix = Some(prefix.into());
        self
    }

    /// Use a caller-provided sink instead of a built-in one.
    ///
    /// Implies `display_progress(true)`.
    #[must_use]
    pub fn sink(mut self, sink: Box<dyn ProgressSink>) -> Self {
        self.config.display_progress = true;
        self.sink = Some(sink);
        self
    }

    /// Build the `RunLogger`, opening the progress sink if display is enabled.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the bounds are invalid or the
    /// built-in sink cannot be opened.
    pub fn build(self) -> Result<RunLogger> {
        self.config.validate()?;

        let progress = if self.config.display_progress {
            match self.sink {
                Some(sink) => Some(sink),
                None => Some(open_sink(
                    self.config.mode,
                    self.config.max_steps,
                    &self.config.progress,
                )?),
            }
        } else {
            None
        };

        Ok(RunLogger::with_parts(
            self.config.max_steps,
            self.config.update_interval,
            progress,
        ))
    }
}
