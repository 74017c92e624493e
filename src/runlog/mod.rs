//! Run logging for scalar metrics
//!
//! ## Overview
//!
//! ```text
//! RunLogger ──< StepRecord (per step, ordered by index)
//!     │
//!     ├── Snapshot        [columnar, JSON round trip]
//!     └── ProgressSink    [ConsoleProgress | LogProgress | injected]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use plotkit::runlog::{RunLogger, Snapshot};
//!
//! let mut logger = RunLogger::new(3)?;
//! logger.log([("loss", 1.0)], 0)?;
//! logger.log([("loss", 0.8)], 1)?;
//!
//! let snapshot = logger.snapshot();
//! assert_eq!(snapshot.to_json()?, r#"{"step":[0,1],"loss":[1.0,0.8]}"#);
//!
//! let restored = RunLogger::from_snapshot(&snapshot)?;
//! assert_eq!(restored.get("loss")?, vec![1.0, 0.8]);
//! # Ok::<(), plotkit::Error>(())
//! ```

mod builder;
mod logger;
pub mod progress;
mod record;
mod snapshot;

pub use builder::{RunLoggerBuilder, RunLoggerConfig};
pub use logger::RunLogger;
pub use progress::{LogProgress, ProgressMode, ProgressOptions, ProgressSink};
#[cfg(feature = "console")]
pub use progress::ConsoleProgress;
pub use record::StepRecord;
pub use snapshot::{Column, Snapshot};

/// Name of the step column in a snapshot.
pub const STEP_COLUMN: &str = "step";

/// Names a metric accessor may not claim.
pub const RESERVED_NAMES: &[&str] = &[
    STEP_COLUMN,
    "steps",
    "metrics",
    "history",
    "snapshot",
    "get",
    "log",
];
