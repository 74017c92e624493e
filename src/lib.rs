//! # plotkit: Metrics Logging and Plot Styling Utilities
//!
//! **Version**: 0.2.0
//!
//! Small building blocks for data-science and plotting workflows:
//!
//! - **Run logging**: scalar metrics keyed by step, with an optional live
//!   progress display and a columnar JSON snapshot
//! - **Palette**: accessible named colors and linear colormaps
//! - **Styles**: bundled plotting style sheets resolved to paths
//! - **Deprecation**: runtime notices for callables chosen at runtime
//!
//! ## Example Usage
//!
//! ```rust
//! use plotkit::runlog::RunLogger;
//!
//! let mut logger = RunLogger::new(3)?;
//! logger.log([("loss", 0.5)], 2)?;
//! logger.log([("loss", 0.9)], 0)?;
//! logger.log([("loss", 0.7)], 1)?;
//!
//! assert_eq!(logger.steps(), vec![0, 1, 2]);
//! assert_eq!(logger.get("loss")?, vec![0.9, 0.7, 0.5]);
//! # Ok::<(), plotkit::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod deprecation;
pub mod error;
pub mod palette;
pub mod runlog;
pub mod style;

pub use error::{Error, Result};
pub use palette::{Color, Colormap, Rgb};
pub use runlog::{RunLogger, Snapshot};
pub use style::Style;
