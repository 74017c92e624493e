//! Color palette and colormaps for plots
//!
//! ```rust
//! use plotkit::palette::{Color, Colormap, Rgb};
//!
//! let cycle = Color::main_colors();
//! assert_eq!(cycle[0], "#5790fc");
//!
//! let heat = Colormap::wh_or();
//! assert_eq!(heat.sample(1.0), Rgb::from_hex("#f89c20")?);
//! # Ok::<(), plotkit::Error>(())
//! ```

mod color;
mod colormap;
mod rgb;

pub use color::Color;
pub use colormap::{Colormap, DEFAULT_LEVELS};
pub use rgb::Rgb;
