//! Bundled plotting style sheets
//!
//! Style sheets ship in the crate's `styles/` directory and are referenced
//! by path, so they can be handed straight to a plotting backend.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::{Error, Result};

/// Directory holding the bundled style sheets.
pub const STYLES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/styles");

/// Style sheets used across plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Computer Modern serif text with mathtext.
    Cmr10,
    /// Clean axes and the accessible color cycle for training curves.
    Ml,
}

impl Style {
    /// File name of the style sheet.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Cmr10 => "cmr10.mplstyle",
            Self::Ml => "ml.mplstyle",
        }
    }

    /// Path of the bundled style sheet.
    #[must_use]
    pub fn path(self) -> PathBuf {
        self.path_in(STYLES_DIR)
    }

    /// Path of the style sheet inside `dir`.
    #[must_use]
    pub fn path_in(self, dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(self.file_name())
    }

    /// Bundled path, checked to exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::StyleNotFound` if the file is missing.
    pub fn resolve(self) -> Result<PathBuf> {
        Self::existing(self.path())
    }

    /// Path inside `dir`, checked to exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::StyleNotFound` if the file is missing.
    pub fn resolve_in(self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        Self::existing(self.path_in(dir))
    }

    fn existing(path: PathBuf) -> Result<PathBuf> {
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::StyleNotFound(path))
        }
    }

    /// Contents of the bundled style sheet.
    ///
    /// # Errors
    ///
    /// Returns `Error::StyleNotFound` if the file is missing, or `Error::Io`
    /// if it cannot be read.
    pub fn read(self) -> Result<String> {
        Ok(std::fs::read_to_string(self.resolve()?)?)
    }

    /// Every bundled style.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}
