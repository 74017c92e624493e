//! Runtime deprecation notices for callables
//!
//! Crate APIs should use `#[deprecated]`. This wrapper is for callables
//! chosen at runtime (callbacks, plugin hooks, registry entries) where the
//! compiler cannot warn the caller.
//!
//! ```rust
//! use plotkit::deprecation::Deprecated;
//!
//! let old_add = Deprecated::new("old_add", |(x, y): (i32, i32)| x + y)
//!     .reason("Use `new_add` instead.");
//!
//! assert_eq!(old_add.call((1, 2)), 3);
//! assert_eq!(old_add.message(), "old_add is deprecated. Use `new_add` instead.");
//! assert_eq!(old_add.calls(), 1);
//! ```

use std::cell::Cell;
use std::fmt;

use tracing::warn;

/// Build the notice for a deprecated callable.
#[must_use]
pub fn deprecation_message(name: &str, reason: Option<&str>) -> String {
    match reason {
        Some(reason) if !reason.is_empty() => format!("{name} is deprecated. {reason}"),
        _ => format!("{name} is deprecated."),
    }
}

/// Emit the deprecation notice for `name` as a `tracing` warning.
pub fn warn_deprecated(name: &str, reason: Option<&str>) {
    warn!(target: "deprecation", callable = name, "{}", deprecation_message(name, reason));
}

/// A callable that warns every time it is invoked.
pub struct Deprecated<F> {
    name: &'static str,
    reason: Option<String>,
    func: F,
    calls: Cell<u64>,
}

impl<F> Deprecated<F> {
    /// Wrap `func`, reporting it as `name`.
    #[must_use]
    pub const fn new(name: &'static str, func: F) -> Self {
        Self {
            name,
            reason: None,
            func,
            calls: Cell::new(0),
        }
    }

    /// Attach guidance, e.g. which callable replaces this one.
    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Name of the wrapped callable.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The notice emitted on each call.
    #[must_use]
    pub fn message(&self) -> String {
        deprecation_message(self.name, self.reason.as_deref())
    }

    /// Number of times the wrapper has been called.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.calls.get()
    }

    /// Warn, then invoke the wrapped callable with `args`.
    pub fn call<A, R>(&self, args: A) -> R
    where
        F: Fn(A) -> R,
    {
        self.calls.set(self.calls.get().saturating_add(1));
        warn_deprecated(self.name, self.reason.as_deref());
        (self.func)(args)
    }

    /// Unwrap the callable, dropping the notice.
    pub fn into_inner(self) -> F {
        self.func
    }
}

impl<F> fmt::Debug for Deprecated<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deprecated")
            .field("name", &self.name)
            .field("reason", &self.reason)
            .field("calls", &self.calls.get())
            .finish_non_exhaustive()
    }
}
