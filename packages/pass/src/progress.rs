//! Progress reporting while building many passes.
//!
//! Profiling every path of every candidate pass is the slow part of a
//! range or category search. [`ProgressCallback`] lets a front end show
//! that work without this crate knowing how it is rendered.

use std::sync::Arc;

/// Receives progress updates while passes are built.
///
/// Implementations must be `Send + Sync` so a search engine holding one
/// can be shared.
pub trait ProgressCallback: Send + Sync {
    /// Sets the number of passes about to be built.
    fn set_total(&self, total: u64);

    /// Advances by `delta` built passes.
    fn inc(&self, delta: u64);

    /// Updates the message shown next to the indicator.
    fn set_message(&self, msg: String);

    /// Removes the indicator once all passes are built.
    fn finish_and_clear(&self);
}

/// Ignores all progress updates.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish_and_clear(&self) {}
}

/// Returns a shared [`NullProgress`].
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
