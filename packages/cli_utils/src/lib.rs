#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal plumbing for the pass finder CLI.
//!
//! Range and category searches profile every matching pass before they
//! return, fetching and resampling one trace per path. [`ProfilingProgress`]
//! shows that work as it happens, one tick per built pass with the pass
//! being profiled as its message. [`init_logger`] routes `log` output
//! through `indicatif-log-bridge` so per-path warnings (a missing or
//! malformed trace) print above the bar instead of through it.

use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use pass_finder_pass::ProgressCallback;

pub use indicatif::MultiProgress;

/// Column width reserved for the pass name shown next to the bar.
const MESSAGE_WIDTH: usize = 36;

/// Progress of building and profiling passes for one search.
pub struct ProfilingProgress {
    bar: ProgressBar,
    /// Style to switch to once the number of passes is known.
    bar_style: ProgressStyle,
}

impl ProfilingProgress {
    /// Adds a profiling bar to `multi`.
    ///
    /// It spins with `message` while the record store is queried, then
    /// counts passes once [`ProgressCallback::set_total()`] reports how
    /// many records matched.
    #[must_use]
    pub fn passes_bar(multi: &MultiProgress, message: &str) -> Arc<dyn ProgressCallback> {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());

        let bar_style = ProgressStyle::with_template(&format!(
            "  {{msg:{MESSAGE_WIDTH}}} {{wide_bar:.cyan/dim}} {{pos}}/{{len}} passes [{{eta}}]"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

        Arc::new(Self { bar, bar_style })
    }
}

impl ProgressCallback for ProfilingProgress {
    fn set_total(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
        self.bar.set_style(self.bar_style.clone());
    }

    fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(fit_message(msg));
    }

    fn finish_and_clear(&self) {
        let profiled = self.bar.position();
        self.bar.finish_and_clear();
        if profiled > 0 {
            log::debug!("Profiled {profiled} pass(es)");
        }
    }
}

/// Shortens long pass names so the bar keeps its position.
fn fit_message(msg: String) -> String {
    if msg.chars().count() <= MESSAGE_WIDTH {
        return msg;
    }
    let mut short: String = msg.chars().take(MESSAGE_WIDTH - 1).collect();
    short.push('~');
    short
}

/// Installs `pretty_env_logger`, filtered by `RUST_LOG`, behind
/// `indicatif-log-bridge`.
///
/// Returns the [`MultiProgress`] the profiling bar must be added to for
/// log lines to be drawn above it.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    // Tests may have installed a logger already.
    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok();

    log::set_max_level(level);

    multi
}
