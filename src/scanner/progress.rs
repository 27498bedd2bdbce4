//! Progress reporting abstraction
//!
//! Keeps the walker free of terminal concerns (indicatif).

use indicatif::{ProgressBar, ProgressStyle};

/// A handle to an active progress bar
pub trait ProgressHandle: Send + Sync {
    fn inc(&self, n: u64);
    fn set_message(&self, msg: &str);
    fn finish(&self);
}

/// Factory for creating progress handles
pub trait ProgressReporter: Send + Sync {
    fn start(&self, label: &str, total: u64) -> Box<dyn ProgressHandle>;
}

/// Indicatif-based progress reporter for CLI usage
pub struct IndicatifProgress;

impl ProgressReporter for IndicatifProgress {
    fn start(&self, label: &str, total: u64) -> Box<dyn ProgressHandle> {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(&format!(
                    "{{spinner:.green}} {}: [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {{wide_msg}}",
                    label
                ))
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Box::new(IndicatifHandle(pb))
    }
}

struct IndicatifHandle(ProgressBar);

impl ProgressHandle for IndicatifHandle {
    fn inc(&self, n: u64) {
        self.0.inc(n);
    }

    fn set_message(&self, msg: &str) {
        self.0.set_message(msg.to_string());
    }

    fn finish(&self) {
        self.0.finish_and_clear();
    }
}

/// No-op progress reporter for tests, benches and quiet mode
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn start(&self, _label: &str, _total: u64) -> Box<dyn ProgressHandle> {
        Box::new(NoopHandle)
    }
}

struct NoopHandle;

impl ProgressHandle for NoopHandle {
    fn inc(&self, _n: u64) {}
    fn set_message(&self, _msg: &str) {}
    fn finish(&self) {}
}

/// Pick the reporter for an interactive run
pub fn for_terminal(enabled: bool) -> Box<dyn ProgressReporter> {
    if enabled {
        Box::new(IndicatifProgress)
    } else {
        Box::new(NoopProgress)
    }
}
