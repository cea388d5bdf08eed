//! Progress callbacks for seeding and importing.

/// Receives updates while a batch of rows is written. Every method defaults
/// to doing nothing.
pub trait ImportProgress {
    /// A batch begins, e.g. "Importing users".
    fn on_phase(&self, _message: &str) {}

    /// Row `current` of `total` was written; `label` names it.
    fn on_record(&self, _current: usize, _total: usize, _label: &str) {}

    /// A batch was committed, e.g. "Successfully imported 12".
    fn on_complete(&self, _message: &str) {}
}

/// Discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {}

/// Reports batches at info level and every `interval`-th row at debug level.
pub struct LogProgress {
    interval: usize,
}

impl LogProgress {
    pub fn every(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::every(100)
    }
}

impl ImportProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{message}");
    }

    fn on_record(&self, current: usize, total: usize, label: &str) {
        if current.is_multiple_of(self.interval) || current == total {
            log::debug!("  {current}/{total} {label}");
        }
    }

    fn on_complete(&self, message: &str) {
        log::info!("{message}");
    }
}
