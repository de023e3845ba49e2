use std::sync::Mutex;

/// Counters for an obfuscation engine, readable after a run.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Records seen by a run, georeferenced or not.
    pub processed: usize,
    pub shifted: usize,
    /// Runs that returned an error.
    pub errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_processed(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.processed += count;
        }
    }

    pub fn record_shifted(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.shifted += count;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            Metrics::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
