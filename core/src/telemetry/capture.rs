use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

/// Test logger keeping every record so assertions can look for one.
struct CaptureLogger {
    records: Mutex<Vec<(String, Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((
                record.target().to_string(),
                record.level(),
                record.args().to_string(),
            ));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

/// Installs the capture logger; later calls are no-ops.
pub(crate) fn install() {
    if log::set_logger(&CAPTURE).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
}

/// True once a record with this target and level contains `needle`.
pub(crate) fn captured(target: &str, level: Level, needle: &str) -> bool {
    CAPTURE
        .records
        .lock()
        .map(|records| {
            records
                .iter()
                .any(|(t, l, message)| t == target && *l == level && message.contains(needle))
        })
        .unwrap_or(false)
}
