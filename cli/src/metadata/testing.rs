//! In-memory collaborators for exercising the workflow without image files.

use crate::metadata::{MetadataReader, MetadataStripper, MetadataWriter};
use geoshiftcore::{GeoSample, RecordStore};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Answers with a fixed sample per file name; unknown files have no tags.
#[derive(Default)]
pub struct FixedReader {
    samples: HashMap<String, GeoSample>,
}

impl FixedReader {
    pub fn with(mut self, name: &str, sample: GeoSample) -> Self {
        self.samples.insert(name.to_string(), sample);
        self
    }
}

impl MetadataReader for FixedReader {
    fn read(&self, path: &Path) -> anyhow::Result<GeoSample> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(self.samples.get(&name).copied().unwrap_or_default())
    }
}

/// Remembers `(name, lat, lon, altitude)` for every record it was asked to write.
#[derive(Default)]
pub struct RecordingWriter {
    pub written: RefCell<Vec<(String, f64, f64, f64)>>,
}

impl MetadataWriter for RecordingWriter {
    fn write(&self, store: &RecordStore, _source: &Path, _output: &Path) -> anyhow::Result<usize> {
        let mut written = self.written.borrow_mut();
        for record in store.georeferenced() {
            if let Some(position) = record.position() {
                written.push((
                    record.name().to_string(),
                    position.lat,
                    position.lon,
                    record.altitude(),
                ));
            }
        }
        Ok(written.len())
    }
}

/// Leaves a half-written file in `output`, then fails.
pub struct FailingWriter;

impl MetadataWriter for FailingWriter {
    fn write(&self, _store: &RecordStore, _source: &Path, output: &Path) -> anyhow::Result<usize> {
        std::fs::write(output.join("partial.jpg"), b"")?;
        anyhow::bail!("exiftool exited with exit status: 1")
    }
}

/// Copies files verbatim and remembers the targets it produced.
#[derive(Default)]
pub struct CopyingStripper {
    pub targets: RefCell<Vec<PathBuf>>,
}

impl MetadataStripper for CopyingStripper {
    fn strip_all(&self, source: &Path, target: &Path) -> anyhow::Result<()> {
        std::fs::copy(source, target)?;
        self.targets.borrow_mut().push(target.to_path_buf());
        Ok(())
    }
}
