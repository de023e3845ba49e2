//! Boundary with the image files: reading GPS tags in, writing them back out,
//! and dumping or removing whole EXIF blocks.

use geoshiftcore::{GeoSample, RecordStore};
use std::path::Path;

pub mod dump;
pub mod reader;
pub mod writer;

#[cfg(test)]
pub mod testing;

pub use dump::strip_directory;
pub use reader::ExifGpsReader;
pub use writer::ExifToolWriter;

pub trait MetadataReader {
    /// Missing tags are reported as absent fields, not as errors.
    fn read(&self, path: &Path) -> anyhow::Result<GeoSample>;
}

pub trait MetadataWriter {
    /// Copies `source` into `output` with all location tags stripped, then
    /// tags every georeferenced record with its final position. Returns the
    /// number of files tagged.
    fn write(&self, store: &RecordStore, source: &Path, output: &Path) -> anyhow::Result<usize>;
}

pub trait MetadataStripper {
    /// Copies `source` to `target` without any embedded metadata.
    fn strip_all(&self, source: &Path, target: &Path) -> anyhow::Result<()>;
}
