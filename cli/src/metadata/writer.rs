use crate::metadata::{MetadataStripper, MetadataWriter};
use anyhow::Context;
use geoshiftcore::{GeoRecord, RecordStore};
use log::info;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Drives the external `exiftool` program.
pub struct ExifToolWriter {
    program: String,
}

impl ExifToolWriter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Copies every file while clearing GPS tags and the XMP block, which
    /// also carries location text.
    fn strip_args(source: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-gps*=".into(),
            "-xmp:all=".into(),
            source.as_os_str().to_owned(),
            "-o".into(),
            output.as_os_str().to_owned(),
        ]
    }

    fn clean_args(source: &Path, target: &Path) -> Vec<OsString> {
        vec![
            "-all=".into(),
            source.as_os_str().to_owned(),
            "-o".into(),
            target.as_os_str().to_owned(),
        ]
    }

    fn tag_args(record: &GeoRecord, output: &Path) -> Option<Vec<OsString>> {
        let position = record.position()?;
        Some(vec![
            "-overwrite_original".into(),
            format!("-GPSLatitude*={}", position.lat).into(),
            format!("-GPSLongitude*={}", position.lon).into(),
            format!("-GPSAltitude*={}", record.altitude()).into(),
            output.join(record.name()).into_os_string(),
        ])
    }

    fn invoke(&self, args: &[OsString]) -> anyhow::Result<()> {
        let status = Command::new(&self.program)
            .args(args)
            .status()
            .with_context(|| format!("launching {}", self.program))?;
        if !status.success() {
            anyhow::bail!("{} exited with {}", self.program, status);
        }
        Ok(())
    }
}

impl MetadataWriter for ExifToolWriter {
    fn write(&self, store: &RecordStore, source: &Path, output: &Path) -> anyhow::Result<usize> {
        self.invoke(&Self::strip_args(source, output))
            .context("stripping location metadata")?;

        let mut tagged = 0;
        for record in store.georeferenced() {
            if let Some(args) = Self::tag_args(record, output) {
                self.invoke(&args)
                    .with_context(|| format!("tagging {}", record.name()))?;
                tagged += 1;
            }
        }
        info!("tagged {} file(s) in {}", tagged, output.display());
        Ok(tagged)
    }
}

impl MetadataStripper for ExifToolWriter {
    fn strip_all(&self, source: &Path, target: &Path) -> anyhow::Result<()> {
        self.invoke(&Self::clean_args(source, target))
            .with_context(|| format!("stripping metadata from {}", source.display()))
    }
}
