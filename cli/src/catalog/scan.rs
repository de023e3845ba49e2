use crate::metadata::MetadataReader;
use anyhow::Context;
use geoshiftcore::{GeoRecord, RecordStore};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Records built from one source directory.
pub struct CatalogScan {
    pub store: RecordStore,
    pub files: usize,
    pub georeferenced: usize,
}

/// Regular files directly inside `directory`, sorted by path. Subdirectories
/// are not descended into.
pub fn list_files(directory: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = fs::read_dir(directory)
        .with_context(|| format!("listing source directory {}", directory.display()))?;
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {}", directory.display()))?;
        if entry.file_type()?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();
    Ok(paths)
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn scan_directory(directory: &Path, reader: &dyn MetadataReader) -> anyhow::Result<CatalogScan> {
    let paths = list_files(directory)?;

    let mut store = RecordStore::new();
    for path in &paths {
        let name = file_name(path);
        let sample = reader
            .read(path)
            .with_context(|| format!("reading metadata of {}", path.display()))?;
        let record = GeoRecord::from_sample(path.display().to_string(), name, sample)
            .with_context(|| format!("projecting position of {}", path.display()))?;
        store.insert(record);
    }

    let files = store.total_count();
    let georeferenced = store.georeferenced_count();
    info!(
        "Processed {}, with {} having GPS data.",
        files, georeferenced
    );

    Ok(CatalogScan {
        store,
        files,
        georeferenced,
    })
}
