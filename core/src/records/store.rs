use crate::records::record::GeoRecord;
use crate::telemetry::log::LogManager;
use std::collections::BTreeMap;

/// Per-run collection of records keyed by record id.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: BTreeMap<String, GeoRecord>,
    logger: LogManager,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the one it replaced if the id was taken.
    pub fn insert(&mut self, record: GeoRecord) -> Option<GeoRecord> {
        let replaced = self.records.insert(record.id().to_string(), record);
        if let Some(previous) = &replaced {
            self.logger
                .warn(&format!("record {} replaced an existing entry", previous.id()));
        }
        replaced
    }

    pub fn get(&self, id: &str) -> Option<&GeoRecord> {
        self.records.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeoRecord> {
        self.records.values()
    }

    pub fn georeferenced(&self) -> impl Iterator<Item = &GeoRecord> {
        self.iter().filter(|record| record.has_geo_reference())
    }

    pub fn georeferenced_count(&self) -> usize {
        self.georeferenced().count()
    }

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut GeoRecord> {
        self.records.get_mut(id)
    }
}

impl FromIterator<GeoRecord> for RecordStore {
    fn from_iter<I: IntoIterator<Item = GeoRecord>>(iter: I) -> Self {
        let mut store = Self::new();
        for record in iter {
            store.insert(record);
        }
        store
    }
}
