use crate::projection::UtmZone;
use crate::records::RecordStore;

/// Result of checking that every georeferenced record shares one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneCheck {
    pub conflict: bool,
    /// Zone of the first georeferenced record; absent when there is none.
    pub zone: Option<UtmZone>,
    /// Records whose zone differs from the baseline.
    pub conflicting: usize,
}

pub struct ZoneValidator;

impl ZoneValidator {
    pub fn validate(store: &RecordStore) -> ZoneCheck {
        let mut baseline: Option<UtmZone> = None;
        let mut conflicting = 0;

        for utm in store.iter().filter_map(|record| record.utm()) {
            match baseline {
                None => baseline = Some(utm.zone),
                Some(zone) if zone != utm.zone => conflicting += 1,
                Some(_) => {}
            }
        }

        ZoneCheck {
            conflict: conflicting > 0,
            zone: baseline,
            conflicting,
        }
    }
}
