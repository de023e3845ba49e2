use crate::projection::{UtmCoordinate, UtmZone};
use crate::records::{GeoRecord, RecordStore};

pub(crate) fn utm_record(id: &str, zone: u8, letter: char, easting: f64, altitude: f64) -> GeoRecord {
    let utm = UtmCoordinate {
        zone: UtmZone::new(zone, letter).unwrap(),
        easting,
        northing: 4_500_000.0,
    };
    GeoRecord::from_utm(id, id, utm, altitude).unwrap()
}

pub(crate) fn utm_record_at(id: &str, easting: f64, northing: f64, altitude: f64) -> GeoRecord {
    let utm = UtmCoordinate {
        zone: UtmZone::new(33, 'N').unwrap(),
        easting,
        northing,
    };
    GeoRecord::from_utm(id, id, utm, altitude).unwrap()
}

/// Three records in zone 17N spread 1 km either side of the central meridian.
pub(crate) fn scenario_store() -> RecordStore {
    let zone = UtmZone::new(17, 'N').unwrap();
    [
        ("a.jpg", 499_000.0, 4_500_000.0, 10.0),
        ("b.jpg", 500_000.0, 4_500_100.0, 30.0),
        ("c.jpg", 501_000.0, 4_500_050.0, 20.0),
    ]
    .into_iter()
    .map(|(id, easting, northing, altitude)| {
        let utm = UtmCoordinate {
            zone,
            easting,
            northing,
        };
        GeoRecord::from_utm(id, id, utm, altitude).unwrap()
    })
    .collect()
}
