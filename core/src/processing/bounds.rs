use crate::records::RecordStore;
use serde::Serialize;

/// Extent of the georeferenced records in the shared UTM zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub alt_min: f64,
}

pub struct BoundingBoxCalculator;

impl BoundingBoxCalculator {
    /// Returns `None` when no record is georeferenced.
    pub fn compute(store: &RecordStore) -> Option<BoundingBox> {
        let mut bounds: Option<BoundingBox> = None;
        for record in store.iter() {
            let Some(utm) = record.utm() else {
                continue;
            };
            let altitude = record.altitude();
            bounds = Some(match bounds {
                None => BoundingBox {
                    x_min: utm.easting,
                    x_max: utm.easting,
                    y_min: utm.northing,
                    y_max: utm.northing,
                    alt_min: altitude,
                },
                Some(current) => BoundingBox {
                    x_min: current.x_min.min(utm.easting),
                    x_max: current.x_max.max(utm.easting),
                    y_min: current.y_min.min(utm.northing),
                    y_max: current.y_max.max(utm.northing),
                    alt_min: current.alt_min.min(altitude),
                },
            });
        }
        bounds
    }
}
