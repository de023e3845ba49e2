use crate::prelude::ProjectionError;
use crate::projection::{UtmCoordinate, UtmProjector};
use serde::{Deserialize, Serialize};

/// Location tags as supplied by a metadata reader; any of them may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoSample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl GeoSample {
    pub fn new(latitude: f64, longitude: f64, altitude: Option<f64>) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            altitude,
        }
    }
}

/// Geodetic position together with its UTM projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lon: f64,
    pub utm: UtmCoordinate,
}

impl GeoPosition {
    pub fn from_geodetic(lat: f64, lon: f64) -> Result<Self, ProjectionError> {
        let utm = UtmProjector::project(lat, lon)?;
        Ok(Self { lat, lon, utm })
    }

    pub fn from_utm(utm: UtmCoordinate) -> Result<Self, ProjectionError> {
        let point = UtmProjector::inverse_project(utm.zone, utm.easting, utm.northing)?;
        Ok(Self {
            lat: point.lat,
            lon: point.lon,
            utm,
        })
    }
}

/// One image in a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoRecord {
    id: String,
    name: String,
    altitude: f64,
    position: Option<GeoPosition>,
}

impl GeoRecord {
    /// Builds a record from reader output. Both latitude and longitude must be
    /// present for the record to be georeferenced; a missing altitude is 0.
    pub fn from_sample(
        id: impl Into<String>,
        name: impl Into<String>,
        sample: GeoSample,
    ) -> Result<Self, ProjectionError> {
        let position = match (sample.latitude, sample.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPosition::from_geodetic(lat, lon)?),
            _ => None,
        };
        Ok(Self {
            id: id.into(),
            name: name.into(),
            altitude: sample.altitude.unwrap_or(0.0),
            position,
        })
    }

    pub fn from_utm(
        id: impl Into<String>,
        name: impl Into<String>,
        utm: UtmCoordinate,
        altitude: f64,
    ) -> Result<Self, ProjectionError> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            altitude,
            position: Some(GeoPosition::from_utm(utm)?),
        })
    }

    pub fn unreferenced(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            altitude: 0.0,
            position: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    pub fn has_geo_reference(&self) -> bool {
        self.position.is_some()
    }

    pub fn position(&self) -> Option<&GeoPosition> {
        self.position.as_ref()
    }

    pub fn utm(&self) -> Option<&UtmCoordinate> {
        self.position.as_ref().map(|position| &position.utm)
    }

    pub(crate) fn relocate(&mut self, position: GeoPosition, altitude: f64) {
        self.position = Some(position);
        self.altitude = altitude;
    }
}
