use crate::prelude::ProjectionError;
use crate::projection::zone::{normalize_longitude, UtmZone, MAX_LATITUDE, MIN_LATITUDE};
use serde::Serialize;

const WGS84_SEMI_MAJOR: f64 = 6_378_137.0;
const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;
const SCALE_FACTOR: f64 = 0.9996;
pub const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;
const MAX_EASTING: f64 = 1_000_000.0;

/// Planar position inside a UTM zone, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtmCoordinate {
    pub zone: UtmZone,
    pub easting: f64,
    pub northing: f64,
}

/// Geodetic position on WGS84, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeodeticPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Krüger series coefficients for the WGS84 ellipsoid.
struct KruegerSeries {
    rectifying_radius: f64,
    eccentricity: f64,
    alpha: [f64; 3],
    beta: [f64; 3],
    delta: [f64; 3],
}

impl KruegerSeries {
    fn wgs84() -> Self {
        let n = WGS84_FLATTENING / (2.0 - WGS84_FLATTENING);
        let n2 = n * n;
        let n3 = n2 * n;
        Self {
            rectifying_radius: WGS84_SEMI_MAJOR / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0),
            eccentricity: 2.0 * n.sqrt() / (1.0 + n),
            alpha: [
                n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0,
                13.0 * n2 / 48.0 - 3.0 * n3 / 5.0,
                61.0 * n3 / 240.0,
            ],
            beta: [
                n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0,
                n2 / 48.0 + n3 / 15.0,
                17.0 * n3 / 480.0,
            ],
            delta: [
                2.0 * n - 2.0 * n2 / 3.0 - 2.0 * n3,
                7.0 * n2 / 3.0 - 8.0 * n3 / 5.0,
                56.0 * n3 / 15.0,
            ],
        }
    }

    fn grid_scale(&self) -> f64 {
        SCALE_FACTOR * self.rectifying_radius
    }
}

/// Forward and inverse transverse Mercator projection between WGS84 and UTM.
pub struct UtmProjector;

impl UtmProjector {
    pub fn project(lat: f64, lon: f64) -> Result<UtmCoordinate, ProjectionError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(ProjectionError::NonFinite);
        }
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&lat) {
            return Err(ProjectionError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(ProjectionError::LongitudeOutOfRange(lon));
        }

        let lon = normalize_longitude(lon);
        let zone = UtmZone::containing(lat, lon);
        let series = KruegerSeries::wgs84();

        let sin_phi = lat.to_radians().sin();
        let d_lambda = (lon - zone.central_meridian()).to_radians();
        let e = series.eccentricity;
        let t = (sin_phi.atanh() - e * (e * sin_phi).atanh()).sinh();
        let xi_prime = t.atan2(d_lambda.cos());
        let eta_prime = (d_lambda.sin() / (1.0 + t * t).sqrt()).atanh();

        let mut xi = xi_prime;
        let mut eta = eta_prime;
        for (j, alpha) in series.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += alpha * (k * xi_prime).sin() * (k * eta_prime).cosh();
            eta += alpha * (k * xi_prime).cos() * (k * eta_prime).sinh();
        }

        let easting = FALSE_EASTING + series.grid_scale() * eta;
        let mut northing = series.grid_scale() * xi;
        if !zone.is_northern() {
            northing += FALSE_NORTHING_SOUTH;
        }

        Ok(UtmCoordinate {
            zone,
            easting,
            northing,
        })
    }

    /// The hemisphere comes from the zone letter, so a southern band
    /// subtracts the false northing before inverting.
    pub fn inverse_project(
        zone: UtmZone,
        easting: f64,
        northing: f64,
    ) -> Result<GeodeticPoint, ProjectionError> {
        if !easting.is_finite() || !northing.is_finite() {
            return Err(ProjectionError::NonFinite);
        }
        if easting <= 0.0 || easting >= MAX_EASTING {
            return Err(ProjectionError::EastingOutOfRange(easting));
        }
        if !(0.0..=FALSE_NORTHING_SOUTH).contains(&northing) {
            return Err(ProjectionError::NorthingOutOfRange(northing));
        }

        let series = KruegerSeries::wgs84();
        let northing = if zone.is_northern() {
            northing
        } else {
            northing - FALSE_NORTHING_SOUTH
        };
        let xi = northing / series.grid_scale();
        let eta = (easting - FALSE_EASTING) / series.grid_scale();

        let mut xi_prime = xi;
        let mut eta_prime = eta;
        for (j, beta) in series.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_prime -= beta * (k * xi).sin() * (k * eta).cosh();
            eta_prime -= beta * (k * xi).cos() * (k * eta).sinh();
        }

        let chi = (xi_prime.sin() / eta_prime.cosh()).asin();
        let mut phi = chi;
        for (j, delta) in series.delta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            phi += delta * (k * chi).sin();
        }
        let lambda = eta_prime.sinh().atan2(xi_prime.cos());

        Ok(GeodeticPoint {
            lat: phi.to_degrees(),
            lon: normalize_longitude(zone.central_meridian() + lambda.to_degrees()),
        })
    }
}
