use crate::prelude::ProjectionError;
use serde::Serialize;
use std::fmt;

/// Latitude bands from 80°S northwards, 8° each; `X` is stretched to 84°N.
pub const LATITUDE_BANDS: &str = "CDEFGHJKLMNPQRSTUVWX";

pub const MIN_LATITUDE: f64 = -80.0;
pub const MAX_LATITUDE: f64 = 84.0;

/// A UTM grid zone: 6° longitude column plus latitude band letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UtmZone {
    number: u8,
    letter: char,
}

impl UtmZone {
    pub fn new(number: u8, letter: char) -> Result<Self, ProjectionError> {
        if !(1..=60).contains(&number) {
            return Err(ProjectionError::InvalidZoneNumber(number));
        }
        let letter = letter.to_ascii_uppercase();
        if !LATITUDE_BANDS.contains(letter) {
            return Err(ProjectionError::InvalidZoneLetter(letter));
        }
        Ok(Self { number, letter })
    }

    /// Caller guarantees `number` in 1..=60 and `letter` in [`LATITUDE_BANDS`].
    pub(crate) const fn new_unchecked(number: u8, letter: char) -> Self {
        Self { number, letter }
    }

    /// Zone containing the given position. Inputs must already be range checked.
    pub(crate) fn containing(lat: f64, lon: f64) -> Self {
        Self {
            number: zone_number(lat, lon),
            letter: latitude_band(lat),
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    /// Bands `N` through `X` lie north of the equator.
    pub fn is_northern(&self) -> bool {
        self.letter >= 'N'
    }

    pub fn central_meridian(&self) -> f64 {
        f64::from(self.number) * 6.0 - 183.0
    }
}

impl fmt::Display for UtmZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.letter)
    }
}

fn latitude_band(lat: f64) -> char {
    let index = (((lat - MIN_LATITUDE) / 8.0).floor() as usize).min(LATITUDE_BANDS.len() - 1);
    LATITUDE_BANDS.as_bytes()[index] as char
}

fn zone_number(lat: f64, lon: f64) -> u8 {
    // Southwest Norway.
    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        return 32;
    }
    // Svalbard.
    if (72.0..=MAX_LATITUDE).contains(&lat) && lon >= 0.0 {
        if lon < 9.0 {
            return 31;
        } else if lon < 21.0 {
            return 33;
        } else if lon < 33.0 {
            return 35;
        } else if lon < 42.0 {
            return 37;
        }
    }
    ((((lon + 180.0) / 6.0).floor() as i64).clamp(0, 59) + 1) as u8
}

/// Maps a longitude in -180..=180 onto -180..180.
pub(crate) fn normalize_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}
