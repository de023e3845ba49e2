use crate::projection::UtmZone;

/// Failure raised by the forward or inverse UTM projection.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("coordinate input is not finite")]
    NonFinite,
    #[error("latitude {0} outside UTM coverage (-80..=84)")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside -180..=180")]
    LongitudeOutOfRange(f64),
    #[error("invalid zone number {0}")]
    InvalidZoneNumber(u8),
    #[error("invalid zone letter {0:?}")]
    InvalidZoneLetter(char),
    #[error("easting {0} outside the projected grid")]
    EastingOutOfRange(f64),
    #[error("northing {0} outside the projected grid")]
    NorthingOutOfRange(f64),
}

/// Common error type for an obfuscation run.
#[derive(thiserror::Error, Debug)]
pub enum ObfuscationError {
    #[error("zone conflict: {conflicting} georeferenced record(s) differ from zone {baseline}")]
    ZoneConflict { baseline: UtmZone, conflicting: usize },
    #[error("projection failed for {id}: {source}")]
    Projection {
        id: String,
        #[source]
        source: ProjectionError,
    },
}

pub type CoreResult<T> = Result<T, ObfuscationError>;
