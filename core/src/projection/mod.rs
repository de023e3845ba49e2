pub mod utm;
pub mod zone;

pub use utm::{GeodeticPoint, UtmCoordinate, UtmProjector, FALSE_EASTING};
pub use zone::UtmZone;
