//! Coordinate-obfuscation core for batches of geotagged images.
//!
//! Records are projected to UTM, checked for a shared zone, translated as a
//! rigid cluster and reprojected into a randomly selected target zone. The
//! relative layout of the batch survives; the absolute position does not.

pub mod prelude;
pub mod processing;
pub mod projection;
pub mod records;
pub mod telemetry;

pub use prelude::{CoreResult, ObfuscationError, ProjectionError};
pub use processing::{ObfuscationEngine, ObfuscationOutcome, RunContext};
pub use records::{GeoRecord, GeoSample, RecordStore};
