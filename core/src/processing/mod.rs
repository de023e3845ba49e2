pub mod bounds;
pub mod context;
pub mod engine;
pub mod scaler;
pub mod target;
pub mod zone_check;

#[cfg(test)]
pub(crate) mod fixtures;

pub use bounds::{BoundingBox, BoundingBoxCalculator};
pub use context::RunContext;
pub use engine::{ObfuscationEngine, ObfuscationOutcome, ShiftReport, ShiftVector};
pub use scaler::{ScalerGenerator, ScalerPair};
pub use target::select_target_zone;
pub use zone_check::{ZoneCheck, ZoneValidator};
