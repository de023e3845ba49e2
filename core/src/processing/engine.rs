use crate::prelude::{CoreResult, ObfuscationError};
use crate::processing::bounds::{BoundingBox, BoundingBoxCalculator};
use crate::processing::scaler::ScalerPair;
use crate::processing::target::select_target_zone;
use crate::processing::zone_check::ZoneValidator;
use crate::projection::{UtmCoordinate, UtmZone, FALSE_EASTING};
use crate::records::{GeoPosition, RecordStore};
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{Metrics, MetricsRecorder};
use rand::Rng;
use serde::Serialize;

/// Largest northing displacement, reached at a scaler of ±1.
const NORTHING_SPAN: f64 = 1_000.0;

/// Translation applied to every georeferenced record of a run, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShiftVector {
    pub x_adder: f64,
    pub y_adder: f64,
}

impl ShiftVector {
    /// Scales the distance from the westernmost record to the central
    /// meridian by `scaler_x`; the northing offset has no reference point.
    /// Exact halves round to the even meter.
    pub fn from_bounds(bounds: &BoundingBox, scalers: ScalerPair) -> Self {
        Self {
            x_adder: ((FALSE_EASTING - bounds.x_min) * scalers.scaler_x).round_ties_even(),
            y_adder: (NORTHING_SPAN * scalers.scaler_y).round_ties_even(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShiftReport {
    pub target_zone: UtmZone,
    pub shift: ShiftVector,
    pub bounds: BoundingBox,
    pub shifted: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ObfuscationOutcome {
    NoGeoreferencedRecords,
    Shifted(ShiftReport),
}

/// Validates, translates and reprojects a record store as one rigid cluster.
pub struct ObfuscationEngine {
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl ObfuscationEngine {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
        }
    }

    /// Either every georeferenced record is moved or none is: a zone
    /// conflict or projection failure returns before the store is touched.
    pub fn run<R: Rng + ?Sized>(
        &self,
        store: &mut RecordStore,
        scalers: ScalerPair,
        rng: &mut R,
    ) -> CoreResult<ObfuscationOutcome> {
        self.metrics.record_processed(store.total_count());

        let check = ZoneValidator::validate(store);
        if let (true, Some(baseline)) = (check.conflict, check.zone) {
            self.metrics.record_error();
            self.logger.warn(&format!(
                "zone conflict: {} record(s) outside {}",
                check.conflicting, baseline
            ));
            return Err(ObfuscationError::ZoneConflict {
                baseline,
                conflicting: check.conflicting,
            });
        }

        let Some(bounds) = BoundingBoxCalculator::compute(store) else {
            self.logger
                .record("no georeferenced records, leaving store unchanged");
            return Ok(ObfuscationOutcome::NoGeoreferencedRecords);
        };
        self.logger.record(&format!(
            "bounds x {:.3}..{:.3} y {:.3}..{:.3} alt_min {:.3}",
            bounds.x_min, bounds.x_max, bounds.y_min, bounds.y_max, bounds.alt_min
        ));

        let target_zone = select_target_zone(rng);
        let shift = ShiftVector::from_bounds(&bounds, scalers);
        self.logger.record(&format!(
            "shifting by ({}, {}) into zone {}",
            shift.x_adder, shift.y_adder, target_zone
        ));

        let staged = match Self::stage(store, target_zone, shift, bounds.alt_min) {
            Ok(staged) => staged,
            Err(err) => {
                self.metrics.record_error();
                return Err(err);
            }
        };

        let shifted = staged.len();
        for (id, position, altitude) in staged {
            if let Some(record) = store.get_mut(&id) {
                record.relocate(position, altitude);
            }
        }
        self.metrics.record_shifted(shifted);
        self.logger
            .record(&format!("reprojected {} record(s)", shifted));

        Ok(ObfuscationOutcome::Shifted(ShiftReport {
            target_zone,
            shift,
            bounds,
            shifted,
        }))
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }

    fn stage(
        store: &RecordStore,
        target_zone: UtmZone,
        shift: ShiftVector,
        alt_min: f64,
    ) -> CoreResult<Vec<(String, GeoPosition, f64)>> {
        store
            .iter()
            .filter_map(|record| record.utm().map(|utm| (record, utm)))
            .map(|(record, utm)| -> CoreResult<(String, GeoPosition, f64)> {
                let moved = UtmCoordinate {
                    zone: target_zone,
                    easting: utm.easting + shift.x_adder,
                    northing: utm.northing + shift.y_adder,
                };
                let position =
                    GeoPosition::from_utm(moved).map_err(|source| ObfuscationError::Projection {
                        id: record.id().to_string(),
                        source,
                    })?;
                Ok((
                    record.id().to_string(),
                    position,
                    rebase_altitude(record.altitude(), alt_min),
                ))
            })
            .collect()
    }
}

impl Default for ObfuscationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Altitude above the batch floor, rounded to millimeters (ties to even).
fn rebase_altitude(altitude: f64, floor: f64) -> f64 {
    ((altitude - floor) * 1_000.0).round_ties_even() / 1_000.0
}
