use rand::Rng;
use serde::{Deserialize, Serialize};

/// Random factors sizing the easting and northing shift, each in `[-1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalerPair {
    pub scaler_x: f64,
    pub scaler_y: f64,
}

pub struct ScalerGenerator;

impl ScalerGenerator {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> ScalerPair {
        ScalerPair {
            scaler_x: rng.gen_range(-1.0..1.0),
            scaler_y: rng.gen_range(-1.0..1.0),
        }
    }
}
