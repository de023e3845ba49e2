use crate::prelude::CoreResult;
use crate::processing::engine::{ObfuscationEngine, ObfuscationOutcome};
use crate::processing::scaler::{ScalerGenerator, ScalerPair};
use crate::records::RecordStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Everything one obfuscation run reads or writes. Nothing is shared between
/// contexts, so independent batches can run side by side.
pub struct RunContext<R: Rng> {
    pub store: RecordStore,
    pub scalers: ScalerPair,
    rng: R,
}

impl<R: Rng> RunContext<R> {
    /// Draws the scalers from `rng` before anything else uses it.
    pub fn new(store: RecordStore, mut rng: R) -> Self {
        let scalers = ScalerGenerator::generate(&mut rng);
        Self {
            store,
            scalers,
            rng,
        }
    }

    pub fn with_scalers(store: RecordStore, scalers: ScalerPair, rng: R) -> Self {
        Self {
            store,
            scalers,
            rng,
        }
    }

    pub fn obfuscate(&mut self, engine: &ObfuscationEngine) -> CoreResult<ObfuscationOutcome> {
        engine.run(&mut self.store, self.scalers, &mut self.rng)
    }

    pub fn into_store(self) -> RecordStore {
        self.store
    }
}

impl RunContext<StdRng> {
    /// Reproducible with a seed, OS entropy otherwise.
    pub fn seeded(store: RecordStore, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(store, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::fixtures::scenario_store;
    use crate::records::GeoRecord;
    use rand::rngs::mock::StepRng;

    fn records(store: &RecordStore) -> Vec<GeoRecord> {
        store.iter().cloned().collect()
    }

    #[test]
    fn same_seed_reproduces_the_run() {
        let engine = ObfuscationEngine::new();
        let mut first = RunContext::seeded(scenario_store(), Some(2024));
        let mut second = RunContext::seeded(scenario_store(), Some(2024));

        let a = first.obfuscate(&engine).unwrap();
        let b = second.obfuscate(&engine).unwrap();

        assert_eq!(first.scalers, second.scalers);
        assert_eq!(a, b);
        assert_eq!(records(&first.store), records(&second.store));
    }

    #[test]
    fn scalers_come_from_the_injected_source() {
        let context = RunContext::new(scenario_store(), StepRng::new(0, 1 << 63));
        assert_eq!(
            context.scalers,
            ScalerPair {
                scaler_x: -1.0,
                scaler_y: 0.0,
            }
        );
    }

    #[test]
    fn explicit_scalers_drive_the_shift() {
        let scalers = ScalerPair {
            scaler_x: 0.5,
            scaler_y: 0.0,
        };
        let mut context =
            RunContext::with_scalers(scenario_store(), scalers, StdRng::seed_from_u64(8));
        context.obfuscate(&ObfuscationEngine::new()).unwrap();
        let store = context.into_store();
        let easting = store.get("a.jpg").unwrap().utm().unwrap().easting;
        assert_eq!(easting, 499_500.0);
    }

    #[test]
    fn unseeded_context_still_yields_valid_scalers() {
        let context = RunContext::seeded(RecordStore::new(), None);
        assert!((-1.0..1.0).contains(&context.scalers.scaler_x));
        assert!((-1.0..1.0).contains(&context.scalers.scaler_y));
    }
}
