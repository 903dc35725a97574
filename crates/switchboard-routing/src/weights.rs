//! Live scoring coefficients shared between requests and operators

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use switchboard_config::WeightsConfig;

/// The six scoring coefficients
///
/// Values are taken as given; negative or zero coefficients are legal and
/// simply invert or silence the corresponding term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub alpha1: f64,
    pub alpha2: f64,
    pub alpha3: f64,
    pub alpha4: f64,
    pub alpha5: f64,
    pub alpha6: f64,
}

impl Weights {
    pub const fn new(alpha1: f64, alpha2: f64, alpha3: f64, alpha4: f64, alpha5: f64, alpha6: f64) -> Self {
        Self {
            alpha1,
            alpha2,
            alpha3,
            alpha4,
            alpha5,
            alpha6,
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        WeightsConfig::default().into()
    }
}

impl From<WeightsConfig> for Weights {
    fn from(config: WeightsConfig) -> Self {
        Self::new(
            config.alpha1,
            config.alpha2,
            config.alpha3,
            config.alpha4,
            config.alpha5,
            config.alpha6,
        )
    }
}

/// Process-wide weight vector behind a single lock
///
/// Reads and writes move the whole vector at once, so a reader sees
/// either the old six values or the new six, never a mix.
#[derive(Debug)]
pub struct WeightStore {
    current: Mutex<Weights>,
}

impl WeightStore {
    pub const fn new(initial: Weights) -> Self {
        Self {
            current: Mutex::new(initial),
        }
    }

    /// Snapshot of the current vector
    pub fn get(&self) -> Weights {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace all six coefficients, returning the previous vector
    pub fn set(&self, weights: Weights) -> Weights {
        let mut guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, weights)
    }
}

impl Default for WeightStore {
    fn default() -> Self {
        Self::new(Weights::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn defaults_match_reference_vector() {
        let store = WeightStore::default();
        assert_eq!(store.get(), Weights::new(2.0, 1.0, 1.5, 0.5, 1.0, 1.2));
    }

    #[test]
    fn set_then_get_round_trips_any_values() {
        let store = WeightStore::default();
        for weights in [
            Weights::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
            Weights::new(-1.0, -2.5, 3.0, -0.0, 1e9, -1e-9),
            Weights::new(1.0, 1.0, 1.0, 1.0, 1.0, 1.0),
        ] {
            store.set(weights);
            assert_eq!(store.get(), weights);
        }
    }

    #[test]
    fn set_returns_previous_vector() {
        let store = WeightStore::new(Weights::new(1.0, 1.0, 1.0, 1.0, 1.0, 1.0));
        let previous = store.set(Weights::new(2.0, 2.0, 2.0, 2.0, 2.0, 2.0));
        assert_eq!(previous, Weights::new(1.0, 1.0, 1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn readers_never_observe_partial_updates() {
        let store = Arc::new(WeightStore::new(Weights::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)));

        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 1..=500 {
                    let v = f64::from(i);
                    store.set(Weights::new(v, v, v, v, v, v));
                }
            })
        };

        for _ in 0..2000 {
            let w = store.get();
            let all = [w.alpha2, w.alpha3, w.alpha4, w.alpha5, w.alpha6];
            assert!(all.iter().all(|a| (a - w.alpha1).abs() < f64::EPSILON), "mixed vector {w:?}");
        }

        writer.join().unwrap();
    }

    #[test]
    fn deserializes_from_json_payload() {
        let json = r#"{"alpha1":1,"alpha2":2,"alpha3":3,"alpha4":4,"alpha5":5,"alpha6":6}"#;
        let weights: Weights = serde_json::from_str(json).unwrap();
        assert_eq!(weights, Weights::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0));
    }
}
