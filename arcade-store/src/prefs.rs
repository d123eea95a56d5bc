//! Therapist preference flags, persisted under their original keys.
//!
//! Every read falls back to a documented default when the stored value
//! is missing or unrecognized: 10-12 age band, 1x session length,
//! normal pacing.

use arcade_core::AgeGroup;

use crate::history::ArcadeStore;
use crate::storage::Storage;

const AGE_KEY: &str = "fa_age";
const TRIALS_FACTOR_KEY: &str = "fa_trialsFactor";
const SLOW_KEY: &str = "fa_slow";

/// Session-length multipliers offered in the therapist panel.
pub const TRIALS_FACTORS: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

impl<S: Storage> ArcadeStore<S> {
    pub fn age(&self) -> AgeGroup {
        self.storage()
            .get(AGE_KEY)
            .and_then(|v| AgeGroup::parse(&v))
            .unwrap_or(AgeGroup::From10To12)
    }

    pub fn set_age(&mut self, age: AgeGroup) {
        self.storage_mut().set(AGE_KEY, age.as_str());
    }

    /// Trial-count multiplier; unrecognized values fall back to 1x.
    pub fn trials_factor(&self) -> f64 {
        self.storage()
            .get(TRIALS_FACTOR_KEY)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| TRIALS_FACTORS.contains(v))
            .unwrap_or(1.0)
    }

    pub fn set_trials_factor(&mut self, factor: f64) {
        if TRIALS_FACTORS.contains(&factor) {
            self.storage_mut().set(TRIALS_FACTOR_KEY, &factor.to_string());
        }
    }

    pub fn slow(&self) -> bool {
        self.storage()
            .get(SLOW_KEY)
            .map(|v| v == "1")
            .unwrap_or(false)
    }

    pub fn set_slow(&mut self, slow: bool) {
        self.storage_mut().set(SLOW_KEY, if slow { "1" } else { "0" });
    }
}
