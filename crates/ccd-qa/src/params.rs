//! Parameters for quality-assurance filtering

use ccd_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Thresholds used to screen and categorize a pixel's observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaParameters {
    /// Minimum share of clear or water observations among non-fill ones
    pub clear_observation_pct: f64,

    /// Snow share above which a pixel counts as permanent snow
    pub permanent_snow_threshold: f64,

    /// Minimum number of usable observations for a category
    pub minimum_clear_observation_count: usize,

    /// QA value marking fill
    pub fill_value: u8,

    /// Exclusive upper bound for unsaturated reflectance
    pub saturation_ceiling: f64,

    /// Brightness temperature range in Kelvin, before the ×10 scaling
    pub min_kelvin: f64,
    pub max_kelvin: f64,
}

impl Default for QaParameters {
    fn default() -> Self {
        Self {
            clear_observation_pct: 0.25,
            permanent_snow_threshold: 0.75,
            minimum_clear_observation_count: 12,
            fill_value: crate::FILL,
            saturation_ceiling: 10_000.0,
            min_kelvin: 179.95,
            max_kelvin: 343.85,
        }
    }
}

impl QaParameters {
    pub fn with_clear_observation_pct(mut self, pct: f64) -> Self {
        self.clear_observation_pct = pct;
        self
    }

    pub fn with_permanent_snow_threshold(mut self, threshold: f64) -> Self {
        self.permanent_snow_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("clear_observation_pct", self.clear_observation_pct),
            ("permanent_snow_threshold", self.permanent_snow_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidParameter(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if !(self.min_kelvin < self.max_kelvin) {
            return Err(Error::InvalidParameter(format!(
                "temperature range [{}, {}] is empty",
                self.min_kelvin, self.max_kelvin
            )));
        }
        Ok(())
    }
}
