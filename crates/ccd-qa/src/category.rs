//! Choosing the detection procedure for a pixel

use crate::filter::{count_clear_or_water, count_snow, ratio_clear, ratio_snow};
use crate::params::QaParameters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a pixel's time series should be processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Enough clear observations for standard change detection
    Standard,
    /// Mostly snow; needs a snow-specific procedure
    PermanentSnow,
    /// Too few usable observations for any procedure
    Insufficient,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Standard => write!(f, "Standard"),
            Category::PermanentSnow => write!(f, "Permanent Snow"),
            Category::Insufficient => write!(f, "Insufficient"),
        }
    }
}

/// Categorize a pixel from its QA values
///
/// A pixel with a low clear share is permanent snow when snow dominates
/// its usable observations and there are enough snow observations;
/// otherwise it is insufficient. Everything else goes to standard
/// detection, provided enough clear observations exist.
pub fn categorize(qa: &[u8], params: &QaParameters) -> Category {
    let minimum = params.minimum_clear_observation_count;

    if ratio_clear(qa, params.fill_value) < params.clear_observation_pct {
        if ratio_snow(qa) > params.permanent_snow_threshold && count_snow(qa) >= minimum {
            return Category::PermanentSnow;
        }
        return Category::Insufficient;
    }
    if count_clear_or_water(qa) < minimum {
        return Category::Insufficient;
    }
    Category::Standard
}
