//! Quality-assurance filtering for change detection inputs
//!
//! Works on the Landsat CFMask classification, one QA value per
//! observation. Upstream of detection it decides which observations are
//! usable and which procedure a pixel needs.

pub mod category;
pub mod filter;
pub mod params;

pub use category::{categorize, Category};
pub use filter::{
    clear_index, count_clear_or_water, count_fill, count_snow, count_total, enough_clear,
    enough_snow, preprocess, ratio_clear, ratio_snow, temperature_index, unsaturated_index,
    Filtered,
};
pub use params::QaParameters;

// CFMask classes
pub const CLEAR: u8 = 0;
pub const WATER: u8 = 1;
pub const CLOUD_SHADOW: u8 = 2;
pub const SNOW: u8 = 3;
pub const CLOUD: u8 = 4;
pub const FILL: u8 = 255;
