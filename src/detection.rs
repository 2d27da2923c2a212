//! Band-level change detection and its result records

use crate::bands::{Band, BandSeries, CcdConfig};
use ccd_change::SegmentResult;
use ccd_core::Result;
use ccd_qa::Category;
use ccd_regression::Fitter;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::{debug, instrument};

/// Model of one band over one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandModel {
    pub band: Band,
    /// Change magnitude, absent when the segment was never extended
    pub magnitude: Option<f64>,
    pub rmse: f64,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// One detected segment of a pixel's time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub start_day: i64,
    pub end_day: i64,
    /// Observations from the first to the last index of the segment
    pub observation_count: usize,
    pub category: Category,
    pub bands: Vec<BandModel>,
}

impl Detection {
    fn from_segment(segment: &SegmentResult, category: Category) -> Self {
        let bands = Band::SPECTRAL
            .iter()
            .zip(&segment.models)
            .enumerate()
            .map(|(ix, (&band, model))| BandModel {
                band,
                magnitude: segment.magnitudes.as_ref().map(|m| m[ix]),
                rmse: segment.errors[ix],
                coefficients: model.coefficients().to_vec(),
                intercept: model.intercept(),
            })
            .collect();

        Self {
            start_day: segment.start_day,
            end_day: segment.end_day,
            observation_count: segment.observation_count(),
            category,
            bands,
        }
    }

    pub fn band(&self, band: Band) -> Option<&BandModel> {
        self.bands.iter().find(|model| model.band == band)
    }
}

/// Detect change in one pixel's band series
///
/// Optionally drops unusable observations by QA, then optionally removes
/// outliers across the whole series, then runs change detection over the
/// six reflectance bands. The pixel's QA category is recorded on every
/// detection but does not select a different procedure.
#[instrument(skip_all, fields(observations = series.len(), fitter = config.fitter.name()))]
pub fn detect(series: &BandSeries, config: &CcdConfig) -> Result<Vec<Detection>> {
    config.validate()?;
    series.validate()?;

    let (category, mut dates, mut spectra) = if config.preprocess {
        let category = ccd_qa::categorize(&series.qa, &config.qa);
        let filtered = ccd_qa::preprocess(
            &series.dates,
            &series.reflectance(),
            &series.thermal,
            &series.qa,
            &config.qa,
        )?;
        (category, filtered.dates, filtered.reflectance)
    } else {
        (Category::Standard, series.dates.clone(), series.reflectance())
    };
    debug!(%category, usable = dates.len(), "pixel categorized");

    if config.prefilter_outliers && !dates.is_empty() {
        let thresholds = ccd_tmask::adjusted_rmse(&spectra, config.detection.tmask_t_const);
        let masked = ccd_tmask::mask(&dates, &spectra, &thresholds, &config.detection.tmask_bands)?;
        dates = masked.times;
        spectra = masked.observations;
    }

    let segments = ccd_change::detect(&dates, &spectra, &config.fitter, &config.detection)?;
    Ok(segments
        .iter()
        .map(|segment| Detection::from_segment(segment, category))
        .collect())
}

/// Render detections as a text table, one block per segment
///
/// Missing magnitudes are shown as zero.
pub fn results_to_table(detections: &[Detection]) -> String {
    let mut table = String::new();
    for (ix, detection) in detections.iter().enumerate() {
        let coefficients = detection
            .bands
            .first()
            .map_or(0, |band| band.coefficients.len());

        let _ = writeln!(
            table,
            "Time Segment {}: {}...{}",
            ix, detection.start_day, detection.end_day
        );
        let _ = write!(table, "{:<10} {:>10} {:>10}", "band", "mags", "rmse");
        for c in 1..=coefficients {
            let _ = write!(table, " {:>12}", format!("c{c}"));
        }
        let _ = writeln!(table, " {:>15}", "intercept");

        for band in &detection.bands {
            let _ = write!(
                table,
                "{:<10} {:>10.4} {:>10.4}",
                band.band.name(),
                band.magnitude.unwrap_or(0.0),
                band.rmse
            );
            for value in &band.coefficients {
                let _ = write!(table, " {:>12.4}", value);
            }
            let _ = writeln!(table, " {:>15.2}", band.intercept);
        }
    }
    table
}
