//! Landsat band series and the configuration of a band-level run

use ccd_core::{DetectionParameters, Error, Result};
use ccd_qa::QaParameters;
use ccd_regression::FitterKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spectral bands modelled by change detection, in model order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Red,
    Green,
    Blue,
    Nir,
    Swir1,
    Swir2,
}

impl Band {
    pub const SPECTRAL: [Band; 6] = [
        Band::Red,
        Band::Green,
        Band::Blue,
        Band::Nir,
        Band::Swir1,
        Band::Swir2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Band::Red => "red",
            Band::Green => "green",
            Band::Blue => "blue",
            Band::Nir => "nir",
            Band::Swir1 => "swir1",
            Band::Swir2 => "swir2",
        }
    }

    /// Position within the spectra handed to the detector
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One pixel's observations: dates, six reflectance bands, thermal and QA
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandSeries {
    pub dates: Vec<i64>,
    pub red: Vec<f64>,
    pub green: Vec<f64>,
    pub blue: Vec<f64>,
    pub nir: Vec<f64>,
    pub swir1: Vec<f64>,
    pub swir2: Vec<f64>,
    pub thermal: Vec<f64>,
    pub qa: Vec<u8>,
}

impl BandSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn band(&self, band: Band) -> &[f64] {
        match band {
            Band::Red => &self.red,
            Band::Green => &self.green,
            Band::Blue => &self.blue,
            Band::Nir => &self.nir,
            Band::Swir1 => &self.swir1,
            Band::Swir2 => &self.swir2,
        }
    }

    /// The six reflectance bands in model order
    pub fn reflectance(&self) -> Vec<Vec<f64>> {
        Band::SPECTRAL
            .iter()
            .map(|&band| self.band(band).to_vec())
            .collect()
    }

    /// Check that every band has one value per date
    pub fn validate(&self) -> Result<()> {
        let len = self.dates.len();
        for band in Band::SPECTRAL {
            let actual = self.band(band).len();
            if actual != len {
                return Err(Error::size_mismatch(len, actual, band.name()));
            }
        }
        if self.thermal.len() != len {
            return Err(Error::size_mismatch(len, self.thermal.len(), "thermal"));
        }
        if self.qa.len() != len {
            return Err(Error::size_mismatch(len, self.qa.len(), "qa"));
        }
        Ok(())
    }
}

/// Everything a band-level detection run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CcdConfig {
    pub detection: DetectionParameters,
    pub fitter: FitterKind,
    pub qa: QaParameters,
    /// Drop cloudy, saturated and out-of-range observations first
    pub preprocess: bool,
    /// Run the outlier mask over the whole series before detection
    pub prefilter_outliers: bool,
}

impl Default for CcdConfig {
    fn default() -> Self {
        Self {
            detection: DetectionParameters::default(),
            fitter: FitterKind::default(),
            qa: QaParameters::default(),
            preprocess: true,
            prefilter_outliers: true,
        }
    }
}

impl CcdConfig {
    pub fn with_fitter(mut self, fitter: FitterKind) -> Self {
        self.fitter = fitter;
        self
    }

    pub fn with_detection(mut self, detection: DetectionParameters) -> Self {
        self.detection = detection;
        self
    }

    pub fn with_preprocess(mut self, enabled: bool) -> Self {
        self.preprocess = enabled;
        self
    }

    pub fn with_prefilter_outliers(mut self, enabled: bool) -> Self {
        self.prefilter_outliers = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.detection.validate()?;
        self.qa.validate()?;
        if let Some(band) = self
            .detection
            .tmask_bands
            .iter()
            .find(|&&b| b >= Band::SPECTRAL.len())
        {
            return Err(Error::InvalidParameter(format!(
                "tmask band {band} is not a spectral band"
            )));
        }
        Ok(())
    }
}
