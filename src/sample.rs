//! Loading sample pixels from CSV

use crate::bands::BandSeries;
use ccd_core::{Error, Result};
use serde::Deserialize;
use std::io;
use std::path::Path;
use tracing::debug;

/// One headerless sample row: date, red, green, blue, nir, swir1, swir2,
/// thermal, qa
#[derive(Debug, Deserialize)]
struct SampleRow(i64, f64, f64, f64, f64, f64, f64, f64, u8);

/// Read a sample CSV file into a band series
pub fn read_sample<P: AsRef<Path>>(path: P) -> Result<BandSeries> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let series = read_sample_from(file)?;
    debug!(path = %path.display(), observations = series.len(), "sample loaded");
    Ok(series)
}

/// Read sample rows from any reader
pub fn read_sample_from<R: io::Read>(reader: R) -> Result<BandSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut series = BandSeries::default();
    for row in reader.deserialize::<SampleRow>() {
        let SampleRow(date, red, green, blue, nir, swir1, swir2, thermal, qa) =
            row.map_err(|e| Error::Csv(e.to_string()))?;
        series.dates.push(date);
        series.red.push(red);
        series.green.push(green);
        series.blue.push(blue);
        series.nir.push(nir);
        series.swir1.push(swir1);
        series.swir2.push(swir2);
        series.thermal.push(thermal);
        series.qa.push(qa);
    }
    Ok(series)
}
