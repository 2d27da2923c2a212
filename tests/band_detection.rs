//! End-to-end detection over Landsat band series

use approx::assert_relative_eq;
use ccd::{
    detect, detect_batch, read_sample, results_to_table, Band, BandSeries, CcdConfig, Category,
    DetectionParameters, FitterKind,
};
use ccd_regression::ANNUAL_CYCLE;
use std::sync::Once;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn seasonal(dates: &[i64], base: f64, amplitude: f64) -> Vec<f64> {
    dates
        .iter()
        .map(|&t| base + amplitude * (ANNUAL_CYCLE * t as f64).sin())
        .collect()
}

/// Fifty clear observations 16 days apart, swir1 jumping at index 25
fn disturbed_pixel() -> BandSeries {
    let dates: Vec<i64> = (0..50).map(|i| 730_120 + 16 * i).collect();
    let mut swir1 = seasonal(&dates, 1500.0, 60.0);
    for value in swir1.iter_mut().skip(25) {
        *value += 400.0;
    }
    BandSeries {
        red: seasonal(&dates, 500.0, 30.0),
        green: seasonal(&dates, 800.0, 40.0),
        blue: seasonal(&dates, 400.0, 20.0),
        nir: seasonal(&dates, 3000.0, 150.0),
        swir1,
        swir2: seasonal(&dates, 1200.0, 50.0),
        thermal: vec![2950.0; dates.len()],
        qa: vec![ccd_qa::CLEAR; dates.len()],
        dates,
    }
}

/// Insert cloudy observations between existing dates
fn with_clouds(series: &BandSeries, after: &[usize]) -> BandSeries {
    let mut cloudy = BandSeries::default();
    for i in 0..series.len() {
        let mut push = |date: i64, reflectance: f64, row: Option<usize>, qa: u8| {
            cloudy.dates.push(date);
            for band in Band::SPECTRAL {
                let value = row.map_or(reflectance, |r| series.band(band)[r]);
                match band {
                    Band::Red => cloudy.red.push(value),
                    Band::Green => cloudy.green.push(value),
                    Band::Blue => cloudy.blue.push(value),
                    Band::Nir => cloudy.nir.push(value),
                    Band::Swir1 => cloudy.swir1.push(value),
                    Band::Swir2 => cloudy.swir2.push(value),
                }
            }
            cloudy.thermal.push(2950.0);
            cloudy.qa.push(qa);
        };
        push(series.dates[i], 0.0, Some(i), series.qa[i]);
        if after.contains(&i) {
            push(series.dates[i] + 8, 9000.0, None, ccd_qa::CLOUD);
        }
    }
    cloudy
}

fn ols_config() -> CcdConfig {
    CcdConfig::default().with_fitter(FitterKind::ols())
}

#[test]
fn test_disturbed_pixel_has_two_segments() {
    init_tracing();
    let pixel = disturbed_pixel();

    let detections = detect(&pixel, &ols_config()).unwrap();

    assert_eq!(detections.len(), 2);
    assert_eq!(detections[0].start_day, pixel.dates[0]);
    assert_eq!(detections[0].end_day, pixel.dates[23]);
    assert_eq!(detections[0].observation_count, 24);
    assert_eq!(detections[1].start_day, pixel.dates[25]);
    assert_eq!(detections[1].end_day, pixel.dates[48]);
    assert!(detections.iter().all(|d| d.category == Category::Standard));

    let swir1 = detections[0].band(Band::Swir1).unwrap();
    assert!(swir1.magnitude.unwrap() > 0.99);
    let red = detections[0].band(Band::Red).unwrap();
    assert!(red.magnitude.unwrap() < 0.99);
    assert_relative_eq!(red.rmse, 0.0, epsilon = 1e-6);
    assert_relative_eq!(red.coefficients[2], 30.0, epsilon = 1e-4);
    assert!(detections[1].bands.iter().all(|b| b.magnitude.is_none()));
}

#[test]
fn test_cloudy_observations_are_filtered() {
    let pixel = disturbed_pixel();
    let cloudy = with_clouds(&pixel, &[5, 15, 30, 40, 45]);
    assert_eq!(cloudy.len(), 55);

    let clean = detect(&pixel, &ols_config()).unwrap();
    let filtered = detect(&cloudy, &ols_config()).unwrap();

    assert_eq!(filtered, clean);
}

#[test]
fn test_unfiltered_clouds_disturb_detection() {
    let cloudy = with_clouds(&disturbed_pixel(), &[5, 15, 30, 40, 45]);
    let config = ols_config()
        .with_preprocess(false)
        .with_prefilter_outliers(false);

    let clean = detect(&disturbed_pixel(), &ols_config()).unwrap();
    let detections = detect(&cloudy, &config).unwrap();

    assert_ne!(detections, clean);
}

#[test]
fn test_default_config_keeps_stable_pixel_whole() {
    let mut pixel = disturbed_pixel();
    pixel.swir1 = seasonal(&pixel.dates, 1500.0, 60.0);

    let detections = detect(&pixel, &CcdConfig::default()).unwrap();

    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].start_day, pixel.dates[0]);
    assert!(detections[0].observation_count > 45);
}

#[test]
fn test_lasso_pixel_detects_segments() {
    let config = CcdConfig::default().with_fitter(FitterKind::lasso(0.1));
    let detections = detect(&disturbed_pixel(), &config).unwrap();

    assert!(!detections.is_empty());
    assert!(detections.iter().all(|d| d.bands.len() == 6));
}

#[test]
fn test_detections_serialize() {
    let detections = detect(&disturbed_pixel(), &ols_config()).unwrap();
    let json = serde_json::to_value(&detections).unwrap();

    assert_eq!(json[0]["start_day"], 730_120);
    assert_eq!(json[0]["bands"][4]["band"], "swir1");
    assert!(json[1]["bands"][0]["magnitude"].is_null());
}

#[test]
fn test_table_lists_every_band() {
    let detections = detect(&disturbed_pixel(), &ols_config()).unwrap();
    let table = results_to_table(&detections);

    assert!(table.contains("Time Segment 0: 730120..."));
    assert!(table.contains("Time Segment 1: "));
    for band in Band::SPECTRAL {
        assert_eq!(
            table.lines().filter(|line| line.starts_with(band.name())).count(),
            2
        );
    }
}

#[test]
fn test_batch_matches_single_pixels() {
    let pixels = vec![disturbed_pixel(), with_clouds(&disturbed_pixel(), &[3, 33])];
    let config = ols_config();

    let batch = detect_batch(&pixels, &config).unwrap();

    assert_eq!(batch.len(), 2);
    for (pixel, detections) in pixels.iter().zip(&batch) {
        assert_eq!(&detect(pixel, &config).unwrap(), detections);
    }
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let config = ols_config().with_detection(DetectionParameters::default().with_window_size(0));
    assert!(detect(&disturbed_pixel(), &config).is_err());

    let mut pixel = disturbed_pixel();
    pixel.qa.pop();
    assert!(detect(&pixel, &ols_config()).is_err());
}

#[test]
fn test_non_finite_reflectance_is_invalid_input() {
    let mut pixel = disturbed_pixel();
    pixel.nir[10] = f64::NAN;
    let config = ols_config().with_preprocess(false);

    let result = detect(&pixel, &config);
    assert!(matches!(result, Err(ccd::Error::InvalidInput(_))));

    let without_mask = config.with_prefilter_outliers(false);
    assert!(matches!(detect(&pixel, &without_mask), Err(ccd::Error::InvalidInput(_))));
}

#[test]
fn test_sample_file_round_trip() -> anyhow::Result<()> {
    let pixel = disturbed_pixel();
    let path = std::env::temp_dir().join(format!("ccd-sample-{}.csv", std::process::id()));

    let mut contents = String::new();
    for i in 0..pixel.len() {
        contents.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            pixel.dates[i],
            pixel.red[i],
            pixel.green[i],
            pixel.blue[i],
            pixel.nir[i],
            pixel.swir1[i],
            pixel.swir2[i],
            pixel.thermal[i],
            pixel.qa[i]
        ));
    }
    std::fs::write(&path, contents)?;

    let loaded = read_sample(&path)?;
    std::fs::remove_file(&path)?;

    assert_eq!(loaded, pixel);
    assert_eq!(detect(&loaded, &ols_config())?.len(), 2);
    Ok(())
}
