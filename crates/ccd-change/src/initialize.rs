//! Stable initial window search

use crate::series::TimeSeries;
use crate::statistics::stable;
use crate::types::{Window, WindowResult};
use ccd_core::{DetectionParameters, Result};
use ccd_regression::Fitter;
use tracing::{debug, trace};

/// At least `window_size` observations remain from `start`
pub fn enough_samples(len: usize, start: usize, window_size: usize) -> bool {
    start + window_size <= len
}

/// The last observation is at least `min_span_days` after `times[start]`
pub fn enough_time(times: &[i64], start: usize, min_span_days: i64) -> bool {
    match (times.get(start), times.last()) {
        (Some(first), Some(last)) => last - first >= min_span_days,
        _ => false,
    }
}

/// First index at or after `start + window_size - 1` at least
/// `min_span_days` after `times[start]`
///
/// Returns `None` when the series ends before such an index.
pub fn find_time_index(
    times: &[i64],
    start: usize,
    window_size: usize,
    min_span_days: i64,
) -> Option<usize> {
    if !enough_time(times, start, min_span_days) {
        trace!(start, min_span_days, "not enough time after start");
        return None;
    }
    let first = start + window_size.saturating_sub(1);
    (first..times.len()).find(|&i| times[i] - times[start] >= min_span_days)
}

/// Search forward from `start` for a stable initial window
///
/// Each attempt takes the window `[start, end)` where `end` comes from
/// [`find_time_index`], fits one model per band and accepts the window when
/// every band's RMSE is below the stability threshold. Otherwise the start
/// slides forward by one observation and the span is searched again. When
/// the series runs out the result is [`WindowResult::InsufficientData`].
pub fn initialize<F: Fitter + ?Sized>(
    series: &TimeSeries<'_>,
    fitter: &F,
    start: usize,
    params: &DetectionParameters,
    adjusted_rmse: Option<&[f64]>,
) -> Result<WindowResult> {
    let times = series.times();
    let mut start = start;

    loop {
        if !enough_samples(series.len(), start, params.window_size) {
            debug!(start, "insufficient observations to initialize");
            return Ok(WindowResult::InsufficientData { start });
        }
        if !enough_time(times, start, params.min_span_days) {
            debug!(start, "insufficient time range to initialize");
            return Ok(WindowResult::InsufficientData { start });
        }

        let Some(end) = find_time_index(times, start, params.window_size, params.min_span_days)
        else {
            debug!(start, "no index spans the minimum time");
            return Ok(WindowResult::InsufficientData { start });
        };

        if let Some(thresholds) = adjusted_rmse {
            if !enough_after_screen(series, Window::new(start, end + 1), thresholds, params)? {
                debug!(start, end, "too few observations survive the outlier mask, sliding");
                start += 1;
                continue;
            }
        }

        let window = Window::new(start, end);
        let models = series.fit(fitter, window)?;
        let errors = series.rmse(&models, window)?;

        if stable(&errors, params.stability_threshold) {
            debug!(%window, ?errors, "stable initial window");
            return Ok(WindowResult::Found {
                window,
                models,
                errors,
            });
        }

        trace!(%window, ?errors, "unstable window, sliding start");
        start += 1;
    }
}

fn enough_after_screen(
    series: &TimeSeries<'_>,
    window: Window,
    thresholds: &[f64],
    params: &DetectionParameters,
) -> Result<bool> {
    let (times, observations) = series.slice(window);
    let masked = ccd_tmask::mask(&times, &observations, thresholds, &params.tmask_bands)?;
    let span = match (masked.times.first(), masked.times.last()) {
        (Some(first), Some(last)) => last - first,
        _ => return Ok(false),
    };
    Ok(masked.len() >= params.window_size && span >= params.min_span_days)
}
