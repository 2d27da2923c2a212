//! Design matrix for the outlier mask

use ccd_regression::{ANNUAL_CYCLE, DAYS_PER_YEAR};
use nalgebra::DMatrix;

/// Angular frequency of a cycle spanning the whole series
///
/// The annual cycle is divided by the number of (started) years between
/// the first and last day. A single instant counts as one year.
pub fn observation_cycle(times: &[i64]) -> f64 {
    let years = match (times.first(), times.last()) {
        (Some(first), Some(last)) => ((last - first) as f64 / DAYS_PER_YEAR).ceil(),
        _ => 1.0,
    };
    ANNUAL_CYCLE / years.max(1.0)
}

/// Four-column design: annual cos/sin, then observation-cycle cos/sin
pub fn design_matrix(times: &[i64]) -> DMatrix<f64> {
    let observation = observation_cycle(times);
    DMatrix::from_fn(times.len(), 4, |row, col| {
        let t = times[row] as f64;
        match col {
            0 => (ANNUAL_CYCLE * t).cos(),
            1 => (ANNUAL_CYCLE * t).sin(),
            2 => (observation * t).cos(),
            _ => (observation * t).sin(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_observation_cycle_spans_series() {
        // 800 days rounds up to three years
        let cycle = observation_cycle(&[730_120, 730_920]);
        assert_relative_eq!(cycle, ANNUAL_CYCLE / 3.0);
    }

    #[test]
    fn test_short_series_match_annual_cycle() {
        assert_relative_eq!(observation_cycle(&[10, 200]), ANNUAL_CYCLE);
        assert_relative_eq!(observation_cycle(&[10]), ANNUAL_CYCLE);
        assert_relative_eq!(observation_cycle(&[]), ANNUAL_CYCLE);
    }

    #[test]
    fn test_design_columns() {
        let times = [730_120, 730_500, 731_000];
        let design = design_matrix(&times);
        let observation = observation_cycle(&times);

        assert_eq!(design.shape(), (3, 4));
        assert_relative_eq!(design[(1, 0)], (ANNUAL_CYCLE * 730_500.0).cos());
        assert_relative_eq!(design[(1, 1)], (ANNUAL_CYCLE * 730_500.0).sin());
        assert_relative_eq!(design[(2, 2)], (observation * 731_000.0).cos());
        assert_relative_eq!(design[(2, 3)], (observation * 731_000.0).sin());
    }
}
