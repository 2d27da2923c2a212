//! Types produced by window initialization, extension and detection

use ccd_regression::FittedModel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open index range `[start, end)` into a time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "window start {start} after end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The same start with `count` more observations at the end
    pub fn widened(&self, count: usize) -> Self {
        Self::new(self.start, self.end + count)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end)
    }
}

/// Outcome of window initialization
#[derive(Debug, Clone, PartialEq)]
pub enum WindowResult {
    /// A stable initial window with one model and one RMSE per band
    Found {
        window: Window,
        models: Vec<FittedModel>,
        errors: Vec<f64>,
    },
    /// Not enough samples or time remain after `start`
    InsufficientData { start: usize },
}

impl WindowResult {
    pub fn is_found(&self) -> bool {
        matches!(self, WindowResult::Found { .. })
    }

    /// Index the search stopped at
    pub fn start(&self) -> usize {
        match self {
            WindowResult::Found { window, .. } => window.start,
            WindowResult::InsufficientData { start } => *start,
        }
    }
}

impl fmt::Display for WindowResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowResult::Found { window, errors, .. } => {
                write!(f, "Found {{ window: {}, errors: {:.3?} }}", window, errors)
            }
            WindowResult::InsufficientData { start } => {
                write!(f, "InsufficientData {{ start: {} }}", start)
            }
        }
    }
}

/// One accepted extension step
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionStep {
    /// Cumulative window the step was tested and refitted on
    pub window: Window,
    /// Window end after the step
    pub end: usize,
    /// Models refitted over `window`
    pub models: Vec<FittedModel>,
    /// Magnitudes that accepted the step
    pub magnitudes: Vec<f64>,
}

/// Outcome of window extension
#[derive(Debug, Clone, PartialEq)]
pub struct Extension {
    /// Final window end
    pub end: usize,
    /// Models in force when extension stopped
    pub models: Vec<FittedModel>,
    /// Magnitudes last computed, absent when no step was attempted
    pub magnitudes: Option<Vec<f64>>,
    /// Accepted steps, recorded only when tracing extension
    pub steps: Vec<ExtensionStep>,
}

impl Extension {
    /// Whether any extension step was evaluated
    pub fn attempted(&self) -> bool {
        self.magnitudes.is_some()
    }
}

/// One detected temporal segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentResult {
    /// Ordinal day at `start_index`
    pub start_day: i64,
    /// Ordinal day at `end_index`
    pub end_day: i64,
    pub start_index: usize,
    pub end_index: usize,
    /// One model per band
    pub models: Vec<FittedModel>,
    /// Per-band RMSE of the initial window
    pub errors: Vec<f64>,
    /// Per-band magnitudes from the last extension test
    pub magnitudes: Option<Vec<f64>>,
}

impl SegmentResult {
    pub fn band_count(&self) -> usize {
        self.models.len()
    }

    /// Number of observations from start to end inclusive
    pub fn observation_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }
}

impl fmt::Display for SegmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Segment {{ days: {}..{}, index: {}..{}, bands: {}",
            self.start_day,
            self.end_day,
            self.start_index,
            self.end_index,
            self.band_count()
        )?;
        match &self.magnitudes {
            Some(magnitudes) => write!(f, ", magnitudes: {:.3?} }}", magnitudes),
            None => write!(f, " }}"),
        }
    }
}
