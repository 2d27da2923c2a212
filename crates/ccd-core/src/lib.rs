//! Core types for continuous change detection
//!
//! This crate holds what every other ccd crate shares: the unified
//! [`Error`] type with its fatal [`FitError`] kind, the explicit
//! [`DetectionParameters`] passed into each detection call, and a few
//! slice helpers.
//!
//! # Example
//!
//! ```rust
//! use ccd_core::DetectionParameters;
//!
//! let params = DetectionParameters::default()
//!     .with_window_size(12)
//!     .with_peek_size(4);
//! assert!(params.validate().is_ok());
//! ```

pub mod error;
pub mod params;
pub mod utils;

pub use error::{Error, FitError, Result};
pub use params::{
    DetectionParameters, DEFAULT_ACCURACY_THRESHOLD, DEFAULT_MIN_SPAN_DAYS, DEFAULT_PEEK_SIZE,
    DEFAULT_STABILITY_THRESHOLD, DEFAULT_TMASK_BANDS, DEFAULT_T_CONST, DEFAULT_WINDOW_SIZE,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
