//! Core constants for the viewport engine.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Smallest scale the wheel can reach by default (1%).
pub const DEFAULT_MIN_ZOOM: f64 = 0.01;

/// Largest scale the wheel can reach by default (5000%).
pub const DEFAULT_MAX_ZOOM: f64 = 50.0;

/// Fraction of the container the image may occupy after the initial fit.
pub const DEFAULT_FIT_PADDING_FRACTION: f64 = 0.9;

/// Scale multiplier for one wheel notch towards the user (zoom in).
pub const DEFAULT_ZOOM_STEP_FACTOR: f64 = 1.05;

/// Scale multiplier for one wheel notch away from the user (zoom out).
pub const DEFAULT_ZOOM_OUT_FACTOR: f64 = 0.95;

/// The initial fit never magnifies past natural size.
pub const DEFAULT_INITIAL_SCALE_CAP: f64 = 1.0;

/// Default interval between background image refreshes.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 1_000;

/// Transform at process start, before any image has loaded.
pub const INITIAL_SCALE: f64 = 1.0;
