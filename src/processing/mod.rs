// src/processing/mod.rs
//! Trace processing for display
//!
//! - [`apply_agc`] - sliding-window RMS gain control on one trace
//! - [`WindowCache`] - AGC results for runs of traces, recomputed only
//!   when the requested range or processing settings change

mod agc;
mod window;

pub use agc::{apply_agc, apply_agc_into, window_samples, AgcSettings, AGC_EPSILON, DEFAULT_AGC_WINDOW_MS};
pub use window::{TraceWindow, WindowCache, WindowCacheConfig, WindowRequest};
