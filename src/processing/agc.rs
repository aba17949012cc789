// src/processing/agc.rs
//! Sliding-window RMS automatic gain control

/// Guard added to the window RMS so silent stretches divide cleanly
pub const AGC_EPSILON: f64 = 1e-10;

/// Default AGC window length in milliseconds
pub const DEFAULT_AGC_WINDOW_MS: f32 = 500.0;

/// AGC on/off switch plus window length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgcSettings {
    pub enabled: bool,
    pub window_ms: f32,
}

impl AgcSettings {
    pub fn enabled(window_ms: f32) -> Self {
        AgcSettings {
            enabled: true,
            window_ms,
        }
    }

    pub fn disabled() -> Self {
        AgcSettings::default()
    }
}

impl Default for AgcSettings {
    fn default() -> Self {
        AgcSettings {
            enabled: false,
            window_ms: DEFAULT_AGC_WINDOW_MS,
        }
    }
}

/// Window length in samples: `round(window_ms / sample_interval_ms)`, at least 1
pub fn window_samples(sample_interval_ms: f32, window_ms: f32) -> usize {
    let ratio = (window_ms / sample_interval_ms).round();
    // NaN casts to 0, infinity saturates
    (ratio as usize).max(1)
}

/// Apply AGC to one trace, returning a new buffer of the same length
///
/// # Example
///
/// ```
/// use segy_rs::processing::apply_agc;
///
/// let trace = vec![2.0f32; 50];
/// let out = apply_agc(&trace, 4.0, 40.0);
/// assert!(out.iter().all(|&x| (x - 1.0).abs() < 1e-6));
/// ```
pub fn apply_agc(trace: &[f32], sample_interval_ms: f32, window_ms: f32) -> Vec<f32> {
    let mut out = vec![0.0f32; trace.len()];
    apply_agc_into(trace, sample_interval_ms, window_ms, &mut out);
    out
}

/// Apply AGC to `trace`, writing into `out`.
///
/// Each output sample is the input divided by the RMS of the centered
/// window `[i - H, i + H]` (H = half the window length), with the window
/// clipped at the trace ends. The sum of squares is kept as a running
/// total, so the cost is linear in the trace length whatever the window.
///
/// NaN and infinite samples add no energy to the window. Their own output
/// stays non-finite; neighbouring outputs are unaffected.
pub fn apply_agc_into(trace: &[f32], sample_interval_ms: f32, window_ms: f32, out: &mut [f32]) {
    debug_assert_eq!(trace.len(), out.len(), "AGC output must match input length");

    let n = trace.len().min(out.len());
    if n == 0 {
        return;
    }

    let half = (window_samples(sample_interval_ms, window_ms) / 2).min(n);

    let mut energy = WindowEnergy::default();
    for &x in &trace[..half] {
        energy.add(x);
    }

    for i in 0..n {
        if i + half < n {
            energy.add(trace[i + half]);
        }
        if i > half {
            energy.remove(trace[i - half - 1]);
        }

        let start = i.saturating_sub(half);
        let end = (i + half).min(n - 1);
        let count = (end - start + 1) as f64;

        let rms = (energy.total() / count).sqrt();
        out[i] = (trace[i] as f64 / (rms + AGC_EPSILON)) as f32;
    }
}

/// Running sum of squares with Neumaier compensation.
///
/// A single large sample swamps the small squares added beside it; the
/// compensation term keeps them, so the total is still right once the
/// large sample has left the window.
#[derive(Debug, Default)]
struct WindowEnergy {
    sum: f64,
    compensation: f64,
}

impl WindowEnergy {
    #[inline]
    fn square(x: f32) -> f64 {
        if x.is_finite() {
            let x = x as f64;
            x * x
        } else {
            0.0
        }
    }

    #[inline]
    fn add(&mut self, x: f32) {
        self.accumulate(Self::square(x));
    }

    #[inline]
    fn remove(&mut self, x: f32) {
        self.accumulate(-Self::square(x));
    }

    #[inline]
    fn accumulate(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    #[inline]
    fn total(&self) -> f64 {
        (self.sum + self.compensation).max(0.0)
    }
}
