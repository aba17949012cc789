// src/dataset.rs
use crate::error::{Result, SegyError};
use crate::header::TraceHeader;
use crate::types::TraceAxisKey;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// All traces of a file: one header per trace plus a single flat sample buffer.
///
/// Samples are stored trace-major, so trace `i` occupies
/// `samples[i * samples_per_trace..(i + 1) * samples_per_trace]`. The buffer
/// length is always exactly `num_traces() * samples_per_trace()`.
///
/// # Example
///
/// ```
/// use segy_rs::{SegyDataset, TraceHeader};
///
/// let mut dataset = SegyDataset::new(3).unwrap();
/// dataset.push_trace(TraceHeader::default(), &[1.0, 2.0, 3.0]).unwrap();
/// dataset.push_trace(TraceHeader::default(), &[4.0, 5.0, 6.0]).unwrap();
///
/// assert_eq!(dataset.num_traces(), 2);
/// assert_eq!(dataset.trace(1), Some(&[4.0, 5.0, 6.0][..]));
/// ```
#[derive(Debug, Clone)]
pub struct SegyDataset {
    samples_per_trace: usize,
    headers: Vec<TraceHeader>,
    samples: Vec<f32>,
    revision: u64,
}

impl SegyDataset {
    /// Create an empty dataset with a fixed trace length
    pub fn new(samples_per_trace: usize) -> Result<Self> {
        Self::with_capacity(samples_per_trace, 0)
    }

    /// Create an empty dataset with room for `traces` traces
    pub fn with_capacity(samples_per_trace: usize, traces: usize) -> Result<Self> {
        if samples_per_trace == 0 {
            return Err(SegyError::MalformedHeader(
                "samples per trace must be positive".to_string(),
            ));
        }

        Ok(SegyDataset {
            samples_per_trace,
            headers: Vec::with_capacity(traces),
            samples: Vec::with_capacity(traces.saturating_mul(samples_per_trace)),
            revision: next_revision(),
        })
    }

    /// Assemble from parts, checking the buffer-length invariant
    pub fn from_parts(
        samples_per_trace: usize,
        headers: Vec<TraceHeader>,
        samples: Vec<f32>,
    ) -> Result<Self> {
        if samples_per_trace == 0 {
            return Err(SegyError::MalformedHeader(
                "samples per trace must be positive".to_string(),
            ));
        }

        let expected = headers.len() * samples_per_trace;
        if samples.len() != expected {
            return Err(SegyError::LayoutMismatch {
                expected,
                found: samples.len(),
            });
        }

        Ok(SegyDataset {
            samples_per_trace,
            headers,
            samples,
            revision: next_revision(),
        })
    }

    /// Split into `(samples_per_trace, headers, samples)`
    pub fn into_parts(self) -> (usize, Vec<TraceHeader>, Vec<f32>) {
        (self.samples_per_trace, self.headers, self.samples)
    }

    pub fn samples_per_trace(&self) -> usize {
        self.samples_per_trace
    }

    pub fn num_traces(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Content version: a process-wide unique value, renewed by every
    /// mutable access to headers or samples. Clones share it until either
    /// side is mutated.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Append one trace; `samples` must hold exactly `samples_per_trace` values
    pub fn push_trace(&mut self, header: TraceHeader, samples: &[f32]) -> Result<()> {
        if samples.len() != self.samples_per_trace {
            return Err(SegyError::LayoutMismatch {
                expected: self.samples_per_trace,
                found: samples.len(),
            });
        }

        self.headers.push(header);
        self.samples.extend_from_slice(samples);
        self.touch();
        Ok(())
    }

    /// Append one trace and hand back its zeroed sample slot for in-place decoding
    pub(crate) fn push_trace_slot(&mut self, header: TraceHeader) -> &mut [f32] {
        let start = self.samples.len();
        self.headers.push(header);
        self.samples.resize(start + self.samples_per_trace, 0.0);
        self.touch();
        &mut self.samples[start..]
    }

    pub fn trace(&self, index: usize) -> Option<&[f32]> {
        let range = self.trace_span(index)?;
        Some(&self.samples[range])
    }

    pub fn trace_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        let range = self.trace_span(index)?;
        self.touch();
        Some(&mut self.samples[range])
    }

    pub fn header(&self, index: usize) -> Option<&TraceHeader> {
        self.headers.get(index)
    }

    pub fn header_mut(&mut self, index: usize) -> Option<&mut TraceHeader> {
        if index >= self.headers.len() {
            return None;
        }
        self.touch();
        self.headers.get_mut(index)
    }

    pub fn headers(&self) -> &[TraceHeader] {
        &self.headers
    }

    /// The whole flat sample buffer
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// The sample buffer as native-endian bytes, for zero-copy upload
    pub fn samples_as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.samples)
    }

    /// Iterate `(header, samples)` pairs in file order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&TraceHeader, &[f32])> + '_ {
        self.headers
            .iter()
            .zip(self.samples.chunks_exact(self.samples_per_trace))
    }

    /// Per-trace axis labels for an external section display
    pub fn axis_values(&self, key: TraceAxisKey) -> Vec<i64> {
        match key.header_field() {
            None => (1..=self.headers.len() as i64).collect(),
            Some(field) => self
                .headers
                .iter()
                .map(|h| h.get(field).unwrap_or_default())
                .collect(),
        }
    }

    /// Change the trace length, truncating or zero-padding every trace
    pub fn resize_traces(&mut self, samples_per_trace: usize) -> Result<()> {
        if samples_per_trace == 0 {
            return Err(SegyError::MalformedHeader(
                "samples per trace must be positive".to_string(),
            ));
        }
        if samples_per_trace == self.samples_per_trace {
            return Ok(());
        }

        let mut resized = Vec::with_capacity(self.headers.len() * samples_per_trace);
        for trace in self.samples.chunks_exact(self.samples_per_trace) {
            let keep = trace.len().min(samples_per_trace);
            resized.extend_from_slice(&trace[..keep]);
            resized.resize(resized.len() + samples_per_trace - keep, 0.0);
        }

        self.samples = resized;
        self.samples_per_trace = samples_per_trace;
        self.touch();
        Ok(())
    }

    /// Drop trailing traces beyond `num_traces`
    pub fn truncate(&mut self, num_traces: usize) {
        if num_traces >= self.headers.len() {
            return;
        }
        self.headers.truncate(num_traces);
        self.samples.truncate(num_traces * self.samples_per_trace);
        self.touch();
    }

    /// Release spare capacity left over from an over-estimated allocation
    pub fn shrink_to_fit(&mut self) {
        self.headers.shrink_to_fit();
        self.samples.shrink_to_fit();
    }

    fn trace_span(&self, index: usize) -> Option<std::ops::Range<usize>> {
        if index >= self.headers.len() {
            return None;
        }
        let start = index * self.samples_per_trace;
        Some(start..start + self.samples_per_trace)
    }

    #[inline]
    fn touch(&mut self) {
        self.revision = next_revision();
    }
}

// revision is bookkeeping, not content
impl PartialEq for SegyDataset {
    fn eq(&self, other: &Self) -> bool {
        self.samples_per_trace == other.samples_per_trace
            && self.headers == other.headers
            && self.samples == other.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_with_cdp(cdp: i32) -> TraceHeader {
        let mut header = TraceHeader::default();
        header.cdp = cdp;
        header.inline_number = cdp * 10;
        header
    }

    fn build(traces: usize, spt: usize) -> SegyDataset {
        let mut dataset = SegyDataset::new(spt).unwrap();
        for t in 0..traces {
            let samples: Vec<f32> = (0..spt).map(|s| (t * 100 + s) as f32).collect();
            dataset.push_trace(header_with_cdp(t as i32 + 1), &samples).unwrap();
        }
        dataset
    }

    #[test]
    fn test_zero_trace_length_rejected() {
        assert!(SegyDataset::new(0).is_err());
    }

    #[test]
    fn test_layout() {
        let dataset = build(3, 4);
        assert_eq!(dataset.num_traces(), 3);
        assert_eq!(dataset.samples().len(), 12);
        assert_eq!(dataset.trace(2), Some(&[200.0, 201.0, 202.0, 203.0][..]));
        assert_eq!(dataset.trace(3), None);
        assert_eq!(dataset.samples_as_bytes().len(), 48);
    }

    #[test]
    fn test_push_wrong_length() {
        let mut dataset = SegyDataset::new(4).unwrap();
        let err = dataset.push_trace(TraceHeader::default(), &[1.0]).unwrap_err();
        assert!(matches!(err, SegyError::LayoutMismatch { expected: 4, found: 1 }));
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_from_parts_checks_length() {
        let headers = vec![TraceHeader::default(); 2];
        assert!(SegyDataset::from_parts(3, headers.clone(), vec![0.0; 6]).is_ok());
        assert!(matches!(
            SegyDataset::from_parts(3, headers, vec![0.0; 5]),
            Err(SegyError::LayoutMismatch { expected: 6, found: 5 })
        ));
    }

    #[test]
    fn test_revision_tracks_mutation() {
        let mut dataset = build(2, 2);
        let before = dataset.revision();

        let _ = dataset.trace(0);
        assert_eq!(dataset.revision(), before);

        dataset.trace_mut(0).unwrap()[0] = 9.0;
        assert!(dataset.revision() > before);

        let mid = dataset.revision();
        dataset.header_mut(1).unwrap().cdp = 7;
        assert!(dataset.revision() > mid);

        assert!(dataset.header_mut(5).is_none());
    }

    #[test]
    fn test_revisions_unique_across_datasets() {
        let a = SegyDataset::new(1).unwrap();
        let b = SegyDataset::new(1).unwrap();
        assert_ne!(a.revision(), b.revision());
        assert_eq!(a.clone().revision(), a.revision());
    }

    #[test]
    fn test_resize_traces() {
        let mut dataset = build(2, 3);

        dataset.resize_traces(2).unwrap();
        assert_eq!(dataset.samples(), &[0.0, 1.0, 100.0, 101.0]);

        dataset.resize_traces(4).unwrap();
        assert_eq!(dataset.samples_per_trace(), 4);
        assert_eq!(dataset.trace(1), Some(&[100.0, 101.0, 0.0, 0.0][..]));
        assert!(dataset.resize_traces(0).is_err());
    }

    #[test]
    fn test_truncate() {
        let mut dataset = build(5, 2);
        dataset.truncate(3);
        assert_eq!(dataset.num_traces(), 3);
        assert_eq!(dataset.samples().len(), 6);
    }

    #[test]
    fn test_axis_values() {
        let dataset = build(3, 1);
        assert_eq!(dataset.axis_values(TraceAxisKey::TraceIndex), vec![1, 2, 3]);
        assert_eq!(dataset.axis_values(TraceAxisKey::Cdp), vec![1, 2, 3]);
        assert_eq!(dataset.axis_values(TraceAxisKey::Inline), vec![10, 20, 30]);
        assert_eq!(dataset.axis_values(TraceAxisKey::Crossline), vec![0, 0, 0]);
    }

    #[test]
    fn test_iter_pairs() {
        let dataset = build(2, 2);
        let cdps: Vec<i32> = dataset.iter().map(|(h, _)| h.cdp).collect();
        assert_eq!(cdps, vec![1, 2]);
        let last = dataset.iter().last().unwrap().1;
        assert_eq!(last, &[100.0, 101.0]);
    }
}
