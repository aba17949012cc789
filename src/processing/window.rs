// src/processing/window.rs
use crate::dataset::SegyDataset;
use crate::error::{Result, SegyError};
use crate::file::SegyFile;
use crate::processing::agc::{apply_agc_into, AgcSettings};
use smallvec::SmallVec;
use std::ops::Range;
use tracing::trace;

/// Window cache sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCacheConfig {
    /// Processed windows kept at once; the oldest is evicted first
    pub capacity: usize,
    /// Extra traces computed on each side of a missed request, so small
    /// scrolls land inside the cached window
    pub margin: usize,
}

impl Default for WindowCacheConfig {
    fn default() -> Self {
        WindowCacheConfig {
            capacity: 4,
            margin: 0,
        }
    }
}

/// A run of traces in display order, plus the processing to apply
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRequest {
    /// Display positions; with `reverse` set, position `t` shows trace `n - 1 - t`
    pub range: Range<usize>,
    pub agc: AgcSettings,
    pub reverse: bool,
}

impl WindowRequest {
    pub fn new(range: Range<usize>) -> Self {
        WindowRequest {
            range,
            agc: AgcSettings::default(),
            reverse: false,
        }
    }

    pub fn with_agc(mut self, agc: AgcSettings) -> Self {
        self.agc = agc;
        self
    }

    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }
}

/// Traces of one window, indexed from the start of the requested range
#[derive(Debug, Clone)]
pub enum TraceWindow<'a> {
    /// Views straight into the dataset buffer
    Raw {
        dataset: &'a SegyDataset,
        range: Range<usize>,
        reverse: bool,
    },
    /// AGC output held by the cache, already in display order
    Processed {
        samples: &'a [f32],
        samples_per_trace: usize,
        range: Range<usize>,
    },
}

impl<'a> TraceWindow<'a> {
    /// Display positions covered by this window
    pub fn range(&self) -> Range<usize> {
        match self {
            TraceWindow::Raw { range, .. } | TraceWindow::Processed { range, .. } => range.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.range().len()
    }

    pub fn is_empty(&self) -> bool {
        self.range().is_empty()
    }

    pub fn is_processed(&self) -> bool {
        matches!(self, TraceWindow::Processed { .. })
    }

    /// Samples of the `i`-th trace of the window
    pub fn trace(&self, i: usize) -> Option<&'a [f32]> {
        if i >= self.len() {
            return None;
        }

        match *self {
            TraceWindow::Raw {
                dataset,
                ref range,
                reverse,
            } => dataset.trace(source_index(range.start + i, dataset.num_traces(), reverse)),
            TraceWindow::Processed {
                samples,
                samples_per_trace,
                ..
            } => samples.get(i * samples_per_trace..(i + 1) * samples_per_trace),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a [f32]> + '_ {
        (0..self.len()).filter_map(move |i| self.trace(i))
    }
}

/// Dataset trace shown at display position `display`
#[inline]
fn source_index(display: usize, num_traces: usize, reverse: bool) -> usize {
    if reverse {
        num_traces - 1 - display
    } else {
        display
    }
}

/// Everything besides the range that a cached window depends on.
///
/// Floats are compared by bit pattern, so equality is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheTag {
    window_ms_bits: u32,
    reverse: bool,
    sample_interval_bits: u32,
    revision: u64,
}

struct CacheEntry {
    tag: CacheTag,
    start: usize,
    count: usize,
    samples: Vec<f32>,
}

impl CacheEntry {
    fn contains(&self, range: &Range<usize>) -> bool {
        self.start <= range.start && range.end <= self.start + self.count
    }
}

/// Bounded cache of AGC-processed trace windows
///
/// A lookup hits when an entry was computed with exactly the same window
/// length, ordering, sample interval and dataset revision, and its range
/// covers the requested one. A miss processes only the requested traces
/// (plus the configured margin), never the whole dataset. With AGC off
/// the raw samples are returned without touching the cache.
///
/// # Example
///
/// ```
/// use segy_rs::processing::{AgcSettings, WindowCache, WindowRequest};
/// use segy_rs::{SegyDataset, TraceHeader};
///
/// let mut dataset = SegyDataset::new(4).unwrap();
/// for _ in 0..10 {
///     dataset.push_trace(TraceHeader::default(), &[1.0, -2.0, 3.0, -4.0]).unwrap();
/// }
///
/// let mut cache = WindowCache::default();
/// let request = WindowRequest::new(2..5).with_agc(AgcSettings::enabled(8.0));
///
/// let window = cache.processed_window(&dataset, 4.0, &request).unwrap();
/// assert_eq!(window.len(), 3);
///
/// cache.processed_window(&dataset, 4.0, &request).unwrap();
/// assert_eq!(cache.recompute_count(), 1);
/// ```
pub struct WindowCache {
    config: WindowCacheConfig,
    entries: SmallVec<[CacheEntry; 4]>,
    recomputes: u64,
}

impl WindowCache {
    pub fn new(config: WindowCacheConfig) -> Self {
        WindowCache {
            config,
            entries: SmallVec::new(),
            recomputes: 0,
        }
    }

    pub fn config(&self) -> &WindowCacheConfig {
        &self.config
    }

    /// Number of windows processed since creation
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Windows currently held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Window of `file`, using its binary header's sample interval
    pub fn file_window<'a>(&'a mut self, file: &'a SegyFile, request: &WindowRequest) -> Result<TraceWindow<'a>> {
        let interval = file.binary_header.sample_interval_ms();
        self.processed_window(&file.dataset, interval, request)
    }

    /// Traces of `request.range`, processed as requested
    pub fn processed_window<'a>(
        &'a mut self,
        dataset: &'a SegyDataset,
        sample_interval_ms: f32,
        request: &WindowRequest,
    ) -> Result<TraceWindow<'a>> {
        let num_traces = dataset.num_traces();
        let range = request.range.clone();
        if range.start > range.end || range.end > num_traces {
            return Err(SegyError::InvalidTraceRange {
                start: range.start,
                end: range.end,
                available: num_traces,
            });
        }

        if !request.agc.enabled {
            return Ok(TraceWindow::Raw {
                dataset,
                range,
                reverse: request.reverse,
            });
        }

        let tag = CacheTag {
            window_ms_bits: request.agc.window_ms.to_bits(),
            reverse: request.reverse,
            sample_interval_bits: sample_interval_ms.to_bits(),
            revision: dataset.revision(),
        };

        let hit = self
            .entries
            .iter()
            .position(|e| e.tag == tag && e.contains(&range));
        let index = match hit {
            Some(index) => {
                trace!(start = range.start, end = range.end, "window cache hit");
                index
            }
            None => self.recompute(dataset, sample_interval_ms, request, tag),
        };

        let entry = &self.entries[index];
        let spt = dataset.samples_per_trace();
        let offset = (range.start - entry.start) * spt;
        Ok(TraceWindow::Processed {
            samples: &entry.samples[offset..offset + range.len() * spt],
            samples_per_trace: spt,
            range,
        })
    }

    /// Process the requested range plus margin and store it; returns its index
    fn recompute(
        &mut self,
        dataset: &SegyDataset,
        sample_interval_ms: f32,
        request: &WindowRequest,
        tag: CacheTag,
    ) -> usize {
        let num_traces = dataset.num_traces();
        let spt = dataset.samples_per_trace();
        let start = request.range.start.saturating_sub(self.config.margin);
        let end = request.range.end.saturating_add(self.config.margin).min(num_traces);

        let mut samples = vec![0.0f32; (end - start) * spt];
        let raw = dataset.samples();
        for (display, out) in (start..end).zip(samples.chunks_exact_mut(spt)) {
            let source = source_index(display, num_traces, request.reverse) * spt;
            apply_agc_into(&raw[source..source + spt], sample_interval_ms, request.agc.window_ms, out);
        }

        trace!(start, end, window_ms = request.agc.window_ms, "window cache miss");

        // entries for older revisions can never hit again
        self.entries.retain(|e| e.tag.revision == tag.revision);
        while self.entries.len() >= self.config.capacity.max(1) {
            let evicted = self.entries.remove(0);
            trace!(start = evicted.start, count = evicted.count, "window cache eviction");
        }

        self.entries.push(CacheEntry {
            tag,
            start,
            count: end - start,
            samples,
        });
        self.recomputes += 1;
        self.entries.len() - 1
    }
}

impl Default for WindowCache {
    fn default() -> Self {
        Self::new(WindowCacheConfig::default())
    }
}
