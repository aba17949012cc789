// src/reader/sync_reader.rs
use crate::dataset::SegyDataset;
use crate::error::{Result, SegyError};
use crate::file::SegyFile;
use crate::header::{BinaryHeader, TextHeader, TraceHeader, FILE_HEADER_SIZE};
use crate::raw_data::SampleCodec;
use crate::reader::streaming::TraceStream;
use crate::types::SampleFormat;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

#[cfg(feature = "mmap")]
use memmap2::Mmap;

/// Capacity of the buffered reader used by [`SegyReader::open`]
pub const READ_BUFFER_SIZE: usize = 65536;

/// What a parse found beyond the decoded file itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseSummary {
    pub format: SampleFormat,
    /// Traces actually decoded
    pub traces: usize,
    /// Traces the input length could hold
    pub estimated_traces: usize,
    /// Bytes of a partial record left after the last full trace
    pub trailing_bytes: usize,
}

impl ParseSummary {
    pub fn is_truncated(&self) -> bool {
        self.trailing_bytes > 0
    }
}

/// Synchronous SEG-Y reader.
///
/// Parsing is a single forward pass: file headers, then fixed-size trace
/// records until the input runs out. A partial record at the tail ends the
/// pass without failing it.
///
/// # Example
///
/// ```no_run
/// use segy_rs::SegyReader;
///
/// let reader = SegyReader::open("line_001.sgy").unwrap();
/// println!("{} traces", reader.file().dataset.num_traces());
///
/// let file = reader.into_file();
/// let first = file.dataset.trace(0);
/// ```
#[derive(Debug, Clone)]
pub struct SegyReader {
    file: SegyFile,
    summary: ParseSummary,
}

impl SegyReader {
    /// Parse a complete file held in memory
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < FILE_HEADER_SIZE {
            return Err(SegyError::MalformedHeader(format!(
                "file is {} bytes, shorter than the {} byte file header",
                bytes.len(),
                FILE_HEADER_SIZE
            )));
        }

        let text_header = TextHeader::decode(&bytes[..TextHeader::SIZE])?;
        let binary_header = BinaryHeader::decode(&bytes[BinaryHeader::FILE_OFFSET..FILE_HEADER_SIZE])?;
        let layout = TraceLayout::from_header(&binary_header)?;

        let records = bytes[FILE_HEADER_SIZE..].chunks_exact(layout.record_size);
        let trailing_bytes = records.remainder().len();
        let estimated_traces = records.len();

        let mut dataset = SegyDataset::with_capacity(layout.samples_per_trace, estimated_traces)?;
        for record in records {
            layout.decode_record(record, &mut dataset)?;
        }

        let summary = ParseSummary {
            format: layout.format,
            traces: dataset.num_traces(),
            estimated_traces,
            trailing_bytes,
        };
        Self::finish(text_header, binary_header, dataset, summary)
    }

    /// Open and parse a file through a buffered reader
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let file_len = file.metadata()?.len() as usize;
        let mut stream = TraceStream::new(BufReader::with_capacity(READ_BUFFER_SIZE, file))?;

        let estimated_traces = file_len.saturating_sub(FILE_HEADER_SIZE) / stream.record_size();
        let mut dataset = SegyDataset::with_capacity(stream.samples_per_trace(), estimated_traces)?;
        while stream.read_into(&mut dataset)? {}

        let summary = ParseSummary {
            format: stream.format(),
            traces: dataset.num_traces(),
            estimated_traces,
            trailing_bytes: stream.trailing_bytes(),
        };
        let (text_header, binary_header) = stream.into_headers();
        Self::finish(text_header, binary_header, dataset, summary)
    }

    /// Open and parse a memory-mapped file (requires the "mmap" feature)
    #[cfg(feature = "mmap")]
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        // SAFETY: the file must not be truncated or modified by another process
        // while mapped. The map is only borrowed by `parse` and dropped on return.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::parse(&mmap[..])
    }

    fn finish(
        text_header: TextHeader,
        binary_header: BinaryHeader,
        mut dataset: SegyDataset,
        summary: ParseSummary,
    ) -> Result<Self> {
        if summary.is_truncated() {
            warn!(
                traces = summary.traces,
                trailing_bytes = summary.trailing_bytes,
                "ignoring partial trace record at end of file"
            );
            dataset.shrink_to_fit();
        }

        debug!(
            traces = summary.traces,
            samples_per_trace = dataset.samples_per_trace(),
            format = summary.format.name(),
            "parsed SEG-Y file"
        );

        Ok(SegyReader {
            file: SegyFile::from_parts(text_header, binary_header, dataset),
            summary,
        })
    }

    pub fn file(&self) -> &SegyFile {
        &self.file
    }

    pub fn summary(&self) -> &ParseSummary {
        &self.summary
    }

    pub fn into_file(self) -> SegyFile {
        self.file
    }

    pub fn into_parts(self) -> (SegyFile, ParseSummary) {
        (self.file, self.summary)
    }
}

/// Record geometry derived from a binary header
#[derive(Debug, Clone, Copy)]
pub(crate) struct TraceLayout {
    pub format: SampleFormat,
    pub samples_per_trace: usize,
    pub record_size: usize,
}

impl TraceLayout {
    /// Fails on an unknown format or a non-positive trace length
    pub fn from_header(header: &BinaryHeader) -> Result<Self> {
        let format = header.sample_format()?;
        let samples_per_trace = header.checked_samples_per_trace()?;
        Ok(TraceLayout {
            format,
            samples_per_trace,
            record_size: TraceHeader::SIZE + samples_per_trace * format.bytes_per_sample(),
        })
    }

    /// Decode one full record and append it to `dataset`
    pub fn decode_record(&self, record: &[u8], dataset: &mut SegyDataset) -> Result<()> {
        debug_assert_eq!(record.len(), self.record_size);
        let (header_bytes, sample_bytes) = record.split_at(TraceHeader::SIZE);
        let header = TraceHeader::decode(header_bytes)?;
        let slot = dataset.push_trace_slot(header);
        SampleCodec::decode_trace(self.format, sample_bytes, slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::SegyWriter;

    fn sample_file(traces: usize, spt: usize, format: SampleFormat) -> SegyFile {
        let mut binary = BinaryHeader::default();
        binary.sample_interval = 2000;
        binary.samples_per_trace = spt as i16;
        binary.set_sample_format(format);

        let mut dataset = SegyDataset::new(spt).unwrap();
        for t in 0..traces {
            let mut header = TraceHeader::default();
            header.trace_sequence_line = t as i32 + 1;
            let samples: Vec<f32> = (0..spt).map(|s| (s as f32) - (t as f32)).collect();
            dataset.push_trace(header, &samples).unwrap();
        }
        SegyFile::from_parts(TextHeader::new("C 1 TEST"), binary, dataset)
    }

    #[test]
    fn test_too_short() {
        let err = SegyReader::parse(&[0u8; 3599]).unwrap_err();
        assert!(matches!(err, SegyError::MalformedHeader(_)));
    }

    #[test]
    fn test_headers_only() {
        let bytes = SegyWriter::to_bytes(&sample_file(0, 8, SampleFormat::Int16)).unwrap();
        assert_eq!(bytes.len(), FILE_HEADER_SIZE);

        let reader = SegyReader::parse(&bytes).unwrap();
        assert!(reader.file().dataset.is_empty());
        assert_eq!(reader.summary().estimated_traces, 0);
        assert!(!reader.summary().is_truncated());
    }

    #[test]
    fn test_summary_counts() {
        let bytes = SegyWriter::to_bytes(&sample_file(4, 10, SampleFormat::Int16)).unwrap();
        let cut = bytes.len() - 7;
        let reader = SegyReader::parse(&bytes[..cut]).unwrap();

        let summary = *reader.summary();
        assert_eq!(summary.format, SampleFormat::Int16);
        assert_eq!(summary.traces, 3);
        assert_eq!(summary.estimated_traces, 3);
        assert_eq!(summary.trailing_bytes, 240 + 20 - 7);
        assert!(summary.is_truncated());
    }

    #[test]
    fn test_ieee_roundtrip_is_exact() {
        let source = crate::test_helpers::sine_file(6, 32, SampleFormat::IeeeFloat);
        let bytes = SegyWriter::to_bytes(&source).unwrap();
        let parsed = SegyReader::parse(&bytes).unwrap().into_file();

        assert_eq!(parsed, source);
        assert_eq!(SegyWriter::to_bytes(&parsed).unwrap(), bytes);
    }

    #[test]
    fn test_zero_samples_per_trace() {
        let mut bytes = SegyWriter::to_bytes(&sample_file(1, 4, SampleFormat::IeeeFloat))
            .unwrap()
            .to_vec();
        bytes[3220] = 0;
        bytes[3221] = 0;
        assert!(matches!(
            SegyReader::parse(&bytes),
            Err(SegyError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_layout() {
        let mut header = BinaryHeader::default();
        header.samples_per_trace = 100;
        header.sample_format = 8;
        let layout = TraceLayout::from_header(&header).unwrap();
        assert_eq!(layout.record_size, 340);

        header.sample_format = 4;
        assert!(matches!(
            TraceLayout::from_header(&header),
            Err(SegyError::UnsupportedSampleFormat(4))
        ));
    }
}
