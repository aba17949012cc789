// src/reader/streaming.rs
use crate::dataset::SegyDataset;
use crate::error::{Result, SegyError};
use crate::header::{BinaryHeader, TextHeader, TraceHeader, FILE_HEADER_SIZE};
use crate::raw_data::SampleCodec;
use crate::reader::sync_reader::TraceLayout;
use crate::types::SampleFormat;
use std::io::{self, Read};
use tracing::warn;

/// Record-at-a-time SEG-Y decoder over any byte stream
///
/// The file headers are read eagerly; trace records are then decoded one
/// by one, so a file never has to be held in memory as a whole. A partial
/// record at the end of the stream ends iteration cleanly.
///
/// # Example
///
/// ```no_run
/// use segy_rs::reader::TraceStream;
/// use std::fs::File;
/// use std::io::BufReader;
///
/// let file = BufReader::new(File::open("line_001.sgy").unwrap());
/// let mut stream = TraceStream::new(file).unwrap();
///
/// while let Some((header, samples)) = stream.next_trace().unwrap() {
///     let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
///     println!("cdp {} peak {}", header.cdp, peak);
/// }
/// ```
pub struct TraceStream<R: Read> {
    reader: R,
    text_header: TextHeader,
    binary_header: BinaryHeader,
    layout: TraceLayout,
    record: Vec<u8>,
    traces_read: usize,
    trailing_bytes: usize,
    finished: bool,
}

impl<R: Read> TraceStream<R> {
    /// Read and validate the file headers
    pub fn new(mut reader: R) -> Result<Self> {
        let mut head = [0u8; FILE_HEADER_SIZE];
        let filled = read_full(&mut reader, &mut head)?;
        if filled < FILE_HEADER_SIZE {
            return Err(SegyError::MalformedHeader(format!(
                "stream ended after {} bytes, inside the {} byte file header",
                filled, FILE_HEADER_SIZE
            )));
        }

        let text_header = TextHeader::decode(&head[..TextHeader::SIZE])?;
        let binary_header = BinaryHeader::decode(&head[BinaryHeader::FILE_OFFSET..])?;
        let layout = TraceLayout::from_header(&binary_header)?;

        Ok(TraceStream {
            reader,
            text_header,
            binary_header,
            layout,
            record: vec![0u8; layout.record_size],
            traces_read: 0,
            trailing_bytes: 0,
            finished: false,
        })
    }

    pub fn text_header(&self) -> &TextHeader {
        &self.text_header
    }

    pub fn binary_header(&self) -> &BinaryHeader {
        &self.binary_header
    }

    pub fn format(&self) -> SampleFormat {
        self.layout.format
    }

    pub fn samples_per_trace(&self) -> usize {
        self.layout.samples_per_trace
    }

    /// Size of one trace record in bytes
    pub fn record_size(&self) -> usize {
        self.layout.record_size
    }

    pub fn traces_read(&self) -> usize {
        self.traces_read
    }

    /// Length of the partial record found at the end, if any
    pub fn trailing_bytes(&self) -> usize {
        self.trailing_bytes
    }

    /// Decode the next trace into `samples`, which must hold one trace
    ///
    /// Returns `None` once the stream is exhausted.
    pub fn read_trace(&mut self, samples: &mut [f32]) -> Result<Option<TraceHeader>> {
        if samples.len() != self.layout.samples_per_trace {
            return Err(SegyError::LayoutMismatch {
                expected: self.layout.samples_per_trace,
                found: samples.len(),
            });
        }
        if !self.fill_record()? {
            return Ok(None);
        }

        let (header_bytes, sample_bytes) = self.record.split_at(TraceHeader::SIZE);
        let header = TraceHeader::decode(header_bytes)?;
        SampleCodec::decode_trace(self.layout.format, sample_bytes, samples)?;
        Ok(Some(header))
    }

    /// Decode the next trace into freshly allocated storage
    pub fn next_trace(&mut self) -> Result<Option<(TraceHeader, Vec<f32>)>> {
        let mut samples = vec![0.0f32; self.layout.samples_per_trace];
        Ok(self
            .read_trace(&mut samples)?
            .map(|header| (header, samples)))
    }

    /// Append the next trace to `dataset`; false once the stream is exhausted
    pub fn read_into(&mut self, dataset: &mut SegyDataset) -> Result<bool> {
        if dataset.samples_per_trace() != self.layout.samples_per_trace {
            return Err(SegyError::LayoutMismatch {
                expected: self.layout.samples_per_trace,
                found: dataset.samples_per_trace(),
            });
        }
        if !self.fill_record()? {
            return Ok(false);
        }
        self.layout.decode_record(&self.record, dataset)?;
        Ok(true)
    }

    pub fn into_headers(self) -> (TextHeader, BinaryHeader) {
        (self.text_header, self.binary_header)
    }

    /// Fill the record buffer; false at end of stream or on a partial record
    fn fill_record(&mut self) -> Result<bool> {
        if self.finished {
            return Ok(false);
        }

        let filled = read_full(&mut self.reader, &mut self.record)?;
        if filled == self.record.len() {
            self.traces_read += 1;
            return Ok(true);
        }

        self.finished = true;
        if filled > 0 {
            self.trailing_bytes = filled;
            warn!(
                traces = self.traces_read,
                trailing_bytes = filled,
                "stream ended inside a trace record"
            );
        }
        Ok(false)
    }
}

impl<R: Read> Iterator for TraceStream<R> {
    type Item = Result<(TraceHeader, Vec<f32>)>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_trace() {
            Ok(Some(trace)) => Some(Ok(trace)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// `read_exact` that reports how much it got instead of failing at EOF
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::SegyFile;
    use crate::writer::SegyWriter;
    use std::io::Cursor;

    fn encoded(traces: usize) -> Vec<u8> {
        let mut binary = BinaryHeader::default();
        binary.sample_interval = 1000;
        binary.samples_per_trace = 3;
        binary.set_sample_format(SampleFormat::Int32);

        let mut dataset = SegyDataset::new(3).unwrap();
        for t in 0..traces {
            let mut header = TraceHeader::default();
            header.cdp = 100 + t as i32;
            dataset.push_trace(header, &[t as f32, 0.0, -(t as f32)]).unwrap();
        }
        let file = SegyFile::from_parts(TextHeader::default(), binary, dataset);
        SegyWriter::to_bytes(&file).unwrap().to_vec()
    }

    /// Hands out at most `chunk` bytes per read call
    struct Trickle {
        inner: Cursor<Vec<u8>>,
        chunk: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let len = buf.len().min(self.chunk);
            self.inner.read(&mut buf[..len])
        }
    }

    #[test]
    fn test_iterates_all_traces() {
        let stream = TraceStream::new(Cursor::new(encoded(4))).unwrap();
        let cdps: Vec<i32> = stream.map(|t| t.unwrap().0.cdp).collect();
        assert_eq!(cdps, vec![100, 101, 102, 103]);
    }

    #[test]
    fn test_short_reads() {
        let reader = Trickle {
            inner: Cursor::new(encoded(2)),
            chunk: 7,
        };
        let mut stream = TraceStream::new(reader).unwrap();
        let (_, samples) = stream.next_trace().unwrap().unwrap();
        assert_eq!(samples, vec![0.0, 0.0, 0.0]);
        let (_, samples) = stream.next_trace().unwrap().unwrap();
        assert_eq!(samples, vec![1.0, 0.0, -1.0]);
        assert!(stream.next_trace().unwrap().is_none());
    }

    #[test]
    fn test_partial_tail() {
        let mut bytes = encoded(3);
        bytes.truncate(bytes.len() - 5);

        let mut stream = TraceStream::new(Cursor::new(bytes)).unwrap();
        assert_eq!(stream.by_ref().count(), 2);
        assert_eq!(stream.traces_read(), 2);
        assert_eq!(stream.trailing_bytes(), 252 - 5);
        assert!(stream.next_trace().unwrap().is_none());
    }

    #[test]
    fn test_short_header() {
        let err = TraceStream::new(Cursor::new(vec![0x40u8; 1000])).err().unwrap();
        assert!(matches!(err, SegyError::MalformedHeader(_)));
    }

    #[test]
    fn test_read_into_checks_length() {
        let mut stream = TraceStream::new(Cursor::new(encoded(1))).unwrap();
        let mut wrong = SegyDataset::new(5).unwrap();
        assert!(stream.read_into(&mut wrong).is_err());

        let mut dataset = SegyDataset::new(3).unwrap();
        assert!(stream.read_into(&mut dataset).unwrap());
        assert!(!stream.read_into(&mut dataset).unwrap());
        assert_eq!(dataset.num_traces(), 1);
    }
}
