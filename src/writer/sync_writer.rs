// src/writer/sync_writer.rs
use crate::error::{Result, SegyError};
use crate::file::SegyFile;
use crate::header::{BinaryHeader, TextHeader, TraceHeader, FILE_HEADER_SIZE};
use crate::raw_data::SampleBuffer;
use crate::reader::TraceLayout;
use bytes::Bytes;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Whole-file SEG-Y encoding.
///
/// Output is a pure function of the file: text header, binary header, then
/// one record per trace, with samples in the format the binary header
/// declares at the time of the call.
///
/// # Example
///
/// ```
/// use segy_rs::{BinaryHeader, SegyDataset, SegyFile, SegyReader, SegyWriter, TextHeader, TraceHeader};
/// use segy_rs::types::SampleFormat;
///
/// let mut binary = BinaryHeader::default();
/// binary.sample_interval = 4000;
/// binary.samples_per_trace = 2;
/// binary.set_sample_format(SampleFormat::IeeeFloat);
///
/// let mut dataset = SegyDataset::new(2).unwrap();
/// dataset.push_trace(TraceHeader::default(), &[0.5, -0.5]).unwrap();
///
/// let file = SegyFile::new(TextHeader::default(), binary, dataset).unwrap();
/// let bytes = SegyWriter::to_bytes(&file).unwrap();
/// assert_eq!(bytes.len(), 3600 + 240 + 8);
///
/// let parsed = SegyReader::parse(&bytes).unwrap().into_file();
/// assert_eq!(parsed, file);
/// ```
pub struct SegyWriter;

impl SegyWriter {
    /// Encode the whole file into one contiguous buffer
    pub fn to_bytes(file: &SegyFile) -> Result<Bytes> {
        let layout = Self::layout(file)?;
        let traces = file.dataset.num_traces();
        let mut buffer = SampleBuffer::with_capacity(layout.format, FILE_HEADER_SIZE + traces * layout.record_size);

        buffer.put_block(&file.text_header.encode());
        buffer.put_block(&file.binary_header.encode());
        for (header, samples) in file.dataset.iter() {
            buffer.put_block(&header.encode());
            buffer.put_samples(samples);
        }

        debug!(
            traces,
            format = layout.format.name(),
            bytes = buffer.byte_len(),
            "encoded SEG-Y file"
        );
        Ok(buffer.freeze())
    }

    /// Stream the file to any writer, one trace record at a time
    pub fn write_to<W: Write>(file: &SegyFile, out: W) -> Result<W> {
        Self::layout(file)?;
        let mut writer = TraceWriter::new(out, &file.text_header, &file.binary_header)?;
        for (header, samples) in file.dataset.iter() {
            writer.write_trace(header, samples)?;
        }
        writer.finish()
    }

    /// Create (or truncate) `path` and write the file to it
    pub fn create(path: impl AsRef<Path>, file: &SegyFile) -> Result<()> {
        let out = BufWriter::new(File::create(path)?);
        let out = Self::write_to(file, out)?;
        out.into_inner().map_err(|e| SegyError::Io(e.into_error()))?;
        Ok(())
    }

    fn layout(file: &SegyFile) -> Result<TraceLayout> {
        let layout = TraceLayout::from_header(&file.binary_header)?;
        if layout.samples_per_trace != file.dataset.samples_per_trace() {
            return Err(SegyError::LayoutMismatch {
                expected: layout.samples_per_trace,
                found: file.dataset.samples_per_trace(),
            });
        }
        Ok(layout)
    }
}

/// Incremental SEG-Y writer: headers up front, then traces as they arrive
///
/// # Example
///
/// ```
/// use segy_rs::{BinaryHeader, TextHeader, TraceHeader};
/// use segy_rs::writer::TraceWriter;
///
/// let mut binary = BinaryHeader::default();
/// binary.sample_interval = 2000;
/// binary.samples_per_trace = 3;
/// binary.sample_format = 3;
///
/// let mut writer = TraceWriter::new(Vec::new(), &TextHeader::default(), &binary).unwrap();
/// writer.write_trace(&TraceHeader::default(), &[1.0, 2.0, 3.0]).unwrap();
/// let bytes = writer.finish().unwrap();
/// assert_eq!(bytes.len(), 3600 + 240 + 6);
/// ```
pub struct TraceWriter<W: Write> {
    out: W,
    layout: TraceLayout,
    record: SampleBuffer,
    traces_written: usize,
}

impl<W: Write> TraceWriter<W> {
    /// Write both file headers and prepare for trace records
    pub fn new(mut out: W, text_header: &TextHeader, binary_header: &BinaryHeader) -> Result<Self> {
        let layout = TraceLayout::from_header(binary_header)?;
        out.write_all(&text_header.encode())?;
        out.write_all(&binary_header.encode())?;

        Ok(TraceWriter {
            out,
            layout,
            record: SampleBuffer::with_capacity(layout.format, layout.record_size),
            traces_written: 0,
        })
    }

    pub fn write_trace(&mut self, header: &TraceHeader, samples: &[f32]) -> Result<()> {
        if samples.len() != self.layout.samples_per_trace {
            return Err(SegyError::LayoutMismatch {
                expected: self.layout.samples_per_trace,
                found: samples.len(),
            });
        }

        self.record.clear();
        self.record.put_block(&header.encode());
        self.record.put_samples(samples);
        self.out.write_all(self.record.as_bytes())?;
        self.traces_written += 1;
        Ok(())
    }

    pub fn traces_written(&self) -> usize {
        self.traces_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        debug!(
            traces = self.traces_written,
            format = self.layout.format.name(),
            "finished SEG-Y stream"
        );
        Ok(self.out)
    }
}
