// src/file.rs
use crate::dataset::SegyDataset;
use crate::error::{Result, SegyError};
use crate::header::{BinaryHeader, TextHeader};
use crate::types::SampleFormat;
use tracing::warn;

/// A complete SEG-Y file: text header, binary header and trace data.
///
/// The binary header is the source of truth for the on-disk layout. A
/// writer always encodes with the header as it is now, so editing
/// `sampleFormat` changes the output format of the next write.
#[derive(Debug, Clone, PartialEq)]
pub struct SegyFile {
    pub text_header: TextHeader,
    pub binary_header: BinaryHeader,
    pub dataset: SegyDataset,
}

impl SegyFile {
    /// Assemble a file, checking the header against the dataset
    pub fn new(text_header: TextHeader, binary_header: BinaryHeader, dataset: SegyDataset) -> Result<Self> {
        binary_header.validate()?;
        let declared = binary_header.checked_samples_per_trace()?;
        if declared != dataset.samples_per_trace() {
            return Err(SegyError::LayoutMismatch {
                expected: declared,
                found: dataset.samples_per_trace(),
            });
        }

        Ok(SegyFile {
            text_header,
            binary_header,
            dataset,
        })
    }

    pub(crate) fn from_parts(text_header: TextHeader, binary_header: BinaryHeader, dataset: SegyDataset) -> Self {
        SegyFile {
            text_header,
            binary_header,
            dataset,
        }
    }

    /// Replace the binary header, returning the edited file.
    ///
    /// A change of `samplesPerTrace` truncates or zero-pads every trace to
    /// the new length. The header must pass [`BinaryHeader::validate`].
    pub fn with_binary_header(mut self, header: BinaryHeader) -> Result<Self> {
        header.validate()?;
        let samples_per_trace = header.checked_samples_per_trace()?;

        if samples_per_trace != self.dataset.samples_per_trace() {
            warn!(
                from = self.dataset.samples_per_trace(),
                to = samples_per_trace,
                traces = self.dataset.num_traces(),
                "resizing traces to new samples per trace"
            );
            self.dataset.resize_traces(samples_per_trace)?;
        }

        self.binary_header = header;
        Ok(self)
    }

    /// Replace the text header, returning the edited file
    pub fn with_text_header(mut self, text: &str) -> Self {
        self.text_header = TextHeader::new(text);
        self
    }

    pub fn sample_format(&self) -> Result<SampleFormat> {
        self.binary_header.sample_format()
    }

    pub fn num_traces(&self) -> usize {
        self.dataset.num_traces()
    }

    pub fn into_parts(self) -> (TextHeader, BinaryHeader, SegyDataset) {
        (self.text_header, self.binary_header, self.dataset)
    }
}
