// src/raw_data/buffer.rs
use crate::raw_data::ibm::f32_to_ibm;
use crate::types::SampleFormat;
use bytes::{BufMut, Bytes, BytesMut};

/// Accumulates encoded SEG-Y bytes ahead of a single write.
///
/// Samples are encoded big-endian in the buffer's sample format, with the
/// same rounding and saturation as [`SampleCodec`](crate::raw_data::SampleCodec);
/// header blocks are appended verbatim.
///
/// # Example
///
/// ```
/// use segy_rs::raw_data::SampleBuffer;
/// use segy_rs::types::SampleFormat;
///
/// let mut buffer = SampleBuffer::new(SampleFormat::Int16);
/// buffer.put_samples(&[1.0, -2.0, 3.0]);
///
/// assert_eq!(buffer.sample_count(), 3);
/// assert_eq!(buffer.byte_len(), 6);
/// ```
pub struct SampleBuffer {
    buffer: BytesMut,
    format: SampleFormat,
    sample_count: u64,
}

impl SampleBuffer {
    /// Create a new buffer with default capacity (8192 bytes)
    pub fn new(format: SampleFormat) -> Self {
        Self::with_capacity(format, 8192)
    }

    pub fn with_capacity(format: SampleFormat, capacity: usize) -> Self {
        SampleBuffer {
            buffer: BytesMut::with_capacity(capacity),
            format,
            sample_count: 0,
        }
    }

    /// Append a raw block (text, binary or trace header)
    pub fn put_block(&mut self, block: &[u8]) {
        self.buffer.put_slice(block);
    }

    /// Append one encoded sample
    pub fn put_sample(&mut self, value: f32) {
        // `as` from float saturates at the integer bounds and maps NaN to 0
        match self.format {
            SampleFormat::IbmFloat => self.buffer.put_u32(f32_to_ibm(value)),
            SampleFormat::Int32 => self.buffer.put_i32(value.round() as i32),
            SampleFormat::Int16 => self.buffer.put_i16(value.round() as i16),
            SampleFormat::IeeeFloat => self.buffer.put_f32(value),
            SampleFormat::Int8 => self.buffer.put_i8(value.round() as i8),
        }
        self.sample_count += 1;
    }

    /// Append a run of samples
    pub fn put_samples(&mut self, values: &[f32]) {
        self.buffer.reserve(values.len() * self.format.bytes_per_sample());
        for &value in values {
            self.put_sample(value);
        }
    }

    pub fn format(&self) -> SampleFormat {
        self.format
    }

    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    pub fn byte_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Freeze into an immutable, cheaply cloneable byte buffer
    pub fn freeze(self) -> Bytes {
        self.buffer.freeze()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.sample_count = 0;
    }
}
