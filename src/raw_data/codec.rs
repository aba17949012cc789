// src/raw_data/codec.rs
use crate::error::{Result, SegyError};
use crate::raw_data::ibm::{f32_to_ibm, ibm_to_f32};
use crate::types::SampleFormat;
use byteorder::{BigEndian, ByteOrder};
use std::io;

/// Per-format conversion of single samples between big-endian bytes and `f32`.
///
/// Every format is represented as `f32` in memory. Integer formats are
/// exact up to 2^24; larger 32-bit integers lose precision.
///
/// # Example
///
/// ```
/// use segy_rs::raw_data::SampleCodec;
/// use segy_rs::types::SampleFormat;
///
/// let mut bytes = [0u8; 4];
/// SampleCodec::encode(SampleFormat::IbmFloat, -118.625, &mut bytes, 0).unwrap();
/// assert_eq!(bytes, [0xC2, 0x76, 0xA0, 0x00]);
///
/// let value = SampleCodec::decode(SampleFormat::IbmFloat, &bytes, 0).unwrap();
/// assert_eq!(value, -118.625);
/// ```
pub struct SampleCodec;

impl SampleCodec {
    /// Decode one sample located at `offset` in `src`
    pub fn decode(format: SampleFormat, src: &[u8], offset: usize) -> Result<f32> {
        let bytes = Self::window(src, offset, format.bytes_per_sample())?;
        Ok(Self::decode_unchecked(format, bytes))
    }

    /// Encode one sample at `offset` in `dst`.
    ///
    /// Integer formats round to nearest and saturate at the field width;
    /// NaN encodes as zero.
    pub fn encode(format: SampleFormat, value: f32, dst: &mut [u8], offset: usize) -> Result<()> {
        let width = format.bytes_per_sample();
        let available = dst.len();
        let bytes = dst
            .get_mut(offset..offset + width)
            .ok_or_else(|| Self::short_buffer(offset, width, available))?;
        Self::encode_unchecked(format, value, bytes);
        Ok(())
    }

    /// Decode a whole trace. `src` must hold exactly `out.len()` samples.
    pub fn decode_trace(format: SampleFormat, src: &[u8], out: &mut [f32]) -> Result<()> {
        let width = format.bytes_per_sample();
        if src.len() != out.len() * width {
            return Err(SegyError::LayoutMismatch {
                expected: out.len() * width,
                found: src.len(),
            });
        }

        match format {
            SampleFormat::IeeeFloat => BigEndian::read_f32_into(src, out),
            _ => {
                for (chunk, sample) in src.chunks_exact(width).zip(out.iter_mut()) {
                    *sample = Self::decode_unchecked(format, chunk);
                }
            }
        }
        Ok(())
    }

    /// Encode a whole trace into `dst`, which must be exactly sized
    pub fn encode_trace(format: SampleFormat, samples: &[f32], dst: &mut [u8]) -> Result<()> {
        let width = format.bytes_per_sample();
        if dst.len() != samples.len() * width {
            return Err(SegyError::LayoutMismatch {
                expected: samples.len() * width,
                found: dst.len(),
            });
        }

        match format {
            SampleFormat::IeeeFloat => BigEndian::write_f32_into(samples, dst),
            _ => {
                for (chunk, &sample) in dst.chunks_exact_mut(width).zip(samples.iter()) {
                    Self::encode_unchecked(format, sample, chunk);
                }
            }
        }
        Ok(())
    }

    #[inline]
    fn decode_unchecked(format: SampleFormat, bytes: &[u8]) -> f32 {
        match format {
            SampleFormat::IbmFloat => ibm_to_f32(BigEndian::read_u32(bytes)),
            SampleFormat::IeeeFloat => BigEndian::read_f32(bytes),
            SampleFormat::Int32 => BigEndian::read_i32(bytes) as f32,
            SampleFormat::Int16 => BigEndian::read_i16(bytes) as f32,
            SampleFormat::Int8 => bytes[0] as i8 as f32,
        }
    }

    #[inline]
    fn encode_unchecked(format: SampleFormat, value: f32, bytes: &mut [u8]) {
        // `as` from float saturates at the integer bounds and maps NaN to 0
        match format {
            SampleFormat::IbmFloat => BigEndian::write_u32(bytes, f32_to_ibm(value)),
            SampleFormat::IeeeFloat => BigEndian::write_f32(bytes, value),
            SampleFormat::Int32 => BigEndian::write_i32(bytes, value.round() as i32),
            SampleFormat::Int16 => BigEndian::write_i16(bytes, value.round() as i16),
            SampleFormat::Int8 => bytes[0] = value.round() as i8 as u8,
        }
    }

    fn window(src: &[u8], offset: usize, width: usize) -> Result<&[u8]> {
        src.get(offset..offset + width)
            .ok_or_else(|| Self::short_buffer(offset, width, src.len()))
    }

    fn short_buffer(offset: usize, width: usize, available: usize) -> SegyError {
        SegyError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "sample at offset {} needs {} bytes, buffer holds {}",
                offset, width, available
            ),
        ))
    }
}
