// src/raw_data/mod.rs
//! Sample encoding and decoding for SEG-Y trace data
//!
//! - [`SampleCodec`] - converts single samples or whole traces between
//!   big-endian bytes and `f32`
//! - [`SampleBuffer`] - accumulates encoded bytes for writing
//! - [`ibm`] - IBM System/360 float conversion
//!
//! # Examples
//!
//! ```
//! use segy_rs::raw_data::{SampleBuffer, SampleCodec};
//! use segy_rs::types::SampleFormat;
//!
//! let mut buffer = SampleBuffer::new(SampleFormat::IbmFloat);
//! buffer.put_samples(&[1.0, -0.5]);
//!
//! let mut decoded = [0.0f32; 2];
//! SampleCodec::decode_trace(SampleFormat::IbmFloat, buffer.as_bytes(), &mut decoded).unwrap();
//! assert_eq!(decoded, [1.0, -0.5]);
//! ```

mod buffer;
mod codec;
pub mod ibm;

pub use buffer::SampleBuffer;
pub use codec::SampleCodec;
