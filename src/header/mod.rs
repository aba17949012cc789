// src/header/mod.rs
//! Fixed-layout SEG-Y header blocks
//!
//! - [`TextHeader`] - 3200-byte EBCDIC card images
//! - [`BinaryHeader`] - 400-byte file header
//! - [`TraceHeader`] - 240-byte per-trace header
//!
//! The binary and trace headers are flat tables of big-endian integers at
//! fixed offsets, described by [`FieldSpec`] entries in `FIELDS`.

mod binary;
mod field;
mod text;
mod trace;

pub use binary::BinaryHeader;
pub use field::{FieldSpec, HeaderInt};
pub use text::TextHeader;
pub use trace::TraceHeader;

/// Text header plus binary header
pub const FILE_HEADER_SIZE: usize = TextHeader::SIZE + BinaryHeader::SIZE;
