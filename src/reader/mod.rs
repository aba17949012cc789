// src/reader/mod.rs
mod sync_reader;
mod streaming;

pub use sync_reader::{ParseSummary, SegyReader, READ_BUFFER_SIZE};
pub use streaming::TraceStream;

pub(crate) use sync_reader::TraceLayout;
