// src/lib.rs
//! # segy-rs
//!
//! Reading, editing and writing SEG-Y seismic files, plus the windowed AGC
//! processing a trace viewer needs.
//!
//! ## Features
//!
//! - **All common sample formats**: IBM float, IEEE float, 32/16/8-bit integers
//! - **Lossless headers**: bytes outside the named fields survive a round trip
//! - **Named field access**: read and edit binary and trace header fields by name
//! - **Truncation tolerant**: a partial last trace ends the parse instead of failing it
//! - **Background parsing**: thread and tokio workers that hand the result back by move
//! - **Windowed AGC**: only the traces on screen are processed, and results are cached
//!
//! ## Quick Start
//!
//! ### Reading
//!
//! ```rust,no_run
//! use segy_rs::*;
//!
//! fn main() -> Result<()> {
//!     let reader = SegyReader::open("line_001.sgy")?;
//!     let file = reader.file();
//!
//!     println!("{}", file.text_header);
//!     println!(
//!         "{} traces of {} samples at {} ms",
//!         file.dataset.num_traces(),
//!         file.dataset.samples_per_trace(),
//!         file.binary_header.sample_interval_ms()
//!     );
//!
//!     for (header, samples) in file.dataset.iter().take(5) {
//!         println!("cdp {}: first sample {}", header.cdp, samples[0]);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Editing and writing
//!
//! ```rust,no_run
//! use segy_rs::*;
//!
//! fn main() -> Result<()> {
//!     let mut file = SegyReader::open("line_001.sgy")?.into_file();
//!     file.dataset.header_mut(0).unwrap().set("cdp", 1001)?;
//!
//!     let mut binary = file.binary_header.clone();
//!     binary.set_sample_format(SampleFormat::IeeeFloat);
//!     let file = file.with_binary_header(binary)?;
//!
//!     SegyWriter::create("line_001_ieee.sgy", &file)?;
//!     Ok(())
//! }
//! ```
//!
//! ### AGC windows
//!
//! ```rust,no_run
//! use segy_rs::*;
//! use segy_rs::processing::{AgcSettings, WindowCache, WindowRequest};
//!
//! fn main() -> Result<()> {
//!     let file = SegyReader::open("line_001.sgy")?.into_file();
//!     let mut cache = WindowCache::default();
//!
//!     let request = WindowRequest::new(0..200).with_agc(AgcSettings::enabled(500.0));
//!     let window = cache.file_window(&file, &request)?;
//!     for trace in window.iter() {
//!         // draw trace
//!         let _ = trace.len();
//!     }
//!     Ok(())
//! }
//! ```

// Modules
pub mod error;
pub mod types;
pub mod header;
pub mod raw_data;
pub mod reader;
pub mod writer;
pub mod processing;
pub mod worker;

mod dataset;
mod file;
mod utils;

// Re-export commonly used types at the crate root for convenience
pub use error::{Result, SegyError};

pub use types::{MeasurementSystem, SampleFormat, TraceAxisKey};

pub use header::{BinaryHeader, FieldSpec, TextHeader, TraceHeader, FILE_HEADER_SIZE};

pub use dataset::SegyDataset;
pub use file::SegyFile;

pub use reader::{ParseSummary, SegyReader, TraceStream};
pub use writer::{SegyWriter, TraceWriter};

pub use worker::{ParseRequest, ParseResponse, ParseWorker};

#[cfg(feature = "async")]
pub use worker::AsyncParseWorker;

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use segy_rs::prelude::*;
    //! ```

    pub use crate::error::{Result, SegyError};
    pub use crate::header::{BinaryHeader, TextHeader, TraceHeader};
    pub use crate::processing::{AgcSettings, WindowCache, WindowRequest};
    pub use crate::types::SampleFormat;
    pub use crate::{SegyDataset, SegyFile, SegyReader, SegyWriter};
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
