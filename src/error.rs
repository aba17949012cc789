// src/error.rs
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegyError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Unsupported sample format code: {0}")]
    UnsupportedSampleFormat(i16),

    #[error("Header field not found: {0}")]
    FieldNotFound(String),

    #[error("Value {value} does not fit header field {field}")]
    FieldOutOfRange { field: String, value: i64 },

    #[error("Trace range {start}..{end} is invalid for {available} traces")]
    InvalidTraceRange { start: usize, end: usize, available: usize },

    #[error("Layout mismatch: expected {expected}, found {found}")]
    LayoutMismatch { expected: usize, found: usize },

    #[error("Parse worker closed")]
    WorkerClosed,
}

pub type Result<T> = std::result::Result<T, SegyError>;
