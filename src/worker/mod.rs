// src/worker/mod.rs
//! Background parsing
//!
//! A parse runs off the caller's thread and hands the finished file back
//! by move. Requests and responses are plain messages:
//!
//! - [`ParseWorker`] - a dedicated OS thread fed through `crossbeam-channel`
//! - [`AsyncParseWorker`] - the same protocol on tokio's blocking pool
//!   (requires the "async" feature)

mod thread_worker;

#[cfg(feature = "async")]
mod async_worker;

pub use thread_worker::{ParseTicket, ParseWorker};

#[cfg(feature = "async")]
pub use async_worker::AsyncParseWorker;

use crate::file::SegyFile;
use crate::reader::SegyReader;
use tracing::debug;

/// Work sent to a parse worker
#[derive(Debug)]
pub enum ParseRequest {
    /// Parse a complete file image; the bytes are moved, not copied
    Parse(Vec<u8>),
}

/// Result of one [`ParseRequest`]
#[derive(Debug)]
pub enum ParseResponse {
    Success { file: SegyFile },
    Error { message: String },
}

impl ParseResponse {
    /// Convert into a `Result`, keeping the message of a failed parse
    pub fn into_result(self) -> std::result::Result<SegyFile, String> {
        match self {
            ParseResponse::Success { file } => Ok(file),
            ParseResponse::Error { message } => Err(message),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseResponse::Success { .. })
    }
}

/// Run one request to completion on the current thread
pub(crate) fn handle_request(request: ParseRequest) -> ParseResponse {
    match request {
        ParseRequest::Parse(bytes) => {
            debug!(bytes = bytes.len(), "parse request received");
            match SegyReader::parse(&bytes) {
                Ok(reader) => ParseResponse::Success {
                    file: reader.into_file(),
                },
                Err(e) => ParseResponse::Error {
                    message: e.to_string(),
                },
            }
        }
    }
}
