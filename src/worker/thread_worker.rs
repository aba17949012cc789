// src/worker/thread_worker.rs
use crate::error::{Result, SegyError};
use crate::worker::{handle_request, ParseRequest, ParseResponse};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::thread::{self, JoinHandle};
use tracing::debug;

enum WorkerCommand {
    Parse {
        request: ParseRequest,
        response: Sender<ParseResponse>,
    },
    Shutdown,
}

/// Parser running on its own thread
///
/// Requests are served in submission order. Each submission gets its own
/// one-shot reply channel, wrapped in a [`ParseTicket`].
///
/// # Example
///
/// ```no_run
/// use segy_rs::worker::{ParseRequest, ParseResponse, ParseWorker};
///
/// let worker = ParseWorker::spawn().unwrap();
/// let bytes = std::fs::read("line_001.sgy").unwrap();
///
/// match worker.submit(ParseRequest::Parse(bytes)).unwrap().wait().unwrap() {
///     ParseResponse::Success { file } => println!("{} traces", file.num_traces()),
///     ParseResponse::Error { message } => eprintln!("parse failed: {}", message),
/// }
/// ```
pub struct ParseWorker {
    command_tx: Sender<WorkerCommand>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl ParseWorker {
    pub fn spawn() -> Result<Self> {
        let (command_tx, command_rx) = unbounded();
        let handle = thread::Builder::new()
            .name("segy-parse".to_string())
            .spawn(move || Self::worker_loop(command_rx))?;

        Ok(ParseWorker {
            command_tx,
            handle: Mutex::new(Some(handle)),
        })
    }

    fn worker_loop(command_rx: Receiver<WorkerCommand>) {
        while let Ok(command) = command_rx.recv() {
            match command {
                WorkerCommand::Parse { request, response } => {
                    // the caller may have dropped its ticket
                    let _ = response.send(handle_request(request));
                }
                WorkerCommand::Shutdown => break,
            }
        }
        debug!("parse worker stopped");
    }

    /// Queue a request; the reply arrives on the returned ticket
    pub fn submit(&self, request: ParseRequest) -> Result<ParseTicket> {
        let (response_tx, response_rx) = bounded(1);
        self.command_tx
            .send(WorkerCommand::Parse {
                request,
                response: response_tx,
            })
            .map_err(|_| SegyError::WorkerClosed)?;
        Ok(ParseTicket { response_rx })
    }

    /// Submit a file image and block until it is parsed
    pub fn parse(&self, bytes: Vec<u8>) -> Result<ParseResponse> {
        self.submit(ParseRequest::Parse(bytes))?.wait()
    }

    /// Stop the worker after queued requests finish, and join its thread
    pub fn shutdown(&self) -> Result<()> {
        // a closed channel means the loop already exited
        let _ = self.command_tx.send(WorkerCommand::Shutdown);
        if let Some(handle) = self.handle.lock().take() {
            handle.join().map_err(|_| SegyError::WorkerClosed)?;
        }
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.handle.lock().as_ref().map_or(false, |h| !h.is_finished())
    }
}

impl Drop for ParseWorker {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

/// Pending reply to a submitted [`ParseRequest`]
pub struct ParseTicket {
    response_rx: Receiver<ParseResponse>,
}

impl ParseTicket {
    /// Block until the worker answers
    pub fn wait(self) -> Result<ParseResponse> {
        self.response_rx.recv().map_err(|_| SegyError::WorkerClosed)
    }

    /// The reply if it is already available
    pub fn try_wait(&self) -> Option<ParseResponse> {
        self.response_rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_for_garbage() {
        let worker = ParseWorker::spawn().unwrap();
        let response = worker.parse(vec![0u8; 100]).unwrap();
        match response {
            ParseResponse::Error { message } => assert!(message.contains("3600")),
            ParseResponse::Success { .. } => panic!("garbage parsed"),
        }
    }

    #[test]
    fn test_success_hands_back_file() {
        let source = crate::test_helpers::sine_file(3, 16, crate::SampleFormat::IbmFloat);
        let bytes = crate::SegyWriter::to_bytes(&source).unwrap().to_vec();

        let worker = ParseWorker::spawn().unwrap();
        let file = worker.parse(bytes).unwrap().into_result().unwrap();
        assert_eq!(file.num_traces(), 3);
        assert_eq!(file.binary_header, source.binary_header);
    }

    #[test]
    fn test_shutdown_closes_worker() {
        let worker = ParseWorker::spawn().unwrap();
        worker.shutdown().unwrap();
        assert!(!worker.is_running());
        assert!(matches!(
            worker.submit(ParseRequest::Parse(Vec::new())),
            Err(SegyError::WorkerClosed)
        ));
        // second shutdown is a no-op
        worker.shutdown().unwrap();
    }

    #[test]
    fn test_requests_served_in_order() {
        let worker = ParseWorker::spawn().unwrap();
        let tickets: Vec<_> = (0..3)
            .map(|n| worker.submit(ParseRequest::Parse(vec![0u8; n])).unwrap())
            .collect();
        for ticket in tickets {
            assert!(!ticket.wait().unwrap().is_success());
        }
    }

    #[test]
    fn test_try_wait_polls_without_blocking() {
        let (tx, rx) = bounded(1);
        let ticket = ParseTicket { response_rx: rx };
        assert!(ticket.try_wait().is_none());

        tx.send(ParseResponse::Error {
            message: "late".to_string(),
        })
        .unwrap();
        assert!(matches!(ticket.try_wait(), Some(ParseResponse::Error { .. })));
        // the reply is handed out once
        assert!(ticket.try_wait().is_none());
    }

    #[test]
    fn test_try_wait_on_worker_ticket() {
        let source = crate::test_helpers::sine_file(4, 8, crate::SampleFormat::Int16);
        let bytes = crate::SegyWriter::to_bytes(&source).unwrap().to_vec();

        let worker = ParseWorker::spawn().unwrap();
        let ticket = worker.submit(ParseRequest::Parse(bytes)).unwrap();

        let mut response = None;
        for _ in 0..500 {
            response = ticket.try_wait();
            if response.is_some() {
                break;
            }
            thread::sleep(std::time::Duration::from_millis(10));
        }
        let file = response.unwrap().into_result().unwrap();
        assert_eq!(file.num_traces(), 4);
    }
}
