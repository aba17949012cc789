// src/worker/async_worker.rs
use crate::error::{Result, SegyError};
use crate::worker::{handle_request, ParseRequest, ParseResponse};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task;
use tracing::debug;

enum WorkerCommand {
    Parse {
        request: ParseRequest,
        response: oneshot::Sender<ParseResponse>,
    },
    Close,
}

/// Async front end to a parser running on tokio's blocking pool
///
/// Must be created inside a tokio runtime.
#[derive(Clone)]
pub struct AsyncParseWorker {
    command_tx: mpsc::UnboundedSender<WorkerCommand>,
    handle: Arc<Mutex<Option<task::JoinHandle<()>>>>,
}

impl AsyncParseWorker {
    pub fn spawn() -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let handle = task::spawn_blocking(move || Self::worker_task(command_rx));

        AsyncParseWorker {
            command_tx,
            handle: Arc::new(Mutex::new(Some(handle))),
        }
    }

    fn worker_task(mut command_rx: mpsc::UnboundedReceiver<WorkerCommand>) {
        while let Some(command) = command_rx.blocking_recv() {
            match command {
                WorkerCommand::Parse { request, response } => {
                    let _ = response.send(handle_request(request));
                }
                WorkerCommand::Close => break,
            }
        }
        debug!("async parse worker stopped");
    }

    pub async fn submit(&self, request: ParseRequest) -> Result<ParseResponse> {
        let (response_tx, response_rx) = oneshot::channel();
        self.command_tx
            .send(WorkerCommand::Parse {
                request,
                response: response_tx,
            })
            .map_err(|_| SegyError::WorkerClosed)?;
        response_rx.await.map_err(|_| SegyError::WorkerClosed)
    }

    pub async fn parse(&self, bytes: Vec<u8>) -> Result<ParseResponse> {
        self.submit(ParseRequest::Parse(bytes)).await
    }

    /// Stop the worker and wait for its task to end
    pub async fn close(&self) -> Result<()> {
        let _ = self.command_tx.send(WorkerCommand::Close);

        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            handle.await.map_err(|_| SegyError::WorkerClosed)?;
        }
        Ok(())
    }
}
