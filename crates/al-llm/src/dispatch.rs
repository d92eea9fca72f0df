use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, TryRecvError};

use crate::client::{ChatClient, ChatRequest};
use crate::error::TransportError;

type Outcome = Result<String, TransportError>;

/// Flag shared with the worker; once set, the result is discarded.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// An analysis request running on a background thread.
pub struct PendingAnalysis {
    receiver: Receiver<Outcome>,
    cancel: CancelHandle,
    started: Instant,
    worker: Option<JoinHandle<()>>,
}

/// Send `request` through `client` on a worker thread so the caller stays
/// responsive. The request is sent exactly once.
pub fn dispatch<C>(client: C, request: ChatRequest) -> Result<PendingAnalysis, TransportError>
where
    C: ChatClient + 'static,
{
    let (sender, receiver) = bounded(1);
    let cancel = CancelHandle::default();
    let worker_cancel = cancel.clone();

    let worker = thread::Builder::new()
        .name("apilens-llm".to_string())
        .spawn(move || {
            let outcome = client.complete(&request);
            if worker_cancel.is_cancelled() {
                tracing::debug!("analysis finished after cancellation, discarding result");
                return;
            }
            // The receiver is gone when the caller dropped the handle.
            let _ = sender.send(outcome);
        })
        .map_err(|_| TransportError::WorkerLost)?;

    tracing::info!("analysis dispatched");
    Ok(PendingAnalysis {
        receiver,
        cancel,
        started: Instant::now(),
        worker: Some(worker),
    })
}

impl PendingAnalysis {
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Non-blocking poll. `None` while the request is still in flight.
    pub fn try_result(&self) -> Option<Outcome> {
        if self.cancel.is_cancelled() {
            return Some(Err(TransportError::Cancelled));
        }
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(TransportError::WorkerLost)),
        }
    }

    /// Block until the worker answers, calling `on_tick` with the elapsed time
    /// every `tick` while waiting.
    pub fn wait_with_progress<F>(mut self, tick: Duration, mut on_tick: F) -> Outcome
    where
        F: FnMut(Duration),
    {
        let outcome = loop {
            if self.cancel.is_cancelled() {
                break Err(TransportError::Cancelled);
            }
            match self.receiver.recv_timeout(tick) {
                Ok(outcome) => break outcome,
                Err(RecvTimeoutError::Timeout) => on_tick(self.started.elapsed()),
                Err(RecvTimeoutError::Disconnected) => {
                    break if self.cancel.is_cancelled() {
                        Err(TransportError::Cancelled)
                    } else {
                        Err(TransportError::WorkerLost)
                    }
                }
            }
        };

        if outcome.is_ok() {
            if let Some(worker) = self.worker.take() {
                let _ = worker.join();
            }
        }
        tracing::info!(
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            ok = outcome.is_ok(),
            "analysis finished"
        );
        outcome
    }
}
