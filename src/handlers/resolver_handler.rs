use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::actors::messages::{Completion, ResolverMessage};
use crate::errors::WorkerStopped;
use crate::protocol::{ResolutionRequest, ResolutionResult};

/// Posts resolution requests onto the resolver worker's queue.
///
/// Safe to use from any thread, including ones with no async runtime.
/// Nothing here blocks and no lookup ever runs on the calling thread.
/// Inputs are expected to have passed [`crate::validator::validate`] already.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    sender: mpsc::UnboundedSender<ResolverMessage>,
}

impl Dispatcher {
    pub(crate) fn new(sender: mpsc::UnboundedSender<ResolverMessage>) -> Self {
        Self { sender }
    }

    /// Queues `host` for resolution and returns a handle to the eventual result.
    pub fn submit(&self, host: impl Into<String>) -> PendingResolution {
        let (send, recv) = oneshot::channel();

        // If the worker is gone the message, and the sender in it, is dropped
        // here, which the pending handle reports as `WorkerStopped`.
        let _ = self.post(ResolutionRequest::new(host), Completion::Channel(send));

        PendingResolution { receiver: recv }
    }

    /// Queues `host` for resolution and calls `on_complete` with the result.
    ///
    /// The callback runs on the resolver worker thread. When the worker is
    /// not running it is dropped without being called.
    pub fn resolve<F>(&self, host: impl Into<String>, on_complete: F) -> Result<(), WorkerStopped>
    where
        F: FnOnce(ResolutionResult) + Send + 'static,
    {
        self.post(
            ResolutionRequest::new(host),
            Completion::Callback(Box::new(on_complete)),
        )
    }

    fn post(&self, request: ResolutionRequest, respond_to: Completion) -> Result<(), WorkerStopped> {
        debug!("Submitting {}", request);

        let msg = ResolverMessage::Resolve {
            request,
            respond_to,
        };

        self.sender.send(msg).map_err(|e| {
            let ResolverMessage::Resolve { request, .. } = e.0;
            warn!("Dropping request for {}: resolver worker is not running", request.host);
            WorkerStopped
        })
    }
}

/// The eventual result of [`Dispatcher::submit`].
///
/// Await it from async code, or call [`PendingResolution::wait`] from a
/// plain thread. Yields `Err(WorkerStopped)` if the worker shut down before
/// answering.
#[derive(Debug)]
pub struct PendingResolution {
    receiver: oneshot::Receiver<ResolutionResult>,
}

impl PendingResolution {
    /// Blocks the current thread until the result arrives.
    ///
    /// # Panics
    ///
    /// Panics when called from within an asynchronous execution context.
    pub fn wait(self) -> Result<ResolutionResult, WorkerStopped> {
        self.receiver.blocking_recv().map_err(|_| WorkerStopped)
    }

    /// Returns the result if it has already arrived, without blocking.
    pub fn try_take(&mut self) -> Option<Result<ResolutionResult, WorkerStopped>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(Ok(result)),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(WorkerStopped)),
        }
    }
}

impl Future for PendingResolution {
    type Output = Result<ResolutionResult, WorkerStopped>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.map_err(|_| WorkerStopped))
    }
}
