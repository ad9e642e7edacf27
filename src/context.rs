//! The resolver context: owner of the resolver worker thread.
//!
//! The entry point starts one [`ResolverContext`] and hands out
//! [`Dispatcher`]s from it. The worker thread drives a single-threaded tokio
//! runtime until the context is shut down (or dropped), at which point the
//! thread is stopped and joined. Requests still in flight at that moment are
//! dropped: their callbacks never run and their pending handles report
//! [`WorkerStopped`](crate::errors::WorkerStopped).

use std::thread;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::actors::messages::ResolverMessage;
use crate::actors::resolver_actor::ResolverActor;
use crate::errors::{BackendError, ContextError};
use crate::handlers::resolver_handler::Dispatcher;
use crate::lookup::{Backend, Lookup};

pub const WORKER_THREAD_NAME: &str = "resolver-worker";

/// The single helper thread blocking OS lookups run on.
pub const LOOKUP_THREAD_NAME: &str = "resolver-lookup";

#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    pub backend: Backend,
}

// Holding a sender means the worker's queue can never look closed, whether
// or not any dispatcher is alive or any work is queued.
#[derive(Debug)]
struct KeepAlive(mpsc::UnboundedSender<ResolverMessage>);

impl KeepAlive {
    // Swaps in a sender whose queue is already closed, so handles created
    // from here on fail with `WorkerStopped`.
    fn release(&mut self) {
        self.0 = mpsc::unbounded_channel().0;
    }
}

#[derive(Debug)]
pub struct ResolverContext {
    keep_alive: KeepAlive,
    stop: Option<oneshot::Sender<()>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl ResolverContext {
    /// Starts the worker with one of the stock backends.
    pub fn start(config: ResolverConfig) -> Result<Self, ContextError> {
        let backend = config.backend;
        Self::start_with(move || backend.build())
    }

    /// Starts the worker with a custom backend.
    ///
    /// `factory` runs on the worker thread, on the first request. If it
    /// fails, that request completes with an error and the next one calls
    /// it again.
    pub fn start_with<F>(factory: F) -> Result<Self, ContextError>
    where
        F: FnMut() -> Result<Box<dyn Lookup>, BackendError> + Send + 'static,
    {
        // getaddrinfo blocks, so the OS backend needs a helper thread. One is
        // enough: lookups queue behind each other instead of growing a pool.
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .max_blocking_threads(1)
            .thread_name(LOOKUP_THREAD_NAME)
            .build()
            .map_err(ContextError::Runtime)?;

        let (sender, receiver) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();
        let mut actor = ResolverActor::new(receiver, Box::new(factory));

        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                runtime.block_on(actor.run(stop_rx));

                // Close the queue first so late submissions fail right away.
                drop(actor);

                // Lookups stuck in the OS resolver are abandoned, not awaited.
                runtime.shutdown_background();
                debug!("Resolver worker exited");
            })
            .map_err(ContextError::Spawn)?;

        info!("Resolver worker started");

        Ok(Self {
            keep_alive: KeepAlive(sender),
            stop: Some(stop_tx),
            worker: Some(worker),
        })
    }

    /// A new handle for submitting requests. Handles outliving the context
    /// keep working, but every request then fails with `WorkerStopped`.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.keep_alive.0.clone())
    }

    /// The worker thread, while it is running.
    pub fn worker_thread(&self) -> Option<&thread::Thread> {
        self.worker.as_ref().map(|worker| worker.thread())
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }

    /// Stops the worker and waits for its thread to exit.
    pub fn shutdown(mut self) -> Result<(), ContextError> {
        self.stop_and_join()
    }

    fn stop_and_join(&mut self) -> Result<(), ContextError> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        self.keep_alive.release();
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }

        worker.join().map_err(|_| ContextError::WorkerPanicked)?;
        info!("Resolver worker stopped");

        Ok(())
    }
}

impl Drop for ResolverContext {
    fn drop(&mut self) {
        let _ = self.stop_and_join();
    }
}
