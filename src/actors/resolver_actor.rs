use crate::actors::messages::{Completion, ResolverMessage};
use crate::errors::{BackendError, ResolutionError};
use crate::lookup::Lookup;
use crate::protocol::{Addresses, ResolutionRequest};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

/// Builds the lookup backend the first time one is needed.
pub type LookupFactory = Box<dyn FnMut() -> Result<Box<dyn Lookup>, BackendError> + Send>;

/// Resolves host names by acting as an actor that processes incoming messages.
///
/// Lives on the resolver worker thread; the lookup backend is only ever
/// touched from there.
pub struct ResolverActor {
    // The receiver for incoming messages
    receiver: mpsc::UnboundedReceiver<ResolverMessage>,
    // Creates the backend on first use
    factory: LookupFactory,
    // The backend, once created
    lookup: Option<Box<dyn Lookup>>,
}

impl ResolverActor {
    pub fn new(receiver: mpsc::UnboundedReceiver<ResolverMessage>, factory: LookupFactory) -> Self {
        Self {
            receiver,
            factory,
            lookup: None,
        }
    }

    /// Processes messages until `stop` fires or every sender is gone.
    ///
    /// Lookups run as tasks on the current runtime, so several requests can
    /// be in flight at once and complete in any order.
    pub async fn run(&mut self, mut stop: oneshot::Receiver<()>) {
        loop {
            tokio::select! {
                _ = &mut stop => {
                    info!("Resolver worker stopping");
                    break;
                }
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle_message(msg),
                    None => {
                        debug!("All resolver handles dropped");
                        break;
                    }
                },
            }
        }
    }

    // Handle a message
    fn handle_message(&mut self, msg: ResolverMessage) {
        match msg {
            ResolverMessage::Resolve {
                request,
                respond_to,
            } => self.resolve(request, respond_to),
        }
    }

    fn resolve(&mut self, request: ResolutionRequest, respond_to: Completion) {
        let lookups = match self.backend() {
            Ok(lookup) => lookup.lookup(&request),
            Err(e) => {
                error!("Could not create lookup backend for {}: {}", request, e);
                let result = Err(ResolutionError::new(request.host, e.to_string()));
                // Completions always run as tasks, so a panicking callback
                // cannot take the run loop down with it.
                tokio::spawn(async move { respond_to.complete(result) });
                return;
            }
        };

        tokio::spawn(async move {
            let result = lookups.await.map(Addresses::from);
            match &result {
                Ok(addrs) if addrs.is_empty() => info!("Resolved {}: no addresses", request.host),
                Ok(addrs) => info!("Resolved {} -> {} address(es)", request.host, addrs.len()),
                Err(e) => error!("DNS lookup failed for {}: {}", request.host, e),
            }
            respond_to.complete(result);
        });
    }

    // A failed creation is not remembered, the next request tries again.
    fn backend(&mut self) -> Result<&dyn Lookup, BackendError> {
        let lookup = match self.lookup.take() {
            Some(lookup) => lookup,
            None => {
                debug!("Creating lookup backend");
                (self.factory)()?
            }
        };

        Ok(&**self.lookup.insert(lookup))
    }
}
