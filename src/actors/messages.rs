use std::fmt;

use tokio::sync::oneshot;

use crate::protocol::{ResolutionRequest, ResolutionResult};

/// Callback run on the worker thread once a request completes.
pub type OnComplete = Box<dyn FnOnce(ResolutionResult) + Send + 'static>;

/// Where the result of a request is delivered.
/// Either way it is delivered exactly once, from the resolver worker's thread.
pub enum Completion {
    /// Hand the result to whoever holds the matching oneshot receiver.
    Channel(oneshot::Sender<ResolutionResult>),
    /// Call the function with the result.
    Callback(OnComplete),
}

impl Completion {
    pub fn complete(self, result: ResolutionResult) {
        match self {
            // The receiver may have been dropped, nobody is waiting then.
            Completion::Channel(respond_to) => {
                let _ = respond_to.send(result);
            }
            Completion::Callback(on_complete) => on_complete(result),
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Channel(_) => f.write_str("Completion::Channel"),
            Completion::Callback(_) => f.write_str("Completion::Callback"),
        }
    }
}

/// The ResolverMessage enum defines the kind of messages we can send to the resolver actor.
/// Every message carries its own way back to the sender, so the actor never
/// needs to know who asked.
#[derive(Debug)]
pub enum ResolverMessage {
    /// Resolve a host name to its IPv4 and IPv6 addresses.
    Resolve {
        request: ResolutionRequest,
        respond_to: Completion,
    },
}
