/// A lookup that reached the resolution primitive and failed.
///
/// The message is the primitive's own error text, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ResolutionError {
    pub host: String,
    pub message: String,
}

impl ResolutionError {
    pub fn new(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            message: message.into(),
        }
    }
}

/// The resolver worker is gone, so the request was never (or will never be) answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Resolver worker is not running")]
pub struct WorkerStopped;

/// Errors that can occur while creating a lookup backend
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Failed to read system resolver configuration: {0}")]
    SystemConfig(String),

    // Used by hand-built backends; the stock ones only fail on configuration.
    #[error("Lookup backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors that take down the resolution subsystem itself
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("Failed to build the resolver runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Failed to spawn the resolver worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Resolver worker thread panicked")]
    WorkerPanicked,
}
