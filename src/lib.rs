//! Validates domain names and resolves them to IP addresses on a dedicated
//! background worker, without blocking the caller.
//!
//! ```no_run
//! use domain_resolver::{validator, ResolverConfig, ResolverContext};
//!
//! let ctx = ResolverContext::start(ResolverConfig::default())?;
//! let host = validator::validated(" example.com ")?;
//! match ctx.dispatcher().submit(host).wait()? {
//!     Ok(addrs) => println!("{addrs}"),
//!     Err(e) => println!("Error: {e}"),
//! }
//! ctx.shutdown()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actors;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod lookup;
pub mod protocol;
pub mod validator;

pub use context::{ResolverConfig, ResolverContext};
pub use errors::{BackendError, ContextError, ResolutionError, WorkerStopped};
pub use handlers::resolver_handler::{Dispatcher, PendingResolution};
pub use lookup::{Backend, Lookup};
pub use protocol::{Addresses, ResolutionRequest, ResolutionResult, Service};
pub use validator::{format_failures, validate, ValidationFailure, ValidationFailures};
