//! Lookup backends.
//!
//! A [`Lookup`] is the resolution primitive the resolver worker delegates
//! to. The worker creates exactly one backend, on the first request, and
//! keeps it for the rest of its life.

use std::net::{IpAddr, SocketAddr};

use futures::future::{BoxFuture, FutureExt};
use hickory_resolver::{
    config::{NameServerConfig, ResolverConfig},
    name_server::TokioConnectionProvider,
    proto::xfer::Protocol,
    Resolver, TokioResolver,
};
use tracing::debug;

use crate::errors::{BackendError, ResolutionError};
use crate::protocol::ResolutionRequest;

/// A lookup in flight. Owns everything it needs, so it can be spawned.
pub type Lookups = BoxFuture<'static, Result<Vec<IpAddr>, ResolutionError>>;

/// A name-to-address resolution primitive.
pub trait Lookup: Send {
    /// Starts resolving `request`. The returned future must not borrow `self`.
    fn lookup(&self, request: &ResolutionRequest) -> Lookups;
}

/// Which resolution primitive the worker should create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Backend {
    /// The operating system's resolver (getaddrinfo).
    #[default]
    System,
    /// hickory-resolver, using the system configuration unless an upstream
    /// name server is given.
    Hickory { upstream: Option<SocketAddr> },
}

impl Backend {
    pub fn build(&self) -> Result<Box<dyn Lookup>, BackendError> {
        match self {
            Backend::System => Ok(Box::new(SystemLookup)),
            Backend::Hickory { upstream: None } => Ok(Box::new(HickoryLookup::system()?)),
            Backend::Hickory {
                upstream: Some(addr),
            } => Ok(Box::new(HickoryLookup::with_upstream(*addr))),
        }
    }
}

/// Resolves through the host OS, for TCP on the request's service port.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLookup;

impl Lookup for SystemLookup {
    fn lookup(&self, request: &ResolutionRequest) -> Lookups {
        let host = request.host.clone();
        let port = request.service.port();

        async move {
            debug!(host = %host, port, "resolving via the system resolver");

            let endpoints = tokio::net::lookup_host((host.as_str(), port))
                .await
                .map_err(|e| ResolutionError::new(host.as_str(), e.to_string()))?;

            // Only the address of each endpoint is of interest, the port is ours.
            Ok(endpoints.map(|endpoint| endpoint.ip()).collect())
        }
        .boxed()
    }
}

/// Resolves through hickory-resolver.
#[derive(Clone)]
pub struct HickoryLookup {
    resolver: TokioResolver,
}

impl HickoryLookup {
    /// Uses the system's resolver configuration (resolv.conf or the registry).
    pub fn system() -> Result<Self, BackendError> {
        let builder =
            TokioResolver::builder_tokio().map_err(|e| BackendError::SystemConfig(e.to_string()))?;

        Ok(Self {
            resolver: builder.build(),
        })
    }

    /// Sends every query to a single name server over UDP.
    pub fn with_upstream(addr: SocketAddr) -> Self {
        let mut resolver_config = ResolverConfig::new();
        let name_server_config = NameServerConfig {
            socket_addr: addr,
            protocol: Protocol::Udp,
            tls_dns_name: None,
            http_endpoint: None,
            trust_negative_responses: true,
            bind_addr: None,
        };

        resolver_config.add_name_server(name_server_config);

        let resolver =
            Resolver::builder_with_config(resolver_config, TokioConnectionProvider::default())
                .build();

        Self { resolver }
    }
}

impl Lookup for HickoryLookup {
    fn lookup(&self, request: &ResolutionRequest) -> Lookups {
        let resolver = self.resolver.clone();
        let host = request.host.clone();

        async move {
            debug!(host = %host, "resolving via hickory-resolver");

            let lookup = resolver
                .lookup_ip(host.as_str())
                .await
                .map_err(|e| ResolutionError::new(host.as_str(), e.to_string()))?;

            // Both A and AAAA answers, in the order the resolver produced them.
            Ok(lookup.iter().collect())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn test_default_backend_is_system() {
        assert_eq!(Backend::default(), Backend::System);
    }

    #[test]
    fn test_system_lookup_of_ip_literal() {
        // An address literal never leaves the host, so this works offline.
        let request = ResolutionRequest::new("127.0.0.1");
        let addrs = block_on(SystemLookup.lookup(&request)).unwrap();
        assert_eq!(addrs, vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]);
    }

    #[test]
    fn test_upstream_backend_builds() {
        let upstream = "127.0.0.1:5353".parse().unwrap();
        let backend = Backend::Hickory {
            upstream: Some(upstream),
        };
        let built = block_on(async { backend.build().is_ok() });
        assert!(built);
    }
}
