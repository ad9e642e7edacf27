// Define the resolution request and result structures

use std::net::IpAddr;

use crate::errors::ResolutionError;

/// The service a host is resolved for. Only the port matters to the lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Service {
    #[default]
    Http,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Service::Http => "http",
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            Service::Http => 80,
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub host: String,    // Host as submitted, already validated by the caller
    pub service: Service, // Service context, always http (port 80)
}

impl ResolutionRequest {
    pub fn new(host: impl Into<String>) -> Self {
        ResolutionRequest {
            host: host.into(),
            service: Service::Http,
        }
    }
}

impl std::fmt::Display for ResolutionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.service)
    }
}

/// Addresses a host resolved to, in the order the lookup returned them.
///
/// An empty list is a successful lookup that simply found nothing; it
/// renders as `No IP found.` rather than being turned into an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addresses(Vec<IpAddr>);

impl Addresses {
    pub fn new(addrs: Vec<IpAddr>) -> Self {
        Addresses(addrs)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IpAddr> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Textual form of every address, one string per address.
    pub fn to_strings(&self) -> Vec<String> {
        self.iter().map(IpAddr::to_string).collect()
    }

    pub fn into_inner(self) -> Vec<IpAddr> {
        self.0
    }
}

impl From<Vec<IpAddr>> for Addresses {
    fn from(addrs: Vec<IpAddr>) -> Self {
        Addresses(addrs)
    }
}

impl std::fmt::Display for Addresses {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("No IP found.");
        }
        for (i, addr) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", addr)?;
        }
        Ok(())
    }
}

/// Outcome of exactly one resolution request.
pub type ResolutionResult = Result<Addresses, ResolutionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_request_defaults_to_http() {
        let request = ResolutionRequest::new("example.com");
        assert_eq!(request.service, Service::Http);
        assert_eq!(request.service.port(), 80);
        assert_eq!(request.to_string(), "example.com:http");
    }

    #[test]
    fn test_addresses_keep_lookup_order() {
        let addrs = Addresses::new(vec![
            IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)),
            IpAddr::V6(Ipv6Addr::LOCALHOST),
            IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)),
        ]);

        assert_eq!(addrs.len(), 3);
        assert_eq!(addrs.iter().next(), Some(&IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34))));
        assert_eq!(addrs.to_strings(), vec!["93.184.216.34", "::1", "1.1.1.1"]);
        assert_eq!(addrs.to_string(), "93.184.216.34\n::1\n1.1.1.1");
    }

    #[test]
    fn test_empty_addresses_render_placeholder() {
        let addrs = Addresses::default();
        assert!(addrs.is_empty());
        assert_eq!(addrs.to_string(), "No IP found.");
    }
}
