use clap::Parser;
use domain_resolver::{Backend, ResolverConfig};
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(name = "domain-resolver")]
#[command(about = "Resolve domain names to their IP addresses", long_about = None)]
pub struct Args {
    /// Resolver, where <address> will be of the form <ip>:<port>
    #[arg(short, long, value_parser = parse_socket_addr)]
    pub resolver: Option<SocketAddr>,

    /// Use the built-in DNS client with the system configuration instead of the OS resolver
    #[arg(long)]
    pub hickory: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Domains to resolve; read one per line from stdin when none are given
    pub domains: Vec<String>,
}

fn parse_socket_addr(s: &str) -> Result<SocketAddr, String> {
    s.parse::<SocketAddr>().map_err(|_| {
        format!(
            "Invalid address format: '{}'. Expected format: <ip>:<port>",
            s
        )
    })
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn backend(&self) -> Backend {
        match (self.resolver, self.hickory) {
            (Some(upstream), _) => Backend::Hickory {
                upstream: Some(upstream),
            },
            (None, true) => Backend::Hickory { upstream: None },
            (None, false) => Backend::System,
        }
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            backend: self.backend(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_system_backend() {
        let args = Args::try_parse_from(["domain-resolver", "example.com"]).unwrap();
        assert_eq!(args.backend(), Backend::System);
        assert_eq!(args.domains, vec!["example.com"]);
        assert!(!args.verbose);
    }

    #[test]
    fn test_resolver_selects_hickory_upstream() {
        let args = Args::try_parse_from(["domain-resolver", "-r", "8.8.8.8:53"]).unwrap();
        assert_eq!(
            args.backend(),
            Backend::Hickory {
                upstream: Some("8.8.8.8:53".parse().unwrap())
            }
        );
        assert!(args.domains.is_empty());
    }

    #[test]
    fn test_hickory_flag_uses_system_config() {
        let args = Args::try_parse_from(["domain-resolver", "--hickory", "a.com", "b.org"]).unwrap();
        assert_eq!(args.backend(), Backend::Hickory { upstream: None });
        assert_eq!(args.domains, vec!["a.com", "b.org"]);
    }

    #[test]
    fn test_bad_resolver_address_is_rejected() {
        let err = Args::try_parse_from(["domain-resolver", "--resolver", "8.8.8.8"]).unwrap_err();
        assert!(err.to_string().contains("Expected format: <ip>:<port>"));
    }
}
