mod cli;

use std::io::{self, BufRead};

use anyhow::Context;
use domain_resolver::{validator, Dispatcher, PendingResolution, ResolverContext};
use tracing::{error, info, Level};

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse_args();

    // Initialize tracing subscriber for logging, kept off stdout
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let ctx = ResolverContext::start(args.resolver_config())
        .context("Failed to start the resolver worker")?;
    let dispatcher = ctx.dispatcher();

    if args.domains.is_empty() {
        info!("Reading domains from stdin, one per line");

        for line in io::stdin().lock().lines() {
            let line = line?;
            if let Some((host, pending)) = submit(&dispatcher, &line) {
                report(&host, pending);
            }
        }
    } else {
        // Everything is queued first, so the lookups overlap.
        let submitted: Vec<_> = args
            .domains
            .iter()
            .filter_map(|domain| submit(&dispatcher, domain))
            .collect();

        for (host, pending) in submitted {
            report(&host, pending);
        }
    }

    ctx.shutdown()?;

    Ok(())
}

/// Validates one input and, when it is clean, queues it for resolution.
fn submit(dispatcher: &Dispatcher, input: &str) -> Option<(String, PendingResolution)> {
    match validator::validated(input) {
        Ok(host) => {
            println!("{}: Resolving...", host);
            Some((host.to_string(), dispatcher.submit(host)))
        }
        Err(failures) => {
            println!("{:?}:\n{}", input, failures);
            None
        }
    }
}

fn report(host: &str, pending: PendingResolution) {
    match pending.wait() {
        Ok(Ok(addrs)) => println!("{}:\n{}", host, addrs),
        Ok(Err(e)) => println!("{}: Error: {}", host, e),
        Err(e) => error!("Could not resolve {}: {}", host, e),
    }
}
