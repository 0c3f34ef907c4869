//! One-shot live lookup from the command line.
//!
//! Usage: `lookup [--first-name V] [--last-name V] [--email V] [--customer-id V]`
//!
//! Prints the same XML document the HTTP endpoint would return.

use livelookup_bridge::config::Config;
use livelookup_bridge::directory_client::DirectoryClient;
use livelookup_bridge::handlers::lookup_document;
use livelookup_bridge::models::LookupRequest;

/// Main entry point for the lookup utility.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let request = parse_args(std::env::args().skip(1))?;
    let config = Config::from_env()?;
    let directory = DirectoryClient::new(&config)?;

    let xml = lookup_document(&directory, &request).await;
    print!("{}", xml);

    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<LookupRequest> {
    let mut request = LookupRequest::default();

    while let Some(flag) = args.next() {
        let slot = match flag.as_str() {
            "--first-name" => &mut request.first_name,
            "--last-name" => &mut request.last_name,
            "--email" => &mut request.email,
            "--customer-id" => &mut request.customer_id,
            other => anyhow::bail!("Unknown argument: {}", other),
        };
        let value = args
            .next()
            .ok_or_else(|| anyhow::anyhow!("{} requires a value", flag))?;
        *slot = Some(value);
    }

    Ok(request)
}
