//! One-shot caller lookup from the command line.
//!
//! Usage: `lookup_caller <number> [region]`
//!
//! Normalizes the number, queries the lookup API and prints the in-app card.

use rust_dialer_info::config::Config;
use rust_dialer_info::errors::ResultExt;
use rust_dialer_info::lookup_client::CallerLookupClient;
use rust_dialer_info::normalizer::{is_ussd, normalize_number};
use rust_dialer_info::resolver::resolve;
use rust_dialer_info::screen::render_card;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_dialer_info=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let raw = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("Usage: lookup_caller <number> [region]"))?;

    if is_ussd(&raw) {
        anyhow::bail!("'{}' is a USSD code, not a phone number", raw);
    }

    let config = Config::from_env()?;
    let region = args.next().unwrap_or_else(|| config.default_region.clone());
    let caller = normalize_number(&raw, Some(&region));

    let client = CallerLookupClient::new(config.lookup_base_url.clone())?;
    let details = client
        .fetch_caller_details(&caller)
        .await
        .with_context(|| format!("Looking up {} against {}", caller, client.base_url()))?;

    let status = resolve(Some(&details), chrono::Local::now().naive_local());
    let card = render_card(&status);

    println!("Caller: {}", caller);
    for line in &card.lines {
        let marker = if line.highlight { "!" } else { " " };
        println!("{} {}", marker, line.text);
    }
    if card.lines.is_empty() {
        println!("  (nothing to show)");
    }

    Ok(())
}
