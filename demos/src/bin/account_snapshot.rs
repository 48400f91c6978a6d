//! Demo 2: Account Snapshot
//!
//! Showcases: credential loading from the environment, signed v1 requests
//!
//! Run: BITFINEX_KEY=... BITFINEX_SECRET=... cargo run --bin account_snapshot

use bitfinex_rest::{BitfinexClient, ClientConfig, RestError};
use colored::*;
use serde_json::Value;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ClientConfig::new().with_timeout(Duration::from_secs(10));
    let client = BitfinexClient::with_config(config)?;

    if !client.has_credentials() {
        println!(
            "{} Set BITFINEX_KEY and BITFINEX_SECRET to run this demo",
            "✗".red()
        );
        return Ok(());
    }

    println!("{}", "  ACCOUNT SNAPSHOT".cyan().bold());
    println!("  {}", "─".repeat(50));

    match client.key_info().await {
        Ok(info) => println!("  {} Key permissions: {}", "✓".green(), info),
        Err(RestError::Api { status, body, .. }) => {
            println!("  {} Key rejected ({}): {}", "✗".red(), status, body);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let balances = client.balances().await?;
    println!("\n  {:<10} {:<10} {:>18}", "WALLET", "CURRENCY", "AMOUNT");
    for wallet in balances.as_array().map(Vec::as_slice).unwrap_or_default() {
        println!(
            "  {:<10} {:<10} {:>18}",
            text(&wallet["type"]),
            text(&wallet["currency"]).to_uppercase(),
            text(&wallet["amount"])
        );
    }

    let trades = client.my_trades("btcusd", Some(5)).await?;
    let count = trades.as_array().map(Vec::len).unwrap_or(0);
    println!("\n  {} {} recent BTCUSD trades", "✓".green(), count);

    Ok(())
}

fn text(value: &Value) -> String {
    value.as_str().unwrap_or("-").to_string()
}
