//! Demo 1: Market Overview
//!
//! Showcases: platform status, typed v2 tickers for trading pairs and
//! funding currencies, v1 daily summary
//!
//! Run: cargo run --bin market_overview

use bitfinex_rest::{BitfinexClient, TickerRecord};
use colored::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const SYMBOLS: [&str; 5] = ["tBTCUSD", "tETHUSD", "tSOLUSD", "fUSD", "fBTC"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  BITFINEX MARKET OVERVIEW".cyan().bold());
    println!("{}", "═".repeat(70).cyan());
    println!();

    let client = BitfinexClient::new()?;

    if !client.platform_status().await? {
        println!("{} Platform is in maintenance, try again shortly", "✗".red());
        return Ok(());
    }
    println!("{} Platform operative\n", "✓".green());

    let records = client.tickers(&SYMBOLS).await?;

    println!(
        "  {:<10} {:>14} {:>14} {:>14} {:>10}",
        "SYMBOL".white().bold(),
        "BID".white().bold(),
        "ASK".white().bold(),
        "LAST".white().bold(),
        "24H".white().bold()
    );
    println!("  {}", "─".repeat(66));

    for record in &records {
        let (bid, ask, change) = match record {
            TickerRecord::TradingPair(t) => (t.bid, t.ask, t.daily_change_perc),
            TickerRecord::FundingCurrency(f) => (f.bid, f.ask, f.daily_change_perc),
        };

        let pct = change * dec!(100);
        let change_str = if change > Decimal::ZERO {
            format!("{:+.2}%", pct).green()
        } else if change < Decimal::ZERO {
            format!("{:+.2}%", pct).red()
        } else {
            format!("{:+.2}%", pct).white()
        };

        println!(
            "  {:<10} {:>14} {:>14} {:>14} {:>10}",
            record.symbol().cyan(),
            bid,
            ask,
            record.last_price(),
            change_str
        );
    }

    println!();
    for record in &records {
        if let TickerRecord::FundingCurrency(f) = record {
            let annual = f.frr * dec!(365) * dec!(100);
            println!(
                "  {} FRR {} ({:.2}% annualised), bid period {}d",
                f.symbol.yellow(),
                f.frr,
                annual,
                f.bid_period
            );
        }
    }

    let today = client.today("btcusd").await?;
    println!(
        "\n  {} low {} high {} volume {}",
        "BTCUSD today".white().bold(),
        today["low"].as_str().unwrap_or("-"),
        today["high"].as_str().unwrap_or("-"),
        today["volume"].as_str().unwrap_or("-")
    );

    Ok(())
}
