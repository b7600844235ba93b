//! Demo 2: Fee Tier
//!
//! Showcases: transaction summary, API key permissions, error classification
//!
//! Run: COINBASE_KEY_FILE=cdp_api_key.json cargo run --bin fee_tier

use coinbase_demos::{client_from_env, init_logging};
use colored::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    println!("{}", "═".repeat(65).cyan());
    println!("{}", "  FEE TIER".cyan().bold());
    println!("{}", "  Coinbase Advanced Trade - Volume and Fees".cyan());
    println!("{}", "═".repeat(65).cyan());
    println!();

    let client = client_from_env()?;

    match client.data().get_api_key_permissions(None).await {
        Ok(permissions) => println!(
            "{} Key permissions: view={} trade={} transfer={}",
            "✓".green(),
            permissions.can_view,
            permissions.can_trade,
            permissions.can_transfer
        ),
        Err(e) if e.is_client_error() => {
            println!("{} Key rejected: {}", "✗".red(), e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let summary = client.get_transaction_summary().await?;
    let tier = &summary.fee_tier;

    println!();
    println!("  {:<20} {}", "Tier".white().bold(), tier.pricing_tier.yellow());
    println!(
        "  {:<20} {}",
        "Maker rate".white().bold(),
        tier.maker_fee_rate.map(|r| r.to_string()).unwrap_or_else(|| "-".into())
    );
    println!(
        "  {:<20} {}",
        "Taker rate".white().bold(),
        tier.taker_fee_rate.map(|r| r.to_string()).unwrap_or_else(|| "-".into())
    );
    println!("  {:<20} {:.2}", "30d volume".white().bold(), summary.total_volume);
    println!("  {:<20} {:.2}", "30d fees".white().bold(), summary.total_fees);

    Ok(())
}
