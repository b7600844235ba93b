//! Demo 1: List Accounts
//!
//! Showcases: key file loading, signed GET, typed account decoding
//!
//! Run: COINBASE_KEY_FILE=cdp_api_key.json cargo run --bin list_accounts

use coinbase_demos::{client_from_env, init_logging};
use colored::*;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    println!("{}", "═".repeat(65).cyan());
    println!("{}", "  ACCOUNTS".cyan().bold());
    println!("{}", "  Coinbase Advanced Trade - Brokerage Accounts".cyan());
    println!("{}", "═".repeat(65).cyan());
    println!();

    let client = client_from_env()?;
    println!("{} Using key {}", "✓".green(), client.credentials().key_id());

    let accounts = client.accounts().get_accounts(Some(250), None, None, None).await?;

    println!(
        "\n  {:<10}  {:>20}  {:>20}",
        "CURRENCY".white().bold(),
        "AVAILABLE".white().bold(),
        "HOLD".white().bold()
    );
    println!("  {}", "─".repeat(54));

    for account in &accounts.accounts {
        println!(
            "  {:<10}  {:>20}  {:>20}",
            account.currency.yellow(),
            account.available_balance.value.to_string(),
            account.hold.value.to_string()
        );
    }

    if accounts.has_next {
        println!("\n  {} more accounts after cursor {}", "…".dimmed(), accounts.cursor);
    }

    // Raw JSON for fields not covered by the typed response
    let raw: Value = client
        .get(
            &format!("{}/accounts", coinbase_rest::API_PREFIX),
            coinbase_rest::Params::new().with("limit", 1),
            None,
        )
        .await?;
    println!("\n{}", serde_json::to_string_pretty(&raw)?);

    Ok(())
}
