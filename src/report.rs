use std::fmt::Write as _;
use std::io::Write;

use anyhow::Context;
use common::models::BalanceSet;
use walutomat::{ApiError, BalanceSource};

pub fn render_balances(balances: &BalanceSet) -> String {
    if balances.is_empty() {
        return "No balances found.\n".to_string();
    }

    let mut out = String::from("--- Your Wallet Balances ---\n");
    for balance in balances {
        let _ = writeln!(
            out,
            "Currency: {}\n  Total:     {}\n  Available: {}\n  Reserved:  {}\n",
            balance.currency_code(),
            balance.total_amount(),
            balance.available_amount(),
            balance.reserved_amount(),
        );
    }
    out.push_str("----------------------------\n");
    out
}

/// Human-readable failure text, including every key/description pair the
/// API attached.
pub fn render_failure(err: &anyhow::Error) -> String {
    let mut out = format!("Error: {:#}\n", err);

    if let Some(api_err) = err.downcast_ref::<ApiError>() {
        for detail in api_err.errors() {
            let _ = writeln!(
                out,
                "  - Error Key: {}, Description: {}",
                detail.key.as_deref().unwrap_or("-"),
                detail.description.as_deref().unwrap_or("-"),
            );
        }
    }
    out
}

/// Fetches once and writes the listing. Nothing is written on failure.
pub async fn run<S>(source: &S, out: &mut impl Write) -> anyhow::Result<()>
where
    S: BalanceSource + ?Sized,
{
    let balances = source.fetch_balances().await?;

    out.write_all(render_balances(&balances).as_bytes())
        .context("Failed to write balances")?;
    Ok(())
}
