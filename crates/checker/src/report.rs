use rust_decimal::Decimal;
use shared::BalanceResult;
use std::fmt::{self, Write};

const RULE_WIDTH: usize = 100;

/// Aggregate counts over a batch of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub total_checked: usize,
    pub successful: usize,
    pub failed: usize,
    /// Sum of total balances (display units) over successful checks
    pub combined_total: Decimal,
}

impl ReportSummary {
    pub fn from_results(results: &[BalanceResult]) -> Self {
        let successful = results.iter().filter(|r| r.is_success()).count();
        let combined_total = results.iter().map(BalanceResult::total_display).sum();

        Self {
            total_checked: results.len(),
            successful,
            failed: results.len() - successful,
            combined_total,
        }
    }
}

/// Render the human-readable balance report
pub fn render_report(results: &[BalanceResult]) -> String {
    let mut out = String::new();
    // fmt::Write for String never returns an error
    if write_report(&mut out, results).is_err() {
        tracing::warn!("Balance report rendering was cut short");
    }
    out
}

/// Write the balance report to `out`, stopping at the first write error
pub fn write_report<W: Write>(out: &mut W, results: &[BalanceResult]) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "\n{}", rule)?;
    writeln!(out, "STX WALLET BALANCE REPORT")?;
    writeln!(out, "{}", rule)?;

    for result in results {
        match &result.outcome {
            Ok(balance) => {
                writeln!(out, "\n✅ {}", result.name)?;
                writeln!(out, "   Address:           {}", result.address)?;
                writeln!(out, "   Available Balance: {:>12.6} STX", balance.balance_display)?;
                writeln!(out, "   Locked Balance:    {:>12.6} STX", balance.locked_display)?;
                if balance.locked > 0 {
                    writeln!(out, "   Total Balance:     {:>12.6} STX", balance.total_display)?;
                }
                writeln!(out, "   Nonce:             {:>12}", balance.nonce)?;
            }
            Err(err) => {
                writeln!(out, "\n❌ {}", result.name)?;
                writeln!(out, "   Address: {}", result.address)?;
                writeln!(out, "   Error: {}", err)?;
            }
        }
    }

    let summary = ReportSummary::from_results(results);

    writeln!(out, "\n{}", rule)?;
    writeln!(out, "SUMMARY")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "Total wallets checked: {}", summary.total_checked)?;
    writeln!(out, "Successful checks:     {}", summary.successful)?;
    writeln!(out, "Failed checks:         {}", summary.failed)?;
    if summary.successful > 0 {
        writeln!(out, "Combined balance:      {:>12.6} STX", summary.combined_total)?;
    }
    writeln!(out, "{}", rule)
}
