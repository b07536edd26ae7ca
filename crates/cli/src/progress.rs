use blockchain::RawResponse;
use checker::ProgressReporter;
use shared::{BalanceResult, Result, WalletRef};
use std::fmt;
use std::io::Write;
use tracing::warn;

/// Prints batch progress and debug dumps to the console
pub struct ConsoleProgress<'a, W> {
    out: &'a mut W,
}

impl<'a, W: Write> ConsoleProgress<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self { out }
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args) {
            warn!("Failed to write progress: {}", e);
        }
    }
}

impl<W: Write> ProgressReporter for ConsoleProgress<'_, W> {
    fn on_start(&mut self, total: usize, debug: bool) {
        self.line(format_args!("🔍 Checking balances for {} wallets...", total));
        if debug {
            self.line(format_args!("🐛 Debug mode enabled - will show detailed errors"));
        }
    }

    fn on_check(&mut self, index: usize, total: usize, wallet: &WalletRef) {
        self.line(format_args!("   Checking {}/{}: {}", index + 1, total, wallet.name));
    }

    fn on_probe(&mut self, result: &BalanceResult, probe: &Result<RawResponse>) {
        if let Some(err) = result.error() {
            self.line(format_args!("     ⚠️  Failed: {}", err));
        }
        self.line(format_args!("     📍 Address: {}", result.address));

        match probe {
            Ok(raw) => {
                self.line(format_args!("     📡 Status: {}", raw.status));
                if raw.status != 200 {
                    self.line(format_args!("     📄 Response: {}...", raw.body_snippet()));
                }
            }
            Err(e) => self.line(format_args!("     🔧 Debug error: {}", e)),
        }
    }
}
