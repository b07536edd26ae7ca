use clap::{Parser, Subcommand};
use shared::config::Config;
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[command(
    name = "stx-checker",
    version,
    about = "Check STX balances for a list of wallet addresses"
)]
pub struct Cli {
    /// Pause between requests in milliseconds (overrides STX_REQUEST_DELAY_MS)
    #[arg(long = "delay-ms", global = true)]
    pub delay_ms: Option<u64>,

    /// Account-info endpoint the address is appended to (overrides STX_API_BASE_URL)
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Dump the raw API response for every failed address
    #[arg(long, global = true)]
    pub debug: bool,

    /// Write <BASENAME>.json and <BASENAME>.csv after the report
    #[arg(long, value_name = "BASENAME", global = true)]
    pub export: Option<String>,

    /// Skip writing export files
    #[arg(long = "no-export", global = true, conflicts_with = "export")]
    pub no_export: bool,

    /// Without a subcommand an interactive menu is shown
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Read wallets from a CSV file
    Csv { path: PathBuf },
    /// Read wallets from an Excel or OpenDocument workbook
    Excel {
        path: PathBuf,
        #[arg(long)]
        sheet: Option<String>,
    },
    /// Read wallets from a publicly shared Google Sheet
    Sheets {
        url: String,
        #[arg(long)]
        sheet: Option<String>,
    },
    /// Check the built-in sample addresses
    Sample,
    /// Show the raw and parsed API response for one address
    Debug { address: Option<String> },
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(delay_ms) = self.delay_ms {
            config.batch.delay_ms = delay_ms;
        }
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
    }

    /// Basename for non-interactive exports, `None` when exporting is disabled
    pub fn export_basename(&self, config: &Config) -> Option<String> {
        if self.no_export {
            return None;
        }
        Some(
            self.export
                .clone()
                .unwrap_or_else(|| config.export.basename.clone()),
        )
    }
}
