use anyhow::{bail, Context, Result};
use blockchain::BalanceResolver;
use checker::{export_results, render_report, BatchChecker, ExportPaths};
use chrono::Local;
use shared::config::Config;
use shared::{BalanceResult, WalletRef};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

use crate::args::{Cli, Command};
use crate::inspect::inspect_address;
use crate::menu::{choose_action, print_banner, Prompter};
use crate::progress::ConsoleProgress;

/// Where the wallet list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletSource {
    Excel { path: PathBuf, sheet: Option<String> },
    GoogleSheet { url: String, sheet: Option<String> },
    Csv { path: PathBuf },
    Sample,
}

impl WalletSource {
    pub async fn load(&self, config: &Config) -> Result<Vec<WalletRef>> {
        let wallets = match self {
            WalletSource::Excel { path, sheet } => sources::load_excel(path, sheet.as_deref())
                .with_context(|| format!("Error loading Excel file {}", path.display()))?,
            WalletSource::GoogleSheet { url, sheet } => {
                sources::load_google_sheet(&config.api, url, sheet.as_deref())
                    .await
                    .context(
                        "Error loading Google Sheets. Make sure the sheet is shared with 'Anyone with the link'",
                    )?
            }
            WalletSource::Csv { path } => sources::load_csv_file(path)
                .with_context(|| format!("Error loading CSV file {}", path.display()))?,
            WalletSource::Sample => sources::sample_wallets(),
        };
        Ok(wallets)
    }

    fn label(&self) -> &'static str {
        match self {
            WalletSource::Excel { .. } => "Excel file",
            WalletSource::GoogleSheet { .. } => "Google Sheets",
            WalletSource::Csv { .. } => "CSV file",
            WalletSource::Sample => "the built-in sample list",
        }
    }
}

/// What a run does once its inputs are known
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Check(WalletSource),
    Inspect(String),
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        match command {
            Command::Csv { path } => Action::Check(WalletSource::Csv { path }),
            Command::Excel { path, sheet } => Action::Check(WalletSource::Excel { path, sheet }),
            Command::Sheets { url, sheet } => {
                Action::Check(WalletSource::GoogleSheet { url, sheet })
            }
            Command::Sample => Action::Check(WalletSource::Sample),
            Command::Debug { address } => {
                Action::Inspect(address.unwrap_or_else(default_debug_address))
            }
        }
    }
}

pub fn default_debug_address() -> String {
    sources::sample::SAMPLE_ADDRESSES[0].1.to_string()
}

/// Run the subcommand in `cli`, or the interactive menu when there is none
pub async fn run<R, I, O>(
    cli: &Cli,
    config: &Config,
    resolver: R,
    input: &mut I,
    out: &mut O,
) -> Result<()>
where
    R: BalanceResolver,
    I: BufRead,
    O: Write,
{
    match &cli.command {
        Some(command) => match Action::from(command.clone()) {
            Action::Inspect(address) => inspect_address(&resolver, &address, out).await,
            Action::Check(source) => {
                let wallets = load_wallets(&source, config, out).await?;
                let results = check_and_report(resolver, config, &wallets, cli.debug, out).await?;
                if let Some(basename) = cli.export_basename(config) {
                    export(&results, &basename, out)?;
                }
                Ok(())
            }
        },
        None => run_interactive(cli, config, resolver, input, out).await,
    }
}

async fn run_interactive<R, I, O>(
    cli: &Cli,
    config: &Config,
    resolver: R,
    input: &mut I,
    out: &mut O,
) -> Result<()>
where
    R: BalanceResolver,
    I: BufRead,
    O: Write,
{
    let mut prompter = Prompter::new(input, out);
    print_banner(prompter.output())?;

    let source = match choose_action(&mut prompter)? {
        Action::Inspect(address) => {
            return inspect_address(&resolver, &address, prompter.output()).await;
        }
        Action::Check(source) => source,
    };

    let wallets = load_wallets(&source, config, prompter.output()).await?;

    let debug = cli.debug
        || prompter.confirm(&format!(
            "\nFound {} wallets. Enable debug output for failed addresses? (y/n): ",
            wallets.len()
        ))?;

    let results = check_and_report(resolver, config, &wallets, debug, prompter.output()).await?;

    if prompter.confirm("\nDo you want to export results to files? (y/n): ")? {
        let basename = prompter.ask("Enter filename (without extension): ")?;
        let basename = if basename.is_empty() {
            config.export.basename.clone()
        } else {
            basename
        };
        export(&results, &basename, prompter.output())?;
    }

    Ok(())
}

async fn load_wallets<O: Write>(
    source: &WalletSource,
    config: &Config,
    out: &mut O,
) -> Result<Vec<WalletRef>> {
    let wallets = source.load(config).await?;
    if wallets.is_empty() {
        bail!("No wallets loaded from {}. Exiting.", source.label());
    }

    writeln!(
        out,
        "✅ Loaded {} wallet addresses from {}",
        wallets.len(),
        source.label()
    )?;
    Ok(wallets)
}

/// Check every wallet, printing progress and then the report
pub async fn check_and_report<R, O>(
    resolver: R,
    config: &Config,
    wallets: &[WalletRef],
    debug: bool,
    out: &mut O,
) -> Result<Vec<BalanceResult>>
where
    R: BalanceResolver,
    O: Write,
{
    let checker = BatchChecker::new(resolver, config.batch.delay()).with_debug(debug);

    let results = {
        let mut progress = ConsoleProgress::new(&mut *out);
        checker.check_all_with_progress(wallets, &mut progress).await
    };

    write!(out, "{}", render_report(&results))?;
    writeln!(
        out,
        "Report generated at {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;

    Ok(results)
}

fn export<O: Write>(results: &[BalanceResult], basename: &str, out: &mut O) -> Result<ExportPaths> {
    let paths = export_results(results, basename)
        .with_context(|| format!("Failed to export results to {}", basename))?;
    info!(
        "Results exported to {}, {} and {}",
        paths.json.display(),
        paths.csv.display(),
        paths.xlsx.display()
    );

    writeln!(out, "\n📁 Results exported to:")?;
    writeln!(out, "   - {}", paths.json.display())?;
    writeln!(out, "   - {}", paths.csv.display())?;
    writeln!(out, "   - {}", paths.xlsx.display())?;
    Ok(paths)
}
