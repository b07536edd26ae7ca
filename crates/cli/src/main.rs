use anyhow::Result;
use blockchain::StacksClient;
use clap::Parser;
use cli::{logging, run, Cli};
use shared::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration, then let flags override it
    let mut config = Config::from_env()?;
    cli.apply_overrides(&mut config);

    logging::init_logging(config.logging.format);
    tracing::info!("Using API endpoint {}", config.api.base_url);

    let client = StacksClient::new(&config.api)?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    run(&cli, &config, client, &mut input, &mut output).await
}
