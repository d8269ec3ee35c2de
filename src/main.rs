use clap::Parser;
use rsescan::utils::logger;
use rsescan::{execute, CliConfig, RseError, RuntimeConfig};
use std::io::BufWriter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    if let Err(e) = run(&cli).await {
        tracing::error!("❌ rsescan failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: &CliConfig) -> Result<(), RseError> {
    let config = RuntimeConfig::resolve(cli)?;
    let client = config.client()?;

    let mut out = BufWriter::new(std::io::stdout());
    execute(&client, &config.descriptor, &mut out).await?;
    Ok(())
}
