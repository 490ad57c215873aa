//! Placefind CLI - Command-line interface
//!
//! Searches places by keyword, pages through the results, and saves them to
//! a spreadsheet.

mod commands;

use clap::Parser;
use placefind_core::PlacefindConfig;
use placefind_core::tracing_setup::{CliLogLevel, init_tracing};
use placefind_search::ServiceContext;

#[derive(Parser)]
#[command(name = "placefind")]
#[command(about = "Kakao map place search with postal codes and spreadsheet export")]
struct Cli {
    /// Console log level (RUST_LOG takes precedence)
    #[arg(long, global = true, value_enum, default_value_t = CliLogLevel::Warn)]
    log_level: CliLogLevel,

    #[command(subcommand)]
    command: Option<commands::Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match PlacefindConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    };

    init_tracing(
        cli.log_level.as_tracing_level(),
        Some(config.logging.logs_dir.as_path()),
    )?;

    let context = ServiceContext::new(config)?;
    tracing::debug!(
        "Search endpoint {}, export path {}",
        context.config().network.search_endpoint,
        context.config().export.output_path.display()
    );

    let command = cli.command.unwrap_or(commands::Commands::Interactive);
    commands::handle_command(&context, command).await?;

    Ok(())
}
