mod run;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dealscout")]
#[command(about = "Find the cheapest listing for a search within a price band")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the storefront, inspect every listing and write a report.
    Run {
        #[arg(long)]
        search_term: String,
        /// Lower price bound in whole currency units.
        #[arg(long)]
        min: u32,
        /// Upper price bound in whole currency units.
        #[arg(long)]
        max: u32,
        /// Report title and file stem. Defaults to the search term.
        #[arg(long)]
        output_name: Option<String>,
        /// Print the report to stdout instead of writing it.
        #[arg(long)]
        dry_run: bool,
    },
    /// Visit one product page and print the extracted record.
    Inspect { asin: String },
    /// Parse a rendered price string. `\n` in RAW stands for a line break.
    ParsePrice {
        raw: String,
        /// Currency symbol. Defaults to the configured currency.
        #[arg(long)]
        currency: Option<String>,
    },
}

impl Commands {
    /// `parse-price` with an explicit currency runs without any configuration.
    fn needs_config(&self) -> bool {
        !matches!(self, Commands::ParsePrice { currency: Some(_), .. })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if !command.needs_config() {
        if let Commands::ParsePrice {
            raw,
            currency: Some(currency),
        } = &command
        {
            println!("{}", run::parse_price_arg(raw, currency)?);
        }
        return Ok(());
    }

    let config = dealscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Run {
            search_term,
            min,
            max,
            output_name,
            dry_run,
        } => {
            run::run_scrape(
                &config,
                &search_term,
                min,
                max,
                output_name.as_deref(),
                dry_run,
            )
            .await?;
        }
        Commands::Inspect { asin } => run::run_inspect(&config, &asin).await?,
        Commands::ParsePrice { raw, currency } => {
            let currency = currency.as_deref().unwrap_or(&config.currency);
            println!("{}", run::parse_price_arg(&raw, currency)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
