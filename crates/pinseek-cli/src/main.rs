use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use pinseek_core::session::NO_DATA_MESSAGE;
use pinseek_core::{
    ConfigLoader, LookupOutcome, Pincode, PincodeLookup, PinseekConfig, PostalApiClient,
};

mod tui_runner;

#[derive(Parser, Debug)]
#[clap(
    name = "Pinseek",
    author,
    version = "0.1.0",
    about = "Indian postal PIN code lookup terminal"
)]
struct Cli {
    #[clap(
        long,
        short,
        help = "Path to a YAML configuration file (defaults apply when omitted)"
    )]
    config: Option<String>,

    #[clap(long, help = "Lookup service base URL, overriding the config file")]
    api_url: Option<String>,

    #[clap(
        long,
        help = "Lookup request timeout in milliseconds, overriding the config file"
    )]
    timeout_ms: Option<u64>,

    #[clap(long, short, help = "Log level filter, overriding the config file")]
    log_level: Option<String>,

    #[clap(long, help = "Log file path, overriding the config file")]
    log_file: Option<String>,

    #[clap(
        long,
        short,
        help = "Look up a single pincode and print the result instead of starting the UI"
    )]
    pincode: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = resolve_config(&cli).await?;

    // Logs always go to a file: the UI owns the terminal while it runs, and
    // one-shot mode keeps stdout clean for the lookup result.
    use std::fs::OpenOptions;

    let log_level_filter = config.logging.level.parse().unwrap_or(LevelFilter::Info);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.logging.file)
        .expect("Failed to create pinseek log file");

    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!(
        "Configuration resolved: endpoint {} with {}ms timeout",
        config.api.base_url,
        config.api.timeout_ms
    );

    match cli.pincode {
        Some(ref raw) => run_one_shot(&config, raw).await,
        None => tui_runner::run_tui(config).await,
    }
}

/// Merge the configuration file (or defaults) with command-line overrides.
async fn resolve_config(cli: &Cli) -> Result<PinseekConfig> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::from_file(path).await?,
        None => PinseekConfig::default(),
    };

    if let Some(api_url) = &cli.api_url {
        config.api.base_url = api_url.clone();
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.api.timeout_ms = timeout_ms;
    }
    if let Some(log_level) = &cli.log_level {
        config.logging.level = log_level.clone();
    }
    if let Some(log_file) = &cli.log_file {
        config.logging.file = log_file.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Execute a single lookup and print the result to stdout.
async fn run_one_shot(config: &PinseekConfig, raw: &str) -> Result<()> {
    let pincode = Pincode::parse(raw)?;
    let client =
        PostalApiClient::with_base_url(config.api.base_url.as_str(), config.api.timeout());

    match client.lookup(&pincode).await? {
        LookupOutcome::Matches(records) => {
            println!("{} post office(s) found for {}", records.len(), pincode);
            for record in &records {
                println!();
                println!("{}", record.display_name());
                print_field("Branch Type", record.branch_type.as_deref());
                print_field("Delivery Status", record.delivery_status.as_deref());
                print_field("Circle", record.circle.as_deref());
            }
        }
        LookupOutcome::NoMatches => {
            println!("{}", NO_DATA_MESSAGE);
        }
    }

    Ok(())
}

fn print_field(label: &str, value: Option<&str>) {
    println!("  {}: {}", label, value.unwrap_or("-"));
}
