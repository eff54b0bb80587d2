//! seadog: console client for the Mendable API.
//! Resolves the API key, then runs the `ask` or `ingest` loop on stdin/stdout.

use clap::Parser;
use seadog_client::{
    config, Command, Console, MendableClient, Options, OutputFormat, RunError, Settings,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "seadog",
    version,
    about = "Ask questions of, and ingest data into, a Mendable project"
)]
struct Cli {
    /// Command to execute: `ask` (ask a question) or `ingest` (ingest data)
    #[arg(short = 'c', long = "cmd", value_name = "COMMAND")]
    cmd: Option<String>,

    /// Same as --cmd, given positionally
    #[arg(value_name = "COMMAND", conflicts_with = "cmd")]
    command: Option<String>,

    /// API key (overrides the settings file)
    #[arg(long, env = "MENDABLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// API base URL
    #[arg(long, env = "MENDABLE_BASE_URL")]
    base_url: Option<String>,

    /// Settings file (default: ~/.seadog/config.yaml)
    #[arg(long, env = "SEADOG_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print ingestion responses
    #[arg(long)]
    pretty: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings, RunError> {
    let file = match cli.config.clone().or_else(config::default_config_path) {
        Some(path) => config::load_or_default(&path)?,
        None => config::Config::default(),
    };
    Ok(Settings::resolve(&file, cli.api_key.clone(), cli.base_url.clone())?)
}

fn run(cli: Cli) -> Result<(), RunError> {
    let command: Command = cli
        .cmd
        .as_deref()
        .or(cli.command.as_deref())
        .unwrap_or_default()
        .parse()?;
    let settings = load_settings(&cli)?;
    let options = Options {
        ingest_format: if cli.pretty {
            OutputFormat::Pretty
        } else {
            OutputFormat::Compact
        },
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let client = MendableClient::new(&settings);
    let mut console = Console::stdio();
    rt.block_on(seadog_client::command::run(command, &client, &mut console, options))
}

fn main() {
    // Load .env early; ignore if missing.
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}
