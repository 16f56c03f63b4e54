use std::io::{self, Write};
use std::path::PathBuf;

use broadcast_admin_cli::logging::init_logging;
use broadcast_admin_cli::{
    CONFIG_ENV, CliError, Config, LazyClient, OutputFormat, Service, command_tree, format_outcome,
};
use clap::Parser;
use command_spec_core::Context;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "broadcast-admin", version)]
#[command(about = "Administer platform broadcasts")]
#[command(after_help = "Run `broadcast-admin help` or `broadcast-admin broadcasts --help` to list commands.")]
struct Cli {
    /// YAML config file with api_url, token, timeout_secs and max_content_bytes.
    #[arg(long, env = CONFIG_ENV)]
    config: Option<PathBuf>,
    /// API root URL (overrides config and BROADCAST_API_URL).
    #[arg(long)]
    api_url: Option<String>,
    /// Bearer token (overrides config and BROADCAST_TOKEN).
    #[arg(long)]
    token: Option<String>,
    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Command path followed by its arguments, e.g. `broadcasts show 12`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            Config::load(path)?
        }
        None => Config::default(),
    };
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(url) = cli.api_url {
        config.api_url = Some(url);
    }
    if let Some(token) = cli.token {
        config.token = Some(token);
    }

    let tree = command_tree(config.content_limit())?;
    let client = LazyClient::new(config);
    let service: &Service = &client;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    let mut ctx = Context::new(service, &mut input, &mut output);
    let outcome = tree.dispatch(&mut ctx, &cli.command)?;

    let rendered = format_outcome(&outcome, cli.format)?;
    output
        .write_all(rendered.as_bytes())
        .and_then(|()| output.flush())
        .map_err(CliError::Output)
}
