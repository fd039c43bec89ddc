use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use transcript_relay::{
    app,
    cli::{
        handle_channels_command, handle_process_command, handle_resolve_command,
        handle_sanitize_command, Cli, CliCommand,
    },
    config::Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so `sanitize` and `resolve` output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(CliCommand::Version) => {
            println!("transcript-relay {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some(CliCommand::Sanitize) => {
            handle_sanitize_command()?;
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Some(CliCommand::Resolve(args)) => handle_resolve_command(&config.channels, args),
        Some(CliCommand::Channels) => handle_channels_command(&config.channels),
        Some(CliCommand::Process(args)) => handle_process_command(config, args).await,
        Some(CliCommand::Serve) | None => app::run_service(config).await,
        Some(CliCommand::Version) | Some(CliCommand::Sanitize) => Ok(()),
    }
}
