use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "transcript-relay")]
#[command(about = "Summarize finished meeting transcripts into Slack", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config.toml (default: <config dir>/transcript-relay/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Run the webhook server (default)
    Serve,
    /// Fetch, summarize and post one meeting without waiting for a webhook
    Process(ProcessCliArgs),
    /// Show which channel a meeting title would be posted to
    Resolve(ResolveCliArgs),
    /// List channel routes in match order
    Channels,
    /// Strip stray emoji from a summary read on stdin
    Sanitize,
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct ProcessCliArgs {
    /// Fireflies meeting / transcript id
    pub meeting_id: String,
    /// Print the summary instead of posting it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(ClapArgs, Debug)]
pub struct ResolveCliArgs {
    /// Meeting title as it appears in Fireflies
    pub title: String,
}
