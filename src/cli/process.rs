//! CLI handler for processing a single meeting by hand.
//!
//! Useful for replaying a webhook that failed, since nothing is queued.

use crate::app::build_pipeline;
use crate::config::Config;
use anyhow::Result;

use super::args::ProcessCliArgs;

pub async fn handle_process_command(config: Config, args: ProcessCliArgs) -> Result<()> {
    let pipeline = build_pipeline(config, args.dry_run)?;

    let outcome = if args.dry_run {
        pipeline.dry_run(&args.meeting_id).await?
    } else {
        pipeline.run(&args.meeting_id).await?
    };

    println!("Title:   {}", outcome.title);
    println!("Channel: {}", outcome.channel);

    if outcome.published {
        println!("Posted summary to Slack.");
    } else {
        println!("\n{}", outcome.summary);
    }

    Ok(())
}
