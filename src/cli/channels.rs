//! CLI handlers for inspecting the channel table.

use crate::channels::ChannelTable;
use anyhow::Result;

use super::args::ResolveCliArgs;

pub fn handle_resolve_command(table: &ChannelTable, args: ResolveCliArgs) -> Result<()> {
    println!("{}", table.resolve(&args.title));
    Ok(())
}

pub fn handle_channels_command(table: &ChannelTable) -> Result<()> {
    println!("=== Channel routes (match order) ===\n");

    if table.routes().is_empty() {
        println!("No routes configured.");
    } else {
        for (index, route) in table.routes().iter().enumerate() {
            println!("{:>3}. {} -> {}", index + 1, route.pattern, route.channel);
        }
    }

    println!("\ndefault -> {}", table.default_channel());
    Ok(())
}
