pub mod args;
mod channels;
mod process;
mod sanitize;

pub use args::{Cli, CliCommand, ProcessCliArgs, ResolveCliArgs};
pub use channels::{handle_channels_command, handle_resolve_command};
pub use process::handle_process_command;
pub use sanitize::handle_sanitize_command;
