use crate::sanitizer::SummarySanitizer;
use anyhow::{Context, Result};
use std::io::{self, Read, Write};

pub fn handle_sanitize_command() -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read summary from stdin")?;

    let sanitizer = SummarySanitizer::new()?;
    io::stdout()
        .write_all(sanitizer.sanitize(&input).as_bytes())
        .context("Failed to write sanitized summary")?;
    Ok(())
}
