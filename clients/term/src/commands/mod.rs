//! Subcommand implementations.

pub mod account;
pub mod run;

use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Print a prompt and read one line from stdin.
pub async fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    std::io::stdout().flush().context("failed to flush stdout")?;
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
