//! Interactive prompts for connection settings absent from the
//! configuration file.

use anyhow::{bail, Result};
use std::io::{self, Write};

/// Ask one question and read one trimmed line from stdin. Connection
/// settings are required, so an empty answer is fatal before any remote
/// call is made.
pub fn ask(question: &str) -> Result<String> {
    print!("{question} ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let answer = input.trim().to_string();
    if answer.is_empty() {
        bail!("no answer given to '{question}'; cannot connect without it");
    }
    Ok(answer)
}
