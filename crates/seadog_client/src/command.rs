//! Top-level command selection and dispatch.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::client::MendableClient;
use crate::console::Console;
use crate::error::RunError;
use crate::ingest::OutputFormat;
use crate::{ask, ingest};

/// `ask` or `ingest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ask,
    Ingest,
}

impl FromStr for Command {
    type Err = RunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ask" => Ok(Command::Ask),
            "ingest" => Ok(Command::Ingest),
            other => Err(RunError::InvalidCommand(other.to_string())),
        }
    }
}

/// Knobs that do not change what is sent, only how it is shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub ingest_format: OutputFormat,
}

/// Run the selected loop to completion.
pub async fn run<R, W, E>(
    command: Command,
    client: &MendableClient,
    console: &mut Console<R, W, E>,
    options: Options,
) -> Result<(), RunError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    tracing::debug!(?command, "dispatching");
    match command {
        Command::Ask => ask::run(client, console).await,
        Command::Ingest => ingest::run(client, console, options.ingest_format).await,
    }
}
