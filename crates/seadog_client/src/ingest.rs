//! Ingestion loop: read a source URL and a type, submit, print the reply.

use std::io::{BufRead, Write};

use serde::Serialize;

use crate::client::MendableClient;
use crate::console::{Console, QUIT};
use crate::error::RunError;
use crate::messages::JsonMap;

pub const URL_PROMPT: &str = "Enter a data source url (type 'quit' to exit): ";
pub const TYPE_PROMPT: &str = "Enter the type of data ingestion (url only for now): ";

const REQUIRED: &str = "url and type are required";

/// How the server's reply is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Single-line JSON, as returned.
    #[default]
    Compact,
    /// Tab-indented, one member per line.
    Pretty,
}

impl OutputFormat {
    pub fn render(self, response: &JsonMap) -> Result<String, serde_json::Error> {
        match self {
            OutputFormat::Compact => serde_json::to_string(response),
            OutputFormat::Pretty => {
                let mut buf = Vec::new();
                let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
                let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
                response.serialize(&mut ser)?;
                Ok(String::from_utf8_lossy(&buf).into_owned())
            }
        }
    }
}

/// Run the `ingest` loop.
///
/// An empty URL or type ends the process with an error before anything is
/// sent. A failed submission is reported and the next URL is requested.
pub async fn run<R, W, E>(
    client: &MendableClient,
    console: &mut Console<R, W, E>,
    format: OutputFormat,
) -> Result<(), RunError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    loop {
        let Some(url) = console.prompt(URL_PROMPT)? else {
            break;
        };
        if url == QUIT {
            break;
        }
        if url.is_empty() {
            return Err(RunError::Validation(REQUIRED));
        }

        let typ = console.prompt(TYPE_PROMPT)?.unwrap_or_default();
        if typ.is_empty() {
            return Err(RunError::Validation(REQUIRED));
        }

        match client.ingest_data(&url, &typ).await {
            Ok(response) => {
                let text = format.render(&response)?;
                writeln!(console.out(), "{}", text)?;
            }
            Err(e) => {
                tracing::debug!(error = ?e, url = %url, "ingestion failed");
                writeln!(console.err(), "{}", e)?;
            }
        }
    }
    Ok(())
}
