//! Conversation loop: open a session, then answer questions until `quit`.

use std::io::{self, BufRead, Write};

use crate::client::MendableClient;
use crate::console::{Console, QUIT};
use crate::error::RunError;
use crate::messages::{ChatResponse, JsonMap};

pub const PROMPT: &str = "Ask a question (type 'quit' to exit): ";

/// Run the `ask` loop.
///
/// Failing to open the conversation is fatal. Once the session is active,
/// a failed exchange is reported on the error stream and the user is
/// prompted again.
pub async fn run<R, W, E>(
    client: &MendableClient,
    console: &mut Console<R, W, E>,
) -> Result<(), RunError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let session = client.new_conversation().await.map_err(RunError::Session)?;
    let conversation_id = conversation_id(&session);

    while let Some(question) = console.prompt(PROMPT)? {
        if question == QUIT {
            break;
        }
        match client.chat(&question, &conversation_id).await {
            Ok(response) => render_answer(console.out(), &response)?,
            Err(e) => {
                tracing::debug!(error = ?e, "exchange failed");
                writeln!(console.err(), "{}", e)?;
            }
        }
    }
    Ok(())
}

fn conversation_id(session: &JsonMap) -> serde_json::Value {
    match session.get("conversation_id") {
        Some(id) => id.clone(),
        None => {
            tracing::warn!("newConversation response has no conversation_id");
            serde_json::Value::Null
        }
    }
}

/// Answer text, a `Sources:` header, then each link followed by a blank line.
pub fn render_answer<W: Write>(out: &mut W, response: &ChatResponse) -> io::Result<()> {
    writeln!(out, "{}", response.answer.text)?;
    writeln!(out, "Sources:\n--------")?;
    for source in &response.sources {
        writeln!(out, "{}", source.link)?;
        writeln!(out)?;
    }
    Ok(())
}
