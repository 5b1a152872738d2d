//! One user turn and transcript printing.

use std::io::Write;

use chatgraph::{ChatRunner, MessageClass, RunOptions, StreamEvent};
use tokio_stream::StreamExt;

use crate::config::Error;

/// Runs one turn, printing tool activity as it happens and the reply at the end.
///
/// Returns the reply; a failed run is returned as an error and the thread keeps
/// its previous history.
pub async fn run_turn(
    runner: &ChatRunner,
    thread_id: &str,
    text: &str,
    out: &mut (dyn Write + Send),
) -> Result<String, Error> {
    let mut events = runner.stream_turn(thread_id, text, RunOptions::default())?;
    while let Some(event) = events.next().await {
        match event {
            StreamEvent::Updates { messages, .. } => {
                for call in messages.iter().flat_map(|m| m.tool_calls()) {
                    writeln!(out, "  [calling {}: {}]", call.name, call.arguments)?;
                }
            }
            StreamEvent::Completed { reply } => {
                writeln!(out, "Bot: {}", reply)?;
                return Ok(reply);
            }
            StreamEvent::Failed { error } => return Err(error.into()),
            StreamEvent::Values(_) => {}
        }
    }
    Err("run ended without a result".into())
}

/// Prints the thread's transcript, one line per entry.
pub async fn print_transcript(
    runner: &ChatRunner,
    thread_id: &str,
    out: &mut (dyn Write + Send),
) -> Result<(), Error> {
    let entries = runner.get_transcript(thread_id).await?;
    if entries.is_empty() {
        writeln!(out, "(no messages in thread {})", thread_id)?;
    }
    for entry in entries {
        let who = match entry.class {
            MessageClass::UserMessage => "You",
            MessageClass::BotMessage => "Bot",
        };
        writeln!(out, "{}: {}", who, entry.text)?;
    }
    Ok(())
}
