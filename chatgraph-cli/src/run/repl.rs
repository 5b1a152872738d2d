//! Interactive session: read lines, run turns, handle slash commands.

use std::io::Write;

use chatgraph::ChatRunner;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::config::Error;

use super::{print_transcript, run_turn};

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the thread's transcript.
    History,
    /// Forget the current thread.
    Reset,
    /// Forget every thread and start over.
    New,
    /// Replace the system prompt and clear the current thread. Empty text shows usage.
    Persona(String),
    Quit,
    /// Unknown slash command.
    Unknown(String),
    /// Blank line; ignored.
    Empty,
    Say(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match line {
        "" => Command::Empty,
        _ if head == "/persona" => Command::Persona(rest.trim().to_string()),
        "/history" => Command::History,
        "/reset" => Command::Reset,
        "/new" => Command::New,
        "/quit" | "/exit" => Command::Quit,
        _ if line.starts_with('/') => Command::Unknown(line.to_string()),
        _ => Command::Say(line.to_string()),
    }
}

/// Runs the REPL until `/quit` or end of input. A failed turn is reported and the
/// session continues.
pub async fn run_repl<R>(
    runner: &mut ChatRunner,
    thread_id: &str,
    input: R,
    out: &mut (dyn Write + Send),
) -> Result<(), Error>
where
    R: AsyncBufRead + Unpin,
{
    writeln!(
        out,
        "thread {}. Commands: /history /reset /new /persona <prompt> /quit",
        thread_id
    )?;
    let mut lines = input.lines();
    loop {
        write!(out, "You: ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_command(&line) {
            Command::Empty => {}
            Command::Quit => break,
            Command::History => print_transcript(runner, thread_id, out).await?,
            Command::Reset => {
                runner.reset(thread_id).await?;
                writeln!(out, "(thread {} cleared)", thread_id)?;
            }
            Command::New => {
                runner.reset_all().await?;
                writeln!(out, "(new session: all threads cleared)")?;
            }
            Command::Persona(prompt) if prompt.is_empty() => {
                writeln!(out, "usage: /persona <system prompt>")?
            }
            Command::Persona(prompt) => {
                runner.set_default_system_prompt(prompt);
                runner.reset(thread_id).await?;
                writeln!(out, "(persona updated; thread {} cleared)", thread_id)?;
            }
            Command::Unknown(cmd) => writeln!(out, "unknown command: {}", cmd)?,
            Command::Say(text) => {
                if let Err(e) = run_turn(runner, thread_id, &text, out).await {
                    writeln!(out, "error: {}", e)?;
                }
            }
        }
    }
    Ok(())
}
