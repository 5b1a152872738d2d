//! Command-line flags.

use clap::Parser;

/// Chat with the reasoning/tool graph. Without `--message`, starts an interactive session.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "chatgraph")]
#[command(about = "Chat with an LLM that can search the web; history is kept per thread")]
pub struct CliArgs {
    /// Conversation thread to use (default: THREAD_ID or "1")
    #[arg(short, long, value_name = "ID")]
    pub thread_id: Option<String>,

    /// Send one message, print the reply and exit
    #[arg(short, long, value_name = "TEXT")]
    pub message: Option<String>,

    /// System instruction for the model (default: SYSTEM_PROMPT or built-in)
    #[arg(long, value_name = "TEXT")]
    pub system_prompt: Option<String>,

    /// SQLite file for thread history (default: DB_PATH or chatgraph.db)
    #[arg(long, value_name = "PATH")]
    pub db_path: Option<String>,

    /// Keep history in memory only
    #[arg(long)]
    pub in_memory: bool,

    /// Use a scripted offline model and tool instead of real backends
    #[arg(long)]
    pub mock: bool,

    /// Maximum tool round trips per message
    #[arg(long, value_name = "N")]
    pub max_round_trips: Option<usize>,

    /// Per-step timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Show debug logs on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
