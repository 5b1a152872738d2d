//! chatgraph-cli library: config loading and run logic behind the `chatgraph` binary.
//!
//! Reads backend settings from `.env`, builds a [`ChatRunner`](chatgraph::ChatRunner)
//! and runs one message or an interactive session against a thread.
//!
//! ## Usage
//!
//! ```rust,no_run,ignore
//! dotenv::dotenv().ok();
//! let config = chatgraph_cli::RunConfig::from_env()?;
//! let runner = chatgraph_cli::build_runner(&config).await?;
//! chatgraph_cli::run_turn(&runner, &config.thread_id, "hello", &mut std::io::stdout()).await?;
//! ```

mod config;
mod run;

pub use config::{CliArgs, Error, RunConfig, DEFAULT_DB_PATH, DEFAULT_MODEL, DEFAULT_THREAD_ID};
pub use run::{build_runner, offline_llm, parse_command, print_transcript, run_repl, run_turn, Command};

#[cfg(test)]
mod tests;
