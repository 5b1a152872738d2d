//! Assemble a `ChatRunner` from config and drive it: one-shot or interactive.

mod build;
mod repl;
mod turn;

pub use build::{build_runner, offline_llm};
pub use repl::{parse_command, run_repl, Command};
pub use turn::{print_transcript, run_turn};
