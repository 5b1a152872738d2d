//! Configuration for the chat CLI.
//!
//! [`RunConfig`] is filled from env / `.env`, then [`CliArgs`] flags override it.

mod args;
mod run_config;

pub use args::CliArgs;
pub use run_config::{Error, RunConfig, DEFAULT_DB_PATH, DEFAULT_MODEL, DEFAULT_THREAD_ID};
