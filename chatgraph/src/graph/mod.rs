//! Conversation graph: reasoning node, tool node, router and executor.
//!
//! The topology is fixed: `START → reasoning → (tools → reasoning)* → END`.
//! [`ChatGraphBuilder`] assembles a [`ChatGraph`]; [`ChatGraph::invoke`] runs one
//! user turn against a thread's checkpoint.

mod build_error;
mod builder;
mod config;
mod executor;
pub mod logging;
mod node;
mod route;
mod run_context;

pub use build_error::BuildError;
pub use builder::ChatGraphBuilder;
pub use config::{ExecutorConfig, RunOptions, DEFAULT_MAX_ROUND_TRIPS};
pub use executor::{ChatGraph, RunOutcome, ABORTED_TOOL_RESULT};
pub use node::Node;
pub use route::{route, Route};
pub use run_context::RunContext;
