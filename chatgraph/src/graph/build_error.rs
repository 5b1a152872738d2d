//! Graph assembly error.
//!
//! Returned by `ChatGraphBuilder::build` when a required node is missing.

use thiserror::Error;

/// Error when assembling a `ChatGraph`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// No reasoning node (or LLM client) was supplied.
    #[error("graph needs a reasoning node")]
    MissingReasoningNode,

    /// No tool node (or tool source) was supplied.
    #[error("graph needs a tool node")]
    MissingToolNode,
}
