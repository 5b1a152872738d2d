//! Unit tests for chatgraph-cli, organized by module.
