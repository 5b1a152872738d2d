//! Concrete tools and the name-keyed registry that exposes them as a `ToolSource`.

mod fn_tool;
mod registry;
#[cfg(feature = "tavily")]
mod tavily;
mod r#trait;

pub use fn_tool::FnTool;
pub use registry::ToolRegistry;
pub use r#trait::Tool;

#[cfg(feature = "tavily")]
pub use tavily::{TavilySearchTool, TOOL_TAVILY_SEARCH};
