//! Stdio transport and MCP server loop

pub mod stdio;
pub mod transport;
