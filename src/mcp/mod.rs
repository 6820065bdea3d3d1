//! MCP tool layer: catalog, argument handling, error normalization and routing

pub mod catalog;
pub mod dispatcher;
pub mod handlers;
pub mod normalize;
pub mod protocol;
