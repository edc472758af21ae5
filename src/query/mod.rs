//! AgentQL query language: tree types and parser.

pub mod node;
pub mod parser;

pub use node::{FieldNode, ObjectNode, QueryNode};
pub use parser::{QueryParser, MAX_QUERY_DEPTH};

use crate::error::QueryError;

/// Parse a query string into its root container node
pub fn parse_query(source: &str) -> Result<ObjectNode, QueryError> {
    QueryParser::new(source).parse()
}
