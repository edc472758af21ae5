//! Recursive-descent parser for AgentQL queries
//!
//! ```text
//! query       := "{" field* "}"
//! field       := IDENT description? list_marker? block?
//! description := "(" text ")"
//! list_marker := "[" "]"
//! block       := "{" field* "}"
//! ```
//!
//! Fields are separated by whitespace; commas are accepted as separators and `#` starts a
//! comment that runs to the end of the line.

use crate::error::QueryError;
use crate::query::node::{FieldNode, ObjectNode, QueryNode};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Deepest block nesting accepted, counting the root block as 1
pub const MAX_QUERY_DEPTH: usize = 64;

const ROOT_NAME: &str = "query";

/// Parser over a single query string
pub struct QueryParser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> QueryParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Parse the whole source into the root container node
    pub fn parse(mut self) -> Result<ObjectNode, QueryError> {
        self.skip_trivia();
        if self.peek().is_none() {
            return Err(QueryError::Empty);
        }

        let (line, column) = self.position();
        self.expect('{')?;
        let children = self.parse_block_body(ROOT_NAME, line, column, 1)?;
        if children.is_empty() {
            return Err(QueryError::EmptyBlock {
                name: ROOT_NAME.to_string(),
                line,
                column,
            });
        }

        self.skip_trivia();
        if self.peek().is_some() {
            let (line, column) = self.position();
            return Err(QueryError::TrailingContent { line, column });
        }

        debug!(
            fields = children.len(),
            bytes = self.source.len(),
            "Parsed query"
        );
        Ok(ObjectNode::root(children))
    }

    /// Parse fields until the closing brace of the block opened at `line`/`column`
    fn parse_block_body(
        &mut self,
        name: &str,
        line: usize,
        column: usize,
        depth: usize,
    ) -> Result<Vec<QueryNode>, QueryError> {
        if depth > MAX_QUERY_DEPTH {
            return Err(QueryError::TooDeep {
                max: MAX_QUERY_DEPTH,
            });
        }

        let mut children = Vec::new();
        let mut seen = HashSet::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => {
                    return Err(QueryError::UnclosedBlock {
                        name: name.to_string(),
                        line,
                        column,
                    })
                }
                Some('}') => {
                    self.bump();
                    return Ok(children);
                }
                Some(c) if is_ident_start(c) => {
                    let (field_line, field_column) = self.position();
                    let field = self.parse_field(depth)?;
                    if !seen.insert(field.name().to_string()) {
                        return Err(QueryError::DuplicateField {
                            name: field.name().to_string(),
                            line: field_line,
                            column: field_column,
                        });
                    }
                    children.push(field);
                }
                Some(c) => {
                    let (line, column) = self.position();
                    return Err(QueryError::UnexpectedChar {
                        found: c,
                        line,
                        column,
                    });
                }
            }
        }
    }

    fn parse_field(&mut self, depth: usize) -> Result<QueryNode, QueryError> {
        let name = self.parse_ident();
        trace!(field = %name, depth, "Parsing field");

        self.skip_trivia();
        let description = if self.peek() == Some('(') {
            let description = self.parse_description()?;
            self.skip_trivia();
            Some(description)
        } else {
            None
        };

        let is_list = if self.peek() == Some('[') {
            self.bump();
            self.skip_trivia();
            self.expect(']')?;
            self.skip_trivia();
            true
        } else {
            false
        };

        if self.peek() != Some('{') {
            let field = FieldNode { name, description };
            return Ok(if is_list {
                QueryNode::FieldList(field)
            } else {
                QueryNode::Field(field)
            });
        }

        let (line, column) = self.position();
        self.bump();
        let children = self.parse_block_body(&name, line, column, depth + 1)?;
        if children.is_empty() {
            return Err(QueryError::EmptyBlock { name, line, column });
        }

        let object = ObjectNode {
            name,
            description,
            children,
        };
        Ok(if is_list {
            QueryNode::ObjectList(object)
        } else {
            QueryNode::Object(object)
        })
    }

    fn parse_ident(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if !is_ident_continue(c) {
                break;
            }
            ident.push(c);
            self.bump();
        }
        ident
    }

    fn parse_description(&mut self) -> Result<String, QueryError> {
        let (line, column) = self.position();
        self.bump();
        let mut text = String::new();
        loop {
            match self.bump() {
                None => return Err(QueryError::UnterminatedDescription { line, column }),
                Some(')') => return Ok(text.trim().to_string()),
                Some(c) => text.push(c),
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), QueryError> {
        let (line, column) = self.position();
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            other => Err(QueryError::Expected {
                expected,
                found: describe(other),
                line,
                column,
            }),
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == ',' {
                self.bump();
            } else if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn describe(c: Option<char>) -> String {
    match c {
        Some(c) => format!("'{}'", c),
        None => "end of input".to_string(),
    }
}
