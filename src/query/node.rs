//! Query tree node types

use serde::{Deserialize, Serialize};

/// A leaf field: `name`, `name (description)`, `name[]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNode {
    pub name: String,
    /// Free text between parentheses, e.g. `(context)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A composite field: `name { ... }`, `name[] { ... }`, or the query root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub children: Vec<QueryNode>,
}

/// One requested field of a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryNode {
    /// Single scalar value
    Field(FieldNode),
    /// List of scalar values
    FieldList(FieldNode),
    /// Nested object
    Object(ObjectNode),
    /// List of nested objects sharing one shape
    ObjectList(ObjectNode),
}

impl FieldNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

impl ObjectNode {
    pub fn new(name: impl Into<String>, children: Vec<QueryNode>) -> Self {
        Self {
            name: name.into(),
            description: None,
            children,
        }
    }

    /// The unnamed container holding a query's top-level fields
    pub fn root(children: Vec<QueryNode>) -> Self {
        Self::new("", children)
    }

    /// Look up a direct child by name
    pub fn child(&self, name: &str) -> Option<&QueryNode> {
        self.children.iter().find(|c| c.name() == name)
    }

    /// Maximum nesting depth below this node (a node with only leaves has depth 1)
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|c| match c {
                QueryNode::Object(o) | QueryNode::ObjectList(o) => o.depth(),
                QueryNode::Field(_) | QueryNode::FieldList(_) => 0,
            })
            .max()
            .unwrap_or(0)
    }
}

impl QueryNode {
    pub fn name(&self) -> &str {
        match self {
            QueryNode::Field(f) | QueryNode::FieldList(f) => &f.name,
            QueryNode::Object(o) | QueryNode::ObjectList(o) => &o.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            QueryNode::Field(f) | QueryNode::FieldList(f) => f.description.as_deref(),
            QueryNode::Object(o) | QueryNode::ObjectList(o) => o.description.as_deref(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, QueryNode::FieldList(_) | QueryNode::ObjectList(_))
    }

    pub fn children(&self) -> &[QueryNode] {
        match self {
            QueryNode::Object(o) | QueryNode::ObjectList(o) => &o.children,
            QueryNode::Field(_) | QueryNode::FieldList(_) => &[],
        }
    }
}
